use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid MessagePack marker byte 0x{byte:02x} at offset {offset}")]
    InvalidByte { byte: u8, offset: usize },
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("map key is not a string")]
    NotStr,
    #[error("top-level value is not a map")]
    NotObj,
    #[error("extension type {0} is not supported")]
    UnsupportedExtension(i8),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}
