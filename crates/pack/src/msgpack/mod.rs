//! MessagePack decoder and reference encoder.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;

use crate::WireValue;

/// Decode a complete MessagePack document.
pub fn decode(blob: &[u8]) -> Result<WireValue, MsgPackError> {
    MsgPackDecoder::new(blob).decode()
}

/// Encode a value with the reference encoder.
pub fn encode(value: &WireValue) -> Vec<u8> {
    let mut encoder = MsgPackEncoder::new();
    encoder.encode(value)
}
