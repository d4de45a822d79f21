use thiserror::Error;
use wrapped_base64::Base64Error;
use wrapped_pack::MsgPackError;

/// Fatal decode failures. Field-level defects never surface here; they are
/// recovered by defaulting inside the record decoders.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("could not decode token: {0}")]
    Transport(#[from] Base64Error),
    #[error("malformed binary payload: {0}")]
    MalformedBinary(#[from] MsgPackError),
    #[error("unsupported story version {found} (expected {expected})")]
    UnsupportedVersion { found: i64, expected: &'static str },
}

impl DecodeError {
    /// Text shown to end users. Decode failures are deliberately not
    /// distinguished at this level.
    pub fn public_message(&self) -> &'static str {
        "Invalid data"
    }
}
