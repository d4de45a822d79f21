//! Base64 transport codec for wrapped story tokens.
//!
//! Story payloads travel inside URLs, so the canonical form is the unpadded
//! URL-safe variant (`-` and `_` instead of `+` and `/`). Decoding is
//! padding-tolerant: a token that still carries its trailing `=` characters
//! decodes to the same bytes.
//!
//! # Example
//!
//! ```
//! use wrapped_base64::{from_base64_url, to_base64_url};
//!
//! let token = to_base64_url(b"hello world");
//! assert_eq!(token, "aGVsbG8gd29ybGQ");
//! assert_eq!(from_base64_url(&token).unwrap(), b"hello world");
//! ```

mod constants;
mod from_base64;
mod from_base64_url;
mod to_base64;

pub use from_base64::from_base64;
pub use from_base64_url::from_base64_url;
pub use to_base64::{to_base64, to_base64_url};

use thiserror::Error;

/// Error type for base64 operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Base64Error {
    /// The input contains a character outside the accepted alphabet.
    #[error("INVALID_BASE64_STRING: unexpected character {ch:?} at offset {offset}")]
    InvalidCharacter { ch: char, offset: usize },
    /// Padding appears somewhere other than the end of the input.
    #[error("INVALID_BASE64_STRING: misplaced padding at offset {0}")]
    MisplacedPadding(usize),
    /// The (padded) length is not a multiple of 4.
    #[error("Base64 string length must be a multiple of 4")]
    InvalidLength,
}
