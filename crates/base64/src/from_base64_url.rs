//! URL-safe base64 decoding (the story token transport).

use crate::constants::PAD;
use crate::{from_base64, Base64Error};

/// Decodes an unpadded URL-safe base64 token.
///
/// `-` and `_` are translated back to `+` and `/`, the token is re-padded up
/// to the next multiple of 4 and then decoded with the standard decoder.
/// Trailing padding that survived in the token is tolerated; padding anywhere
/// else, and the standard-only characters `+` and `/`, are rejected.
///
/// # Example
///
/// ```
/// use wrapped_base64::from_base64_url;
///
/// assert_eq!(from_base64_url("aGVsbG8gd29ybGQ").unwrap(), b"hello world");
/// assert_eq!(from_base64_url("Zm8").unwrap(), b"fo");
/// assert_eq!(from_base64_url("Zm8=").unwrap(), b"fo");
/// ```
pub fn from_base64_url(encoded: &str) -> Result<Vec<u8>, Base64Error> {
    let trimmed = encoded.trim_end_matches(PAD);
    if encoded.len() - trimmed.len() > 2 {
        return Err(Base64Error::MisplacedPadding(trimmed.len()));
    }

    let mut standard = String::with_capacity(trimmed.len() + 3);
    for (offset, ch) in trimmed.char_indices() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' => standard.push(ch),
            '-' => standard.push('+'),
            '_' => standard.push('/'),
            PAD => return Err(Base64Error::MisplacedPadding(offset)),
            _ => return Err(Base64Error::InvalidCharacter { ch, offset }),
        }
    }

    match standard.len() % 4 {
        0 => {}
        1 => return Err(Base64Error::InvalidLength),
        rem => standard.extend(std::iter::repeat(PAD).take(4 - rem)),
    }

    from_base64(&standard)
}
