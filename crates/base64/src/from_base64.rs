//! Standard (padded) base64 decoding.

use crate::constants::DECODE_TABLE;
use crate::Base64Error;

const PADDING_CHAR: u8 = b'=';

#[inline]
fn sextet(bytes: &[u8], offset: usize) -> Result<u8, Base64Error> {
    let byte = bytes[offset];
    if byte == PADDING_CHAR {
        return Err(Base64Error::MisplacedPadding(offset));
    }
    let value = DECODE_TABLE[byte as usize];
    if value < 0 {
        return Err(Base64Error::InvalidCharacter {
            ch: byte as char,
            offset,
        });
    }
    Ok(value as u8)
}

/// Decodes a standard base64 string whose length is a multiple of 4.
///
/// Only the final quartet may carry padding (one or two `=` characters).
///
/// # Example
///
/// ```
/// use wrapped_base64::from_base64;
///
/// assert_eq!(from_base64("aGVsbG8=").unwrap(), b"hello");
/// assert!(from_base64("aGVsbG8").is_err());
/// ```
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, Base64Error> {
    let bytes = encoded.as_bytes();
    let length = bytes.len();
    if length == 0 {
        return Ok(Vec::new());
    }
    if length % 4 != 0 {
        return Err(Base64Error::InvalidLength);
    }

    let padding = if bytes[length - 2] == PADDING_CHAR {
        2
    } else if bytes[length - 1] == PADDING_CHAR {
        1
    } else {
        0
    };
    let main_length = if padding > 0 { length - 4 } else { length };

    let mut buf = Vec::with_capacity((length >> 2) * 3 - padding);
    let mut i = 0;
    while i < main_length {
        let s0 = sextet(bytes, i)?;
        let s1 = sextet(bytes, i + 1)?;
        let s2 = sextet(bytes, i + 2)?;
        let s3 = sextet(bytes, i + 3)?;
        buf.push((s0 << 2) | (s1 >> 4));
        buf.push((s1 << 4) | (s2 >> 2));
        buf.push((s2 << 6) | s3);
        i += 4;
    }

    if padding == 2 {
        if bytes[main_length + 3] != PADDING_CHAR {
            return Err(Base64Error::MisplacedPadding(main_length + 2));
        }
        let s0 = sextet(bytes, main_length)?;
        let s1 = sextet(bytes, main_length + 1)?;
        buf.push((s0 << 2) | (s1 >> 4));
    } else if padding == 1 {
        let s0 = sextet(bytes, main_length)?;
        let s1 = sextet(bytes, main_length + 1)?;
        let s2 = sextet(bytes, main_length + 2)?;
        buf.push((s0 << 2) | (s1 >> 4));
        buf.push((s1 << 4) | (s2 >> 2));
    }

    Ok(buf)
}
