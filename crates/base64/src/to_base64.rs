//! Reference encoders.
//!
//! Story tokens are produced by the client; these exist so fixtures and tools
//! can build tokens with exactly the layout the client emits.

use crate::constants::{ALPHABET_BYTES, PAD};

fn encode_with(uint8: &[u8], plus: u8, slash: u8, pad: bool) -> String {
    let lookup = |sextet: u8| -> char {
        match ALPHABET_BYTES[sextet as usize] {
            b'+' => plus as char,
            b'/' => slash as char,
            c => c as char,
        }
    };

    let mut out = String::with_capacity(uint8.len().div_ceil(3) * 4);
    for chunk in uint8.chunks(3) {
        let o1 = chunk[0];
        let o2 = chunk.get(1).copied().unwrap_or(0);
        let o3 = chunk.get(2).copied().unwrap_or(0);

        out.push(lookup(o1 >> 2));
        out.push(lookup(((o1 & 0b11) << 4) | (o2 >> 4)));
        if chunk.len() > 1 {
            out.push(lookup(((o2 & 0b1111) << 2) | (o3 >> 6)));
        } else if pad {
            out.push(PAD);
        }
        if chunk.len() > 2 {
            out.push(lookup(o3 & 0b11_1111));
        } else if pad {
            out.push(PAD);
        }
    }
    out
}

/// Encodes a byte slice to a standard, padded base64 string.
///
/// # Example
///
/// ```
/// use wrapped_base64::to_base64;
///
/// assert_eq!(to_base64(b"hello world"), "aGVsbG8gd29ybGQ=");
/// ```
pub fn to_base64(uint8: &[u8]) -> String {
    encode_with(uint8, b'+', b'/', true)
}

/// Encodes a byte slice to an unpadded URL-safe base64 string.
pub fn to_base64_url(uint8: &[u8]) -> String {
    encode_with(uint8, b'-', b'_', false)
}
