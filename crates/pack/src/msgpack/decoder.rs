//! `MsgPackDecoder`: bounds-checked MessagePack decoder over a borrowed slice.
//!
//! Every read is checked against the end of the input, declared container
//! sizes never drive allocation beyond what the remaining bytes could hold,
//! and nesting is capped so hostile payloads cannot exhaust the stack.

use super::error::MsgPackError;
use crate::WireValue;

/// Maximum container nesting accepted by [`MsgPackDecoder`].
pub const MAX_DEPTH: usize = 64;

pub struct MsgPackDecoder<'a> {
    data: &'a [u8],
    x: usize,
    depth: usize,
}

impl<'a> MsgPackDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            depth: 0,
        }
    }

    /// Decode exactly one value spanning the whole input.
    pub fn decode(&mut self) -> Result<WireValue, MsgPackError> {
        let value = self.read_any()?;
        let rest = self.data.len() - self.x;
        if rest > 0 {
            return Err(MsgPackError::TrailingBytes(rest));
        }
        Ok(value)
    }

    /// Decode exactly one value spanning the whole input, requiring a map.
    pub fn decode_map(&mut self) -> Result<WireValue, MsgPackError> {
        match self.data.first() {
            Some(byte) if is_map_marker(*byte) => self.decode(),
            Some(_) => Err(MsgPackError::NotObj),
            None => Err(MsgPackError::UnexpectedEof),
        }
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), MsgPackError> {
        if n > self.data.len() - self.x {
            Err(MsgPackError::UnexpectedEof)
        } else {
            Ok(())
        }
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], MsgPackError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    #[inline]
    fn u8(&mut self) -> Result<u8, MsgPackError> {
        Ok(self.take::<1>()?[0])
    }

    #[inline]
    fn u16(&mut self) -> Result<u16, MsgPackError> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    #[inline]
    fn u32(&mut self) -> Result<u32, MsgPackError> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    #[inline]
    fn bytes(&mut self, size: usize) -> Result<&'a [u8], MsgPackError> {
        self.check(size)?;
        let slice = &self.data[self.x..self.x + size];
        self.x += size;
        Ok(slice)
    }

    #[inline]
    fn utf8(&mut self, size: usize) -> Result<String, MsgPackError> {
        let slice = self.bytes(size)?;
        std::str::from_utf8(slice)
            .map(str::to_owned)
            .map_err(|_| MsgPackError::InvalidUtf8)
    }

    /// Read one value at the current offset.
    pub fn read_any(&mut self) -> Result<WireValue, MsgPackError> {
        let offset = self.x;
        let byte = self.u8()?;

        // negative fixint: 0xe0–0xff → -32..–1
        if byte >= 0xe0 {
            return Ok(WireValue::Integer(byte as i8 as i64));
        }
        // positive fixint: 0x00–0x7f
        if byte <= 0x7f {
            return Ok(WireValue::Integer(byte as i64));
        }
        // fixmap: 0x80–0x8f
        if (0x80..=0x8f).contains(&byte) {
            return self.read_map(byte as usize & 0xf);
        }
        // fixarray: 0x90–0x9f
        if (0x90..=0x9f).contains(&byte) {
            return self.read_arr(byte as usize & 0xf);
        }
        // fixstr: 0xa0–0xbf
        if (0xa0..=0xbf).contains(&byte) {
            return self.utf8(byte as usize & 0x1f).map(WireValue::Str);
        }

        match byte {
            0xc0 => Ok(WireValue::Null),
            0xc2 => Ok(WireValue::Bool(false)),
            0xc3 => Ok(WireValue::Bool(true)),
            // bin8, bin16, bin32
            0xc4 => {
                let n = self.u8()? as usize;
                Ok(WireValue::Bytes(self.bytes(n)?.to_vec()))
            }
            0xc5 => {
                let n = self.u16()? as usize;
                Ok(WireValue::Bytes(self.bytes(n)?.to_vec()))
            }
            0xc6 => {
                let n = self.u32()? as usize;
                Ok(WireValue::Bytes(self.bytes(n)?.to_vec()))
            }
            // ext8, ext16, ext32 and fixext1..16
            0xc7 => {
                let n = self.u8()? as usize;
                self.reject_ext(n)
            }
            0xc8 => {
                let n = self.u16()? as usize;
                self.reject_ext(n)
            }
            0xc9 => {
                let n = self.u32()? as usize;
                self.reject_ext(n)
            }
            0xd4 => self.reject_ext(1),
            0xd5 => self.reject_ext(2),
            0xd6 => self.reject_ext(4),
            0xd7 => self.reject_ext(8),
            0xd8 => self.reject_ext(16),
            // float32, float64
            0xca => Ok(WireValue::Float(f32::from_be_bytes(self.take()?) as f64)),
            0xcb => Ok(WireValue::Float(f64::from_be_bytes(self.take()?))),
            // uint8, uint16, uint32, uint64
            0xcc => Ok(WireValue::Integer(self.u8()? as i64)),
            0xcd => Ok(WireValue::Integer(self.u16()? as i64)),
            0xce => Ok(WireValue::Integer(self.u32()? as i64)),
            0xcf => {
                let v = u64::from_be_bytes(self.take()?);
                Ok(match i64::try_from(v) {
                    Ok(i) => WireValue::Integer(i),
                    Err(_) => WireValue::Float(v as f64),
                })
            }
            // int8, int16, int32, int64
            0xd0 => Ok(WireValue::Integer(i8::from_be_bytes(self.take()?) as i64)),
            0xd1 => Ok(WireValue::Integer(i16::from_be_bytes(self.take()?) as i64)),
            0xd2 => Ok(WireValue::Integer(i32::from_be_bytes(self.take()?) as i64)),
            0xd3 => Ok(WireValue::Integer(i64::from_be_bytes(self.take()?))),
            // str8, str16, str32
            0xd9 => {
                let n = self.u8()? as usize;
                self.utf8(n).map(WireValue::Str)
            }
            0xda => {
                let n = self.u16()? as usize;
                self.utf8(n).map(WireValue::Str)
            }
            0xdb => {
                let n = self.u32()? as usize;
                self.utf8(n).map(WireValue::Str)
            }
            // array16, array32
            0xdc => {
                let n = self.u16()? as usize;
                self.read_arr(n)
            }
            0xdd => {
                let n = self.u32()? as usize;
                self.read_arr(n)
            }
            // map16, map32
            0xde => {
                let n = self.u16()? as usize;
                self.read_map(n)
            }
            0xdf => {
                let n = self.u32()? as usize;
                self.read_map(n)
            }
            // 0xc1 is reserved ("never used") by the format.
            _ => Err(MsgPackError::InvalidByte { byte, offset }),
        }
    }

    fn enter(&mut self) -> Result<(), MsgPackError> {
        if self.depth >= MAX_DEPTH {
            return Err(MsgPackError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_map(&mut self, size: usize) -> Result<WireValue, MsgPackError> {
        self.enter()?;
        // Each entry needs at least two bytes.
        let mut map = Vec::with_capacity(size.min((self.data.len() - self.x) / 2));
        for _ in 0..size {
            let key = self.read_key()?;
            let val = self.read_any()?;
            map.push((key, val));
        }
        self.depth -= 1;
        Ok(WireValue::Map(map))
    }

    fn read_arr(&mut self, size: usize) -> Result<WireValue, MsgPackError> {
        self.enter()?;
        let mut arr = Vec::with_capacity(size.min(self.data.len() - self.x));
        for _ in 0..size {
            arr.push(self.read_any()?);
        }
        self.depth -= 1;
        Ok(WireValue::Array(arr))
    }

    fn reject_ext(&mut self, size: usize) -> Result<WireValue, MsgPackError> {
        let tag = self.u8()? as i8;
        self.check(size)?;
        Err(MsgPackError::UnsupportedExtension(tag))
    }

    /// Read a string map key.
    fn read_key(&mut self) -> Result<String, MsgPackError> {
        let byte = self.u8()?;
        let size = match byte {
            0xa0..=0xbf => (byte & 0x1f) as usize,
            0xd9 => self.u8()? as usize,
            0xda => self.u16()? as usize,
            0xdb => self.u32()? as usize,
            _ => return Err(MsgPackError::NotStr),
        };
        self.utf8(size)
    }
}

fn is_map_marker(byte: u8) -> bool {
    matches!(byte, 0xde | 0xdf) || (byte >> 4 == 0b1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scalars() {
        assert_eq!(MsgPackDecoder::new(&[0xc0]).decode(), Ok(WireValue::Null));
        assert_eq!(
            MsgPackDecoder::new(&[0xc3]).decode(),
            Ok(WireValue::Bool(true))
        );
        assert_eq!(
            MsgPackDecoder::new(&[0xff]).decode(),
            Ok(WireValue::Integer(-1))
        );
        assert_eq!(
            MsgPackDecoder::new(&[0xd2, 0x80, 0x00, 0x00, 0x00]).decode(),
            Ok(WireValue::Integer(i32::MIN as i64))
        );
        assert_eq!(
            MsgPackDecoder::new(&[0xce, 0xff, 0xff, 0xff, 0xff]).decode(),
            Ok(WireValue::Integer(u32::MAX as i64))
        );
    }

    #[test]
    fn reserved_marker_is_rejected() {
        assert_eq!(
            MsgPackDecoder::new(&[0x91, 0xc1]).decode(),
            Err(MsgPackError::InvalidByte {
                byte: 0xc1,
                offset: 1
            })
        );
    }

    #[test]
    fn huge_declared_array_does_not_preallocate() {
        // array32 declaring u32::MAX elements with no body.
        let err = MsgPackDecoder::new(&[0xdd, 0xff, 0xff, 0xff, 0xff]).decode();
        assert_eq!(err, Err(MsgPackError::UnexpectedEof));
    }

    #[test]
    fn nesting_is_capped() {
        let mut deep = vec![0x91; MAX_DEPTH + 1];
        deep.push(0x00);
        assert_eq!(
            MsgPackDecoder::new(&deep).decode(),
            Err(MsgPackError::TooDeep(MAX_DEPTH))
        );

        let mut ok = vec![0x91; MAX_DEPTH];
        ok.push(0x00);
        assert!(MsgPackDecoder::new(&ok).decode().is_ok());
    }

    #[test]
    fn decode_map_requires_map_marker() {
        assert_eq!(
            MsgPackDecoder::new(&[0x90]).decode_map(),
            Err(MsgPackError::NotObj)
        );
        assert_eq!(
            MsgPackDecoder::new(&[]).decode_map(),
            Err(MsgPackError::UnexpectedEof)
        );
        assert_eq!(
            MsgPackDecoder::new(&[0x80]).decode_map(),
            Ok(WireValue::Map(vec![]))
        );
    }
}
