//! `MsgPackEncoder`: reference MessagePack encoder.
//!
//! Emits the smallest marker for every value, which is what the story client
//! produces. Decoding never depends on it; fixtures and tools use it to build
//! payloads byte-for-byte the way the client does.

use crate::WireValue;

#[derive(Default)]
pub struct MsgPackEncoder {
    buf: Vec<u8>,
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode(&mut self, value: &WireValue) -> Vec<u8> {
        self.buf.clear();
        self.write_any(value);
        std::mem::take(&mut self.buf)
    }

    pub fn write_any(&mut self, value: &WireValue) {
        match value {
            WireValue::Null => self.buf.push(0xc0),
            WireValue::Bool(b) => self.buf.push(if *b { 0xc3 } else { 0xc2 }),
            WireValue::Integer(i) => self.write_integer(*i),
            WireValue::Float(f) => self.write_float(*f),
            WireValue::Str(s) => self.write_str(s),
            WireValue::Bytes(b) => self.write_bin(b),
            WireValue::Array(arr) => {
                self.write_arr_hdr(arr.len());
                for item in arr {
                    self.write_any(item);
                }
            }
            WireValue::Map(pairs) => {
                self.write_map_hdr(pairs.len());
                for (key, val) in pairs {
                    self.write_str(key);
                    self.write_any(val);
                }
            }
        }
    }

    pub fn write_float(&mut self, float: f64) {
        self.buf.push(0xcb);
        self.buf.extend_from_slice(&float.to_be_bytes());
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            if int <= 0x7f {
                self.buf.push(int as u8);
            } else if int <= 0xff {
                self.buf.extend_from_slice(&[0xcc, int as u8]);
            } else if int <= 0xffff {
                self.buf.push(0xcd);
                self.buf.extend_from_slice(&(int as u16).to_be_bytes());
            } else if int <= 0xffff_ffff {
                self.buf.push(0xce);
                self.buf.extend_from_slice(&(int as u32).to_be_bytes());
            } else {
                self.buf.push(0xcf);
                self.buf.extend_from_slice(&(int as u64).to_be_bytes());
            }
        } else if int >= -0x20 {
            // negative fixint: 0xe0..0xff
            self.buf.push(int as i8 as u8);
        } else if int >= -0x80 {
            self.buf.extend_from_slice(&[0xd0, int as i8 as u8]);
        } else if int >= -0x8000 {
            self.buf.push(0xd1);
            self.buf.extend_from_slice(&(int as i16).to_be_bytes());
        } else if int >= -0x8000_0000 {
            self.buf.push(0xd2);
            self.buf.extend_from_slice(&(int as i32).to_be_bytes());
        } else {
            self.buf.push(0xd3);
            self.buf.extend_from_slice(&int.to_be_bytes());
        }
    }

    pub fn write_str(&mut self, s: &str) {
        let length = s.len();
        if length <= 0x1f {
            self.buf.push(0xa0 | length as u8);
        } else if length <= 0xff {
            self.buf.extend_from_slice(&[0xd9, length as u8]);
        } else if length <= 0xffff {
            self.buf.push(0xda);
            self.buf.extend_from_slice(&(length as u16).to_be_bytes());
        } else {
            self.buf.push(0xdb);
            self.buf.extend_from_slice(&(length as u32).to_be_bytes());
        }
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn write_bin(&mut self, bin: &[u8]) {
        let length = bin.len();
        if length <= 0xff {
            self.buf.extend_from_slice(&[0xc4, length as u8]);
        } else if length <= 0xffff {
            self.buf.push(0xc5);
            self.buf.extend_from_slice(&(length as u16).to_be_bytes());
        } else {
            self.buf.push(0xc6);
            self.buf.extend_from_slice(&(length as u32).to_be_bytes());
        }
        self.buf.extend_from_slice(bin);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= 0xf {
            self.buf.push(0x90 | length as u8);
        } else if length <= 0xffff {
            self.buf.push(0xdc);
            self.buf.extend_from_slice(&(length as u16).to_be_bytes());
        } else {
            self.buf.push(0xdd);
            self.buf.extend_from_slice(&(length as u32).to_be_bytes());
        }
    }

    pub fn write_map_hdr(&mut self, length: usize) {
        if length <= 0xf {
            self.buf.push(0x80 | length as u8);
        } else if length <= 0xffff {
            self.buf.push(0xde);
            self.buf.extend_from_slice(&(length as u16).to_be_bytes());
        } else {
            self.buf.push(0xdf);
            self.buf.extend_from_slice(&(length as u32).to_be_bytes());
        }
    }
}
