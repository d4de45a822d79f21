//! Binary map layer for wrapped story payloads.
//!
//! Story payloads are MessagePack maps. This crate turns raw bytes into a
//! [`WireValue`] tree without any knowledge of the story schema; every later
//! stage treats that tree as untrusted input.

pub mod msgpack;
mod wire_value;

pub use msgpack::{decode, encode, MsgPackDecoder, MsgPackEncoder, MsgPackError};
pub use wire_value::WireValue;
