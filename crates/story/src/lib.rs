//! Decoder for wrapped story payloads.
//!
//! A story travels as a URL-safe base64 token wrapping a MessagePack map.
//! Decoding runs text → bytes → [`WireValue`] → version dispatch → typed
//! record, and a separate read-only pass validates the result:
//!
//! ```
//! use serde_json::json;
//! use wrapped_pack::{encode, WireValue};
//! use wrapped_story::{decode_story, validate_at};
//!
//! let wire = WireValue::from(json!({
//!     "v": 3, "y": 2025, "m": 1200,
//!     "hm": [0, 168], "hm_rle": true,
//! }));
//! let token = wrapped_base64::to_base64_url(&encode(&wire));
//!
//! let story = decode_story(&token).unwrap();
//! assert_eq!(story.heatmap.len(), 168);
//! assert!(validate_at(&story.clone().into(), 2025).valid);
//! ```
//!
//! Three wire generations exist. V3 is the only one served end to end;
//! V1 (plain strings) and V2 (dictionary indices) remain decodable through
//! [`decode_legacy`] for archival checks.

mod compact;
mod decode;
pub mod dictionary;
mod error;
pub mod format;
mod legacy;
mod model;
mod quantized;
mod rle;
mod v3;
mod validate;
mod version;

pub use compact::{decode_list, CompactRecord};
pub use decode::{
    decode_and_validate, decode_legacy, decode_story, decode_story_auto,
    decode_story_auto_with, decode_wire, DecodeOptions, LegacyPolicy,
};
pub use dictionary::{resolve, verify_dictionaries, DictionaryDrift};
pub use error::DecodeError;
pub use model::{
    LegacyProject, LegacyStory, Project, ProjectLink, SessionFingerprint, StoryV3, Streaks,
    TimelineEvent, TokenUsage, TraitKind, TraitScores, VersionedStory, YearOverYear,
    FINGERPRINT_DIMENSIONS, HEATMAP_LEN,
};
pub use quantized::Quantized;
pub use rle::rle_expand;
pub use validate::{validate, validate_at, ValidationError, ValidationOutcome, MIN_YEAR};
pub use version::{classify, version_tag, Version};

pub use wrapped_pack::WireValue;
