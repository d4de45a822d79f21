//! Decode entry points.

use tracing::{debug, info};
use wrapped_base64::from_base64_url;
use wrapped_pack::{MsgPackDecoder, WireValue};

use crate::error::DecodeError;
use crate::legacy::decode_legacy_body;
use crate::model::{StoryV3, VersionedStory};
use crate::v3::decode_v3_body;
use crate::validate::{validate, validate_at, ValidationOutcome};
use crate::version::{classify, version_tag, Version};

/// What auto detection does with V1/V2 payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LegacyPolicy {
    /// Fail with [`DecodeError::UnsupportedVersion`].
    #[default]
    Reject,
    /// Decode through the legacy decoders.
    Accept,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub legacy: LegacyPolicy,
    /// Year the validator treats as "now"; `None` reads the system clock.
    pub current_year: Option<i64>,
}

impl DecodeOptions {
    /// Validates against [`DecodeOptions::current_year`] or the system clock.
    pub fn validate(&self, story: &VersionedStory) -> ValidationOutcome {
        match self.current_year {
            Some(year) => validate_at(story, year),
            None => validate(story),
        }
    }
}

/// Transport and binary stages: token → wire map.
pub fn decode_wire(token: &str) -> Result<WireValue, DecodeError> {
    let bytes = from_base64_url(token)?;
    let wire = MsgPackDecoder::new(&bytes).decode_map()?;
    debug!(bytes = bytes.len(), "decoded wire map");
    Ok(wire)
}

/// Decodes a story that must carry exactly version 3.
pub fn decode_story(token: &str) -> Result<StoryV3, DecodeError> {
    StoryV3::from_wire(&decode_wire(token)?)
}

/// Decodes any story, classifying its version first. V1/V2 payloads are
/// rejected; see [`decode_story_auto_with`] to opt into them.
pub fn decode_story_auto(token: &str) -> Result<VersionedStory, DecodeError> {
    decode_story_auto_with(token, &DecodeOptions::default())
}

pub fn decode_story_auto_with(
    token: &str,
    options: &DecodeOptions,
) -> Result<VersionedStory, DecodeError> {
    VersionedStory::from_wire(&decode_wire(token)?, options.legacy)
}

/// Decodes an archived V1 or V2 story.
pub fn decode_legacy(token: &str) -> Result<VersionedStory, DecodeError> {
    VersionedStory::from_legacy_wire(&decode_wire(token)?)
}

/// Auto-detecting decode followed by validation.
pub fn decode_and_validate(
    token: &str,
    options: &DecodeOptions,
) -> Result<(VersionedStory, ValidationOutcome), DecodeError> {
    let story = decode_story_auto_with(token, options)?;
    let outcome = options.validate(&story);
    if let Some(message) = outcome.message() {
        info!(version = story.version_tag(), reason = %message, "story failed validation");
    }
    Ok((story, outcome))
}

impl StoryV3 {
    /// Decodes a wire map whose version tag is exactly 3.
    pub fn from_wire(wire: &WireValue) -> Result<Self, DecodeError> {
        match version_tag(wire) {
            3 => Ok(decode_v3_body(wire)),
            found => Err(DecodeError::UnsupportedVersion {
                found,
                expected: "3",
            }),
        }
    }
}

impl VersionedStory {
    /// Classifies and decodes a wire map.
    pub fn from_wire(wire: &WireValue, legacy: LegacyPolicy) -> Result<Self, DecodeError> {
        let version = classify(wire);
        debug!(?version, ?legacy, "dispatching story");
        match (version, legacy) {
            (Version::V3, _) => Ok(VersionedStory::V3(decode_v3_body(wire))),
            (_, LegacyPolicy::Accept) => Self::from_legacy_wire(wire),
            (_, LegacyPolicy::Reject) => Err(DecodeError::UnsupportedVersion {
                found: version_tag(wire),
                expected: "3",
            }),
        }
    }

    /// Decodes a V1 or V2 wire map.
    pub fn from_legacy_wire(wire: &WireValue) -> Result<Self, DecodeError> {
        match classify(wire) {
            Version::V1 => Ok(VersionedStory::V1(decode_legacy_body(wire, Version::V1))),
            Version::V2 => Ok(VersionedStory::V2(decode_legacy_body(wire, Version::V2))),
            Version::V3 => Err(DecodeError::UnsupportedVersion {
                found: version_tag(wire),
                expected: "1 or 2",
            }),
        }
    }
}
