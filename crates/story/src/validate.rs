//! Structural checks run after decoding.
//!
//! Only the fields every renderer depends on are checked. Everything else is
//! decoded permissively and absent data renders as "no data".

use chrono::{Datelike, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::model::{VersionedStory, HEATMAP_LEN};

/// First year stories were produced.
pub const MIN_YEAR: i64 = 2024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported version: expected {expected}, found {found}")]
    VersionMismatch { expected: i64, found: i64 },
    #[error("Invalid year: missing or not a whole number")]
    MissingYear,
    #[error("Invalid year: {year} is outside {min}..={max}", min = MIN_YEAR)]
    YearOutOfRange { year: i64, max: i64 },
    #[error("Invalid message count: missing or not a whole number")]
    MissingMessages,
    #[error("Invalid message count: {0}")]
    NegativeMessages(i64),
    #[error("Invalid heatmap: expected {expected} cells, found {0}", expected = HEATMAP_LEN)]
    HeatmapSize(usize),
}

/// Result of [`validate`]. Invalid records are data, not errors; callers
/// decide how to surface them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_message"
    )]
    pub error: Option<ValidationError>,
}

fn serialize_message<S: Serializer>(
    error: &Option<ValidationError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(error) => serializer.collect_str(error),
        None => serializer.serialize_none(),
    }
}

impl ValidationOutcome {
    fn from_check(check: Result<(), ValidationError>) -> Self {
        match check {
            Ok(()) => ValidationOutcome {
                valid: true,
                error: None,
            },
            Err(error) => ValidationOutcome {
                valid: false,
                error: Some(error),
            },
        }
    }

    /// Human readable reason, if invalid.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Validates against the current UTC year.
pub fn validate(story: &VersionedStory) -> ValidationOutcome {
    validate_at(story, i64::from(Utc::now().year()))
}

/// Validates with an explicit "current" year. Checks run in order and the
/// first failure is reported.
pub fn validate_at(story: &VersionedStory, current_year: i64) -> ValidationOutcome {
    ValidationOutcome::from_check(check(story, current_year))
}

fn check(story: &VersionedStory, current_year: i64) -> Result<(), ValidationError> {
    let expected = match story {
        VersionedStory::V1(_) => 1,
        VersionedStory::V2(_) => 2,
        VersionedStory::V3(_) => 3,
    };
    let found = story.version_tag();
    if found != expected {
        return Err(ValidationError::VersionMismatch { expected, found });
    }

    let year = story.year().ok_or(ValidationError::MissingYear)?;
    let max = current_year + 1;
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(ValidationError::YearOutOfRange { year, max });
    }

    let messages = story.messages().ok_or(ValidationError::MissingMessages)?;
    if messages < 0 {
        return Err(ValidationError::NegativeMessages(messages));
    }

    if let VersionedStory::V3(v3) = story {
        if v3.heatmap.len() != HEATMAP_LEN {
            return Err(ValidationError::HeatmapSize(v3.heatmap.len()));
        }
    }

    Ok(())
}
