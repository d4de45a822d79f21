//! Positional-tuple records.
//!
//! To keep links short, most list entries travel as fixed-position arrays
//! instead of maps. Older or alternate producers emit the same entries as
//! maps keyed by the record's field names. A [`CompactRecord`] knows both
//! shapes; [`CompactRecord::from_wire`] picks one per entry.
//!
//! Decoding never fails: short tuples, wrong types and foreign shapes fall
//! back to per-field defaults, and one bad entry never affects its siblings.

use tracing::{debug, warn};
use wrapped_pack::WireValue;

use crate::model::{
    LegacyProject, Project, ProjectLink, SessionFingerprint, Streaks, TimelineEvent,
};
use crate::quantized::Quantized;

/// Wire value reserved for "not present" in signed integer slots.
pub(crate) const ABSENT: i64 = -1;

pub trait CompactRecord: Sized {
    /// Builds the record from a positional tuple. Missing trailing slots
    /// take their defaults, down to an empty tuple.
    fn from_tuple(items: &[WireValue]) -> Self;

    /// Builds the record from a map keyed by the record's field names.
    fn from_fields(map: &WireValue) -> Self;

    fn from_wire(value: &WireValue) -> Self {
        match value {
            WireValue::Array(items) => Self::from_tuple(items),
            WireValue::Map(_) => Self::from_fields(value),
            other => {
                warn!(kind = other.kind(), "compact record is neither tuple nor map");
                Self::from_tuple(&[])
            }
        }
    }
}

/// Decodes every entry of a list field independently.
///
/// An absent or null field is an empty list; any other non-array shape is
/// logged and treated as empty.
pub fn decode_list<T: CompactRecord>(field: &str, value: Option<&WireValue>) -> Vec<T> {
    match value {
        None | Some(WireValue::Null) => Vec::new(),
        Some(WireValue::Array(items)) => {
            debug!(field, count = items.len(), "decoding compact list");
            items.iter().map(T::from_wire).collect()
        }
        Some(other) => {
            warn!(field, kind = other.kind(), "expected a list");
            Vec::new()
        }
    }
}

pub(crate) fn int(value: Option<&WireValue>) -> i64 {
    value.and_then(WireValue::as_i64).unwrap_or(0)
}

pub(crate) fn float(value: Option<&WireValue>) -> f64 {
    value.and_then(WireValue::as_f64).unwrap_or(0.0)
}

pub(crate) fn text(value: Option<&WireValue>) -> String {
    value
        .and_then(WireValue::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Integer field whose exact value matters (year, message count, version
/// tag). Fractional numbers are dropped rather than truncated.
pub(crate) fn exact_int(field: &str, value: Option<&WireValue>) -> Option<i64> {
    let value = value?;
    let exact = value.as_exact_i64();
    if exact.is_none() && value.as_f64().is_some() {
        warn!(field, "discarding non-integral number");
    }
    exact
}

/// Integer slot honouring the [`ABSENT`] sentinel; a missing slot is absent too.
pub(crate) fn optional_int(value: Option<&WireValue>) -> Option<i64> {
    value.and_then(WireValue::as_i64).filter(|v| *v != ABSENT)
}

/// Index slot: the sentinel and any other negative value mean "no index".
pub(crate) fn optional_index(value: Option<&WireValue>) -> Option<usize> {
    optional_int(value).and_then(|v| usize::try_from(v).ok())
}

fn index_or_zero(value: Option<&WireValue>) -> usize {
    optional_index(value).unwrap_or(0)
}

fn is_agent(value: Option<&WireValue>) -> bool {
    matches!(value, Some(WireValue::Integer(1)))
}

impl CompactRecord for LegacyProject {
    fn from_tuple(items: &[WireValue]) -> Self {
        LegacyProject {
            name: text(items.first()),
            messages: int(items.get(1)),
            days: int(items.get(2)),
        }
    }

    fn from_fields(map: &WireValue) -> Self {
        LegacyProject {
            name: text(map.get("name")),
            messages: int(map.get("messages")),
            days: int(map.get("days")),
        }
    }
}

impl CompactRecord for Project {
    /// `[name, messages, hours, days, sessions, agent_ratio]`
    fn from_tuple(items: &[WireValue]) -> Self {
        Project {
            name: text(items.first()),
            messages: int(items.get(1)),
            hours: float(items.get(2)),
            days: int(items.get(3)),
            sessions: int(items.get(4)),
            agent_ratio: Quantized::from_wire(items.get(5)),
        }
    }

    fn from_fields(map: &WireValue) -> Self {
        Project {
            name: text(map.get("name")),
            messages: int(map.get("messages")),
            hours: float(map.get("hours")),
            days: int(map.get("days")),
            sessions: int(map.get("sessions")),
            agent_ratio: Quantized::from_wire(map.get("agent_ratio")),
        }
    }
}

impl CompactRecord for ProjectLink {
    /// `[project_a, project_b, shared_days]`
    fn from_tuple(items: &[WireValue]) -> Self {
        ProjectLink {
            project_a: index_or_zero(items.first()),
            project_b: index_or_zero(items.get(1)),
            shared_days: int(items.get(2)),
        }
    }

    fn from_fields(map: &WireValue) -> Self {
        ProjectLink {
            project_a: index_or_zero(map.get("project_a")),
            project_b: index_or_zero(map.get("project_b")),
            shared_days: int(map.get("shared_days")),
        }
    }
}

impl CompactRecord for TimelineEvent {
    /// `[day, type, value, project_index]`, `-1` marking an absent value or index.
    fn from_tuple(items: &[WireValue]) -> Self {
        TimelineEvent {
            day: int(items.first()),
            kind: int(items.get(1)),
            value: optional_int(items.get(2)),
            project_index: optional_index(items.get(3)),
        }
    }

    fn from_fields(map: &WireValue) -> Self {
        TimelineEvent {
            day: int(map.get("day")),
            kind: int(map.get("type")),
            value: optional_int(map.get("value")),
            project_index: optional_index(map.get("project_index")),
        }
    }
}

const FINGERPRINT_START: usize = 6;

fn fingerprint_vector(values: &[WireValue]) -> [Quantized; 8] {
    let mut vector = [Quantized::default(); 8];
    for (slot, value) in vector.iter_mut().zip(values) {
        *slot = Quantized::from_wire(Some(value));
    }
    vector
}

impl CompactRecord for SessionFingerprint {
    /// `[duration, messages, is_agent, hour, weekday, project_index, fp0..fp7]`
    ///
    /// The vector is whatever follows slot 5: padded with zeros when short,
    /// cut to eight when long.
    fn from_tuple(items: &[WireValue]) -> Self {
        SessionFingerprint {
            duration: int(items.first()),
            messages: int(items.get(1)),
            is_agent: is_agent(items.get(2)),
            hour: int(items.get(3)),
            weekday: int(items.get(4)),
            project_index: optional_index(items.get(5)),
            fingerprint: fingerprint_vector(items.get(FINGERPRINT_START..).unwrap_or(&[])),
        }
    }

    fn from_fields(map: &WireValue) -> Self {
        SessionFingerprint {
            duration: int(map.get("duration")),
            messages: int(map.get("messages")),
            is_agent: is_agent(map.get("is_agent")),
            hour: int(map.get("hour")),
            weekday: int(map.get("weekday")),
            project_index: optional_index(map.get("project_index")),
            fingerprint: fingerprint_vector(
                map.get("fingerprint")
                    .and_then(WireValue::as_array)
                    .unwrap_or(&[]),
            ),
        }
    }
}

impl CompactRecord for Streaks {
    /// `[longest, current, longest_gap, weekend_days]`
    fn from_tuple(items: &[WireValue]) -> Self {
        Streaks {
            longest: int(items.first()),
            current: int(items.get(1)),
            longest_gap: int(items.get(2)),
            weekend_days: int(items.get(3)),
        }
    }

    fn from_fields(map: &WireValue) -> Self {
        Streaks {
            longest: int(map.get("longest")),
            current: int(map.get("current")),
            longest_gap: int(map.get("longest_gap")),
            weekend_days: int(map.get("weekend_days")),
        }
    }
}
