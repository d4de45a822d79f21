//! V1 and V2 story decoding.
//!
//! Both generations share one layout. V1 carries label text; V2 carries
//! indices into [`crate::dictionary`] tables which are resolved here, before
//! the record exists.

use tracing::debug;
use wrapped_pack::WireValue;

use crate::compact::{decode_list, exact_int, float, int, text};
use crate::dictionary::{render, resolve, COLLABORATION_STYLES, TRAIT_LABELS, WORK_PACES};
use crate::model::LegacyStory;
use crate::v3::fixed_ints;
use crate::version::{version_tag, Version};

fn label(version: Version, dictionary: &[&str], raw: Option<&WireValue>) -> String {
    match (version, raw) {
        (_, None) => String::new(),
        (Version::V2, Some(raw)) => resolve(dictionary, raw),
        (_, Some(raw)) => render(raw),
    }
}

fn labels(version: Version, dictionary: &[&str], raw: Option<&WireValue>) -> Vec<String> {
    raw.and_then(WireValue::as_array)
        .unwrap_or(&[])
        .iter()
        .map(|item| label(version, dictionary, Some(item)))
        .collect()
}

/// Decodes a V1/V2 map. The caller has already chosen `version`; the raw tag
/// is kept on the record for the validator.
pub(crate) fn decode_legacy_body(wire: &WireValue, version: Version) -> LegacyStory {
    debug!(?version, "decoding legacy story");
    LegacyStory {
        version: version_tag(wire),
        year: exact_int("y", wire.get("y")),
        name: wire.get("n").and_then(WireValue::as_str).map(str::to_owned),
        projects: int(wire.get("p")),
        sessions: int(wire.get("s")),
        messages: exact_int("m", wire.get("m")),
        hours: float(wire.get("h")),
        days: int(wire.get("d")),
        traits: labels(version, TRAIT_LABELS, wire.get("t")),
        collaboration_style: label(version, COLLABORATION_STYLES, wire.get("c")),
        work_pace: label(version, WORK_PACES, wire.get("w")),
        peak_project: text(wire.get("pp")),
        peak_project_messages: int(wire.get("pm")),
        max_concurrent: int(wire.get("ci")),
        longest_session_hours: float(wire.get("ls")),
        monthly_activity: fixed_ints("ma", wire.get("ma")),
        top_projects: decode_list("tp", wire.get("tp")),
    }
}
