//! Fixed label tables shared with the story producer.
//!
//! V2 payloads carry indices into these tables instead of the labels
//! themselves, so entries and their order must stay byte-identical to the
//! producer's copy. Every table has a recorded fingerprint; changing a table
//! without changing the producer changes the meaning of every V2 link already
//! handed out.

use thiserror::Error;
use tracing::warn;
use wrapped_pack::WireValue;

/// Trait labels addressed by V2 `t` indices.
pub const TRAIT_LABELS: &[&str] = &[
    "Night Owl",
    "Early Bird",
    "Marathoner",
    "Sprinter",
    "Polyglot",
    "Specialist",
    "Delegator",
    "Hands-On",
    "Explorer",
    "Finisher",
    "Weekend Warrior",
    "Consistent",
];

/// Collaboration styles addressed by V2 `c` indices.
pub const COLLABORATION_STYLES: &[&str] = &["Pair Programmer", "Delegator", "Architect", "Explorer"];

/// Work paces addressed by V2 `w` indices.
pub const WORK_PACES: &[&str] = &["Steady", "Burst", "Marathon", "Sprint"];

/// Timeline event kinds addressed by the V3 event `type` slot.
pub const EVENT_KINDS: &[&str] = &[
    "first_session",
    "new_project",
    "peak_day",
    "longest_session",
    "streak_record",
    "milestone",
    "agent_first",
    "late_night",
];

pub const TRAIT_LABELS_FINGERPRINT: u32 = 0xfa37_b916;
pub const COLLABORATION_STYLES_FINGERPRINT: u32 = 0xa861_7abd;
pub const WORK_PACES_FINGERPRINT: u32 = 0xbcb7_9ada;
pub const EVENT_KINDS_FINGERPRINT: u32 = 0x87ec_3fa4;

const START_STATE: u32 = 5381;
const STRING_CONST: u32 = 982_453_601;

#[inline]
fn update_num(state: u32, num: u32) -> u32 {
    state.wrapping_shl(5).wrapping_add(state).wrapping_add(num)
}

/// Mixes a string in UTF-16 code units, last unit first.
fn update_str(mut state: u32, s: &str) -> u32 {
    let utf16: Vec<u16> = s.encode_utf16().collect();
    state = update_num(state, STRING_CONST);
    state = update_num(state, utf16.len() as u32);
    for &code_unit in utf16.iter().rev() {
        state = update_num(state, u32::from(code_unit));
    }
    state
}

/// Order-sensitive 32-bit fingerprint of a label table.
pub fn fingerprint(entries: &[&str]) -> u32 {
    entries
        .iter()
        .fold(update_num(START_STATE, entries.len() as u32), |state, entry| {
            update_str(state, entry)
        })
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("dictionary {name} drifted: fingerprint {actual:#010x}, recorded {expected:#010x}")]
pub struct DictionaryDrift {
    pub name: &'static str,
    pub expected: u32,
    pub actual: u32,
}

/// Checks every table against its recorded fingerprint.
pub fn verify_dictionaries() -> Result<(), DictionaryDrift> {
    let tables: [(&'static str, &[&str], u32); 4] = [
        ("TRAIT_LABELS", TRAIT_LABELS, TRAIT_LABELS_FINGERPRINT),
        (
            "COLLABORATION_STYLES",
            COLLABORATION_STYLES,
            COLLABORATION_STYLES_FINGERPRINT,
        ),
        ("WORK_PACES", WORK_PACES, WORK_PACES_FINGERPRINT),
        ("EVENT_KINDS", EVENT_KINDS, EVENT_KINDS_FINGERPRINT),
    ];
    for (name, entries, expected) in tables {
        let actual = fingerprint(entries);
        if actual != expected {
            return Err(DictionaryDrift {
                name,
                expected,
                actual,
            });
        }
    }
    Ok(())
}

/// Renders a raw wire value as label text: strings pass through, numbers
/// and booleans print in decimal/literal form.
pub fn render(raw: &WireValue) -> String {
    match raw {
        WireValue::Str(s) => s.clone(),
        WireValue::Integer(i) => i.to_string(),
        WireValue::Float(f) => f.to_string(),
        WireValue::Bool(b) => b.to_string(),
        WireValue::Null => "null".to_owned(),
        WireValue::Bytes(_) | WireValue::Array(_) | WireValue::Map(_) => {
            format!("[{}]", raw.kind())
        }
    }
}

/// Resolves a dictionary index.
///
/// An in-range integer index yields the entry. Anything else falls back to
/// [`render`] of the raw value, so an out-of-range index `7` becomes `"7"`
/// and a label that already arrived as a string is returned unchanged.
pub fn resolve(dictionary: &[&str], raw: &WireValue) -> String {
    if let WireValue::Integer(index) = raw {
        if let Some(label) = usize::try_from(*index)
            .ok()
            .and_then(|i| dictionary.get(i))
        {
            return (*label).to_owned();
        }
        warn!(index, size = dictionary.len(), "dictionary index out of range");
    }
    render(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionaries_match_recorded_fingerprints() {
        assert_eq!(fingerprint(TRAIT_LABELS), TRAIT_LABELS_FINGERPRINT);
        assert_eq!(
            fingerprint(COLLABORATION_STYLES),
            COLLABORATION_STYLES_FINGERPRINT
        );
        assert_eq!(fingerprint(WORK_PACES), WORK_PACES_FINGERPRINT);
        assert_eq!(fingerprint(EVENT_KINDS), EVENT_KINDS_FINGERPRINT);
        assert_eq!(verify_dictionaries(), Ok(()));
    }

    #[test]
    fn fingerprint_is_order_sensitive() {
        let reordered = ["Pair Programmer", "Architect", "Delegator", "Explorer"];
        assert_ne!(fingerprint(&reordered), COLLABORATION_STYLES_FINGERPRINT);
        assert_ne!(fingerprint(&COLLABORATION_STYLES[..3]), COLLABORATION_STYLES_FINGERPRINT);
    }

    #[test]
    fn resolves_in_range_indices() {
        assert_eq!(resolve(COLLABORATION_STYLES, &WireValue::Integer(0)), "Pair Programmer");
        assert_eq!(resolve(WORK_PACES, &WireValue::Integer(3)), "Sprint");
        assert_eq!(resolve(TRAIT_LABELS, &WireValue::Integer(11)), "Consistent");
    }

    #[test]
    fn out_of_range_falls_back_to_raw_text() {
        assert_eq!(resolve(COLLABORATION_STYLES, &WireValue::Integer(7)), "7");
        assert_eq!(resolve(COLLABORATION_STYLES, &WireValue::Integer(4)), "4");
        assert_eq!(resolve(COLLABORATION_STYLES, &WireValue::Integer(-1)), "-1");
        assert_eq!(resolve(WORK_PACES, &WireValue::Float(1.5)), "1.5");
    }

    #[test]
    fn strings_pass_through() {
        assert_eq!(
            resolve(COLLABORATION_STYLES, &WireValue::Str("Architect".into())),
            "Architect"
        );
        assert_eq!(resolve(&[], &WireValue::Str("2".into())), "2");
    }
}
