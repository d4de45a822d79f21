//! V3 story decoding.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use wrapped_pack::WireValue;

use crate::compact::{decode_list, exact_int, float, int, CompactRecord};
use crate::model::{
    Streaks, StoryV3, TokenUsage, TraitKind, TraitScores, YearOverYear, HEATMAP_LEN,
};
use crate::quantized::Quantized;
use crate::rle::rle_expand_capped;
use crate::version::version_tag;

/// Integer series padded with zeros or cut to `N` entries.
pub(crate) fn fixed_ints<const N: usize>(field: &str, value: Option<&WireValue>) -> [i64; N] {
    let mut out = [0; N];
    let items = series(field, value);
    if items.len() > N {
        warn!(field, len = items.len(), expected = N, "series truncated");
    }
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = int(Some(item));
    }
    out
}

fn fixed_floats<const N: usize>(field: &str, value: Option<&WireValue>) -> [f64; N] {
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(series(field, value)) {
        *slot = float(Some(item));
    }
    out
}

fn series<'a>(field: &str, value: Option<&'a WireValue>) -> &'a [WireValue] {
    match value {
        None | Some(WireValue::Null) => &[],
        Some(WireValue::Array(items)) => items,
        Some(other) => {
            warn!(field, kind = other.kind(), "expected a series");
            &[]
        }
    }
}

/// Heatmap cells, expanded when `hm_rle` is set. The length is left as
/// decoded; anything but [`HEATMAP_LEN`] is for the validator to reject.
fn heatmap(wire: &WireValue) -> Vec<i64> {
    let cells: Vec<i64> = series("hm", wire.get("hm"))
        .iter()
        .map(|cell| int(Some(cell)))
        .collect();
    match wire.get("hm_rle") {
        Some(WireValue::Bool(true)) => {
            // One past the valid length is enough to make an oversized
            // expansion visible.
            let expanded = rle_expand_capped(&cells, HEATMAP_LEN + 1);
            debug!(pairs = cells.len() / 2, cells = expanded.len(), "expanded RLE heatmap");
            expanded
        }
        _ => cells,
    }
}

fn trait_scores(value: Option<&WireValue>) -> TraitScores {
    let mut scores = TraitScores::default();
    let map = match value {
        Some(map) if matches!(map, WireValue::Map(_)) => map,
        Some(other) => {
            warn!(kind = other.kind(), "trait scores are not a map");
            return scores;
        }
        None => return scores,
    };
    for kind in TraitKind::ALL {
        let raw = map.get(kind.wire_key()).or_else(|| map.get(kind.name()));
        scores.set(kind, Quantized::from_wire(raw));
    }
    scores
}

fn token_usage(value: Option<&WireValue>) -> Option<TokenUsage> {
    let map = value.filter(|v| matches!(v, WireValue::Map(_)))?;
    let mut models = BTreeMap::new();
    for (model, count) in map.get("models").and_then(WireValue::as_map).unwrap_or(&[]) {
        match count.as_i64() {
            Some(count) => {
                models.insert(model.clone(), count);
            }
            None => warn!(model = model.as_str(), "token count is not numeric"),
        }
    }
    Some(TokenUsage {
        total: int(map.get("total")),
        input: int(map.get("input")),
        output: int(map.get("output")),
        cache_read: int(map.get("cache_read")),
        cache_create: int(map.get("cache_create")),
        models,
    })
}

fn year_over_year(value: Option<&WireValue>) -> Option<YearOverYear> {
    let map = value.filter(|v| matches!(v, WireValue::Map(_)))?;
    Some(YearOverYear {
        year: exact_int("yoy.y", map.get("y")),
        messages: int(map.get("m")),
        hours: float(map.get("h")),
        sessions: int(map.get("s")),
        projects: int(map.get("p")),
        days: int(map.get("d")),
    })
}

/// Decodes a V3 map without checking its version tag.
pub(crate) fn decode_v3_body(wire: &WireValue) -> StoryV3 {
    let version = version_tag(wire);
    debug!(version, "decoding v3 story");
    let story = StoryV3 {
        version,
        year: exact_int("y", wire.get("y")),
        name: wire.get("n").and_then(WireValue::as_str).map(str::to_owned),
        projects: int(wire.get("p")),
        sessions: int(wire.get("s")),
        messages: exact_int("m", wire.get("m")),
        hours: float(wire.get("h")),
        days: int(wire.get("d")),
        heatmap: heatmap(wire),
        monthly_activity: fixed_ints("ma", wire.get("ma")),
        monthly_hours: fixed_floats("mh", wire.get("mh")),
        monthly_sessions: fixed_ints("ms", wire.get("ms")),
        session_durations: fixed_ints("sd", wire.get("sd")),
        agent_ratios: fixed_ints("ar", wire.get("ar")),
        message_lengths: fixed_ints("ml", wire.get("ml")),
        trait_scores: trait_scores(wire.get("ts")),
        top_projects: decode_list("tp", wire.get("tp")),
        co_occurrence: decode_list("pc", wire.get("pc")),
        timeline: decode_list("te", wire.get("te")),
        fingerprints: decode_list("sf", wire.get("sf")),
        longest_session_hours: float(wire.get("ls")),
        streaks: wire.get("sk").map(Streaks::from_wire).unwrap_or_default(),
        tokens: token_usage(wire.get("tk")),
        year_over_year: year_over_year(wire.get("yoy")),
    };
    debug!(
        projects = story.top_projects.len(),
        events = story.timeline.len(),
        fingerprints = story.fingerprints.len(),
        "decoded v3 story"
    );
    story
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> StoryV3 {
        decode_v3_body(&WireValue::from(value))
    }

    #[test]
    fn dense_heatmap_is_kept() {
        let cells: Vec<i64> = (0..168).collect();
        let story = decode(json!({"v": 3, "hm": cells}));
        assert_eq!(story.heatmap.len(), HEATMAP_LEN);
        assert_eq!(story.heatmap[167], 167);
    }

    #[test]
    fn rle_heatmap_is_expanded() {
        let story = decode(json!({"v": 3, "hm": [0, 100, 4, 8, 0, 60], "hm_rle": true}));
        assert_eq!(story.heatmap.len(), HEATMAP_LEN);
        assert_eq!(story.heatmap[100], 4);
        assert_eq!(story.heatmap[108], 0);
    }

    #[test]
    fn rle_flag_must_be_boolean() {
        let story = decode(json!({"v": 3, "hm": [0, 168], "hm_rle": 1}));
        assert_eq!(story.heatmap, vec![0, 168]);
    }

    #[test]
    fn oversized_rle_expansion_stops_past_valid_length() {
        let story = decode(json!({"v": 3, "hm": [1, 1_000_000_000], "hm_rle": true}));
        assert_eq!(story.heatmap.len(), HEATMAP_LEN + 1);
    }

    #[test]
    fn short_heatmap_is_not_padded() {
        let story = decode(json!({"v": 3, "hm": [1, 2, 3]}));
        assert_eq!(story.heatmap, vec![1, 2, 3]);
    }

    #[test]
    fn fixed_series_pad_and_truncate() {
        let story = decode(json!({
            "v": 3,
            "ma": [1, 2, 3],
            "sd": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 99, 99],
            "mh": [1.5, "x"],
            "ml": "oops"
        }));
        assert_eq!(story.monthly_activity, [1, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(story.session_durations, [1; 10]);
        assert_eq!(story.monthly_hours[0], 1.5);
        assert_eq!(story.monthly_hours[1], 0.0);
        assert_eq!(story.message_lengths, [0; 8]);
    }

    #[test]
    fn trait_scores_short_and_long_keys() {
        let story = decode(json!({
            "v": 3,
            "ts": {"dl": 80, "night_owl": 95, "bu": 140, "cs": -3}
        }));
        assert_eq!(story.trait_scores.delegation.get(), 80);
        assert_eq!(story.trait_scores.night_owl.get(), 95);
        assert_eq!(story.trait_scores.burstiness.get(), 100);
        assert_eq!(story.trait_scores.consistency.get(), 0);
        assert_eq!(story.trait_scores.planning.get(), 0);
    }

    #[test]
    fn tokens_and_year_over_year() {
        let story = decode(json!({
            "v": 3,
            "tk": {
                "total": 5_000_000_000_i64, "input": 1000, "output": 2000,
                "cache_read": 3000, "cache_create": 4000,
                "models": {"opus": 4_000_000_000_i64, "haiku": "n/a"}
            },
            "yoy": {"y": 2024, "m": 800, "h": 120.5}
        }));
        let tokens = story.tokens.expect("tokens");
        assert_eq!(tokens.total, 5_000_000_000);
        assert_eq!(tokens.models.get("opus"), Some(&4_000_000_000));
        assert!(!tokens.models.contains_key("haiku"));
        let yoy = story.year_over_year.expect("yoy");
        assert_eq!(yoy.year, Some(2024));
        assert_eq!(yoy.messages, 800);
        assert_eq!(yoy.sessions, 0);
    }

    #[test]
    fn optional_sections_absent() {
        let story = decode(json!({"v": 3, "tk": [1, 2], "yoy": null}));
        assert_eq!(story.tokens, None);
        assert_eq!(story.year_over_year, None);
        assert_eq!(story.streaks, Streaks::default());
        assert!(story.top_projects.is_empty());
    }
}
