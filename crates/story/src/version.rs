//! Version tag handling.

use serde::Serialize;
use wrapped_pack::WireValue;

use crate::compact::exact_int;

/// Wire generation a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Version {
    /// Plain string labels.
    V1 = 1,
    /// Labels as dictionary indices.
    V2 = 2,
    /// Dense arrays, RLE heatmap, compact tuples.
    V3 = 3,
}

/// Raw version tag of a wire map. Absent, non-numeric and non-integral tags
/// read as 1.
pub fn version_tag(wire: &WireValue) -> i64 {
    exact_int("v", wire.get("v")).unwrap_or(1)
}

/// Routes a wire map to a decoder family.
///
/// Tags above 3 are treated as V3; the V3 decoder keeps the raw tag so the
/// validator can reject fields it does not understand.
pub fn classify(wire: &WireValue) -> Version {
    match version_tag(wire) {
        tag if tag >= 3 => Version::V3,
        2 => Version::V2,
        _ => Version::V1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify_json(value: serde_json::Value) -> Version {
        classify(&WireValue::from(value))
    }

    #[test]
    fn absent_tag_is_v1() {
        assert_eq!(classify_json(json!({"y": 2024})), Version::V1);
        assert_eq!(version_tag(&WireValue::from(json!({}))), 1);
    }

    #[test]
    fn explicit_tags() {
        assert_eq!(classify_json(json!({"v": 1})), Version::V1);
        assert_eq!(classify_json(json!({"v": 2})), Version::V2);
        assert_eq!(classify_json(json!({"v": 3})), Version::V3);
    }

    #[test]
    fn newer_tags_route_to_v3() {
        assert_eq!(classify_json(json!({"v": 4})), Version::V3);
        assert_eq!(classify_json(json!({"v": 99})), Version::V3);
        assert_eq!(version_tag(&WireValue::from(json!({"v": 4}))), 4);
    }

    #[test]
    fn odd_tags_fall_back_to_v1() {
        assert_eq!(classify_json(json!({"v": "3"})), Version::V1);
        assert_eq!(classify_json(json!({"v": 0})), Version::V1);
        assert_eq!(classify_json(json!({"v": null})), Version::V1);
        assert_eq!(classify_json(json!({"v": 3.9})), Version::V1);
        assert_eq!(version_tag(&WireValue::from(json!({"v": 3.0}))), 3);
    }
}
