#![allow(dead_code)]

use serde_json::{json, Value};
use wrapped_base64::to_base64_url;
use wrapped_pack::{encode, WireValue};

/// Builds a token exactly as the client does: MessagePack, then unpadded
/// URL-safe base64.
pub fn token(value: Value) -> String {
    to_base64_url(&encode(&WireValue::from(value)))
}

pub fn dense_heatmap() -> Vec<i64> {
    (0..168).map(|i| (i % 24) * (i / 24)).collect()
}

/// A complete V3 payload covering every field.
pub fn v3_payload() -> Value {
    json!({
        "v": 3,
        "y": 2025,
        "n": "Ada",
        "p": 14,
        "s": 320,
        "m": 18_450,
        "h": 412.5,
        "d": 201,
        "hm": dense_heatmap(),
        "ma": [100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200],
        "mh": [1.5, 2.0, 3.25, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0],
        "ms": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        "sd": [5, 10, 20, 30, 25, 15, 8, 4, 2, 1],
        "ar": [50, 20, 10, 5, 5, 3, 3, 2, 1, 1],
        "ml": [100, 80, 60, 40, 20, 10, 5, 1],
        "ts": {
            "dl": 72, "dw": 64, "br": 88, "no": 91, "cx": 35,
            "ag": 55, "it": 48, "pl": 20, "cs": 77, "bu": 12
        },
        "tp": [
            ["api-server", 6200, 140.5, 98, 120, 40],
            ["web", 4100, 90.0, 70, 80, 10],
            ["infra", 900, 12.25, 15, 20, 85]
        ],
        "pc": [[0, 1, 42], [0, 2, 9]],
        "te": [[0, 0, -1, 0], [50, 2, 150, -1], [120, 5, 10_000, -1]],
        "sf": [
            [95, 60, 1, 23, 5, 0, 90, 80, 70, 60, 50, 40, 30, 20],
            [20, 12, 0, 9, 2, -1, 10, 20, 30, 40, 50, 60, 70, 80]
        ],
        "ls": 6.75,
        "sk": [21, 4, 9, 30],
        "tk": {
            "total": 9_000_000_000_i64,
            "input": 1_000_000,
            "output": 2_000_000,
            "cache_read": 5_000_000_000_i64,
            "cache_create": 3_997_000_000_i64,
            "models": {"opus": 6_000_000_000_i64, "sonnet": 3_000_000_000_i64}
        },
        "yoy": {"y": 2024, "m": 12_000, "h": 300.0, "s": 250, "p": 10, "d": 150}
    })
}

pub fn v2_payload() -> Value {
    json!({
        "v": 2,
        "y": 2024,
        "n": "Grace",
        "p": 6,
        "s": 90,
        "m": 4200,
        "h": 120.0,
        "d": 80,
        "t": [0, 4, 6],
        "c": 2,
        "w": 1,
        "pp": "compiler",
        "pm": 2100,
        "ci": 3,
        "ls": 4.5,
        "ma": [0, 0, 0, 0, 0, 100, 400, 800, 900, 1000, 600, 400],
        "tp": [["compiler", 2100, 40], {"name": "docs", "messages": 300, "days": 12}]
    })
}

pub fn v1_payload() -> Value {
    json!({
        "y": 2024,
        "m": 1500,
        "t": ["Night Owl", "Explorer"],
        "c": "Delegator",
        "w": "Steady",
        "pp": "scripts",
        "pm": 700,
        "ma": [1, 2, 3],
        "tp": [["scripts", 700, 30]]
    })
}
