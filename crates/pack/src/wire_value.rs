//! [`WireValue`], the dynamically-typed value produced by the binary decoder.

use wrapped_base64::to_base64;

/// A decoded, not-yet-trusted unit of a story payload.
///
/// Consumers must match on the variant before using a field; the typed
/// accessors below return `None` instead of coercing across shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// MessagePack nil: the producer's "absent" marker.
    Null,
    Bool(bool),
    /// Any integer that fits in i64.
    Integer(i64),
    /// Floats, and unsigned integers beyond i64::MAX.
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<WireValue>),
    /// Map with string keys, in wire order.
    Map(Vec<(String, WireValue)>),
}

impl WireValue {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Bool(_) => "bool",
            WireValue::Integer(_) => "integer",
            WireValue::Float(_) => "float",
            WireValue::Str(_) => "string",
            WireValue::Bytes(_) => "bytes",
            WireValue::Array(_) => "array",
            WireValue::Map(_) => "map",
        }
    }

    /// Looks up `key` in a map. A repeated key resolves to its last occurrence.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        match self {
            WireValue::Map(pairs) => pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of a numeric value. Finite floats truncate toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            WireValue::Integer(i) => Some(*i),
            WireValue::Float(f) if f.is_finite() && f.abs() < 9.2e18 => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Integer view that never rounds: a float counts only when it has no
    /// fractional part.
    pub fn as_exact_i64(&self) -> Option<i64> {
        match self {
            WireValue::Integer(i) => Some(*i),
            WireValue::Float(f) if f.fract() == 0.0 && f.abs() < 9.2e18 => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            WireValue::Integer(i) => Some(*i as f64),
            WireValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, WireValue)]> {
        match self {
            WireValue::Map(pairs) => Some(pairs),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for WireValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => WireValue::Null,
            serde_json::Value::Bool(b) => WireValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => WireValue::Integer(i),
                None => WireValue::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => WireValue::Str(s),
            serde_json::Value::Array(arr) => {
                WireValue::Array(arr.into_iter().map(WireValue::from).collect())
            }
            serde_json::Value::Object(obj) => WireValue::Map(
                obj.into_iter()
                    .map(|(k, v)| (k, WireValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<WireValue> for serde_json::Value {
    fn from(v: WireValue) -> Self {
        match v {
            WireValue::Null => serde_json::Value::Null,
            WireValue::Bool(b) => serde_json::Value::Bool(b),
            WireValue::Integer(i) => serde_json::json!(i),
            WireValue::Float(f) => serde_json::json!(f),
            WireValue::Bytes(b) => serde_json::Value::String(format!(
                "data:application/octet-stream;base64,{}",
                to_base64(&b)
            )),
            WireValue::Str(s) => serde_json::Value::String(s),
            WireValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            WireValue::Map(pairs) => serde_json::Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
