use serde::Serialize;
use wrapped_pack::WireValue;

/// A ratio carried on the wire as an integer percentage.
///
/// The stored value is always within `0..=100`; [`Quantized::fraction`] is
/// the normalized view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantized(u8);

impl Quantized {
    pub const MAX: Quantized = Quantized(100);

    /// Clamps into `0..=100`.
    pub fn new(value: i64) -> Self {
        Quantized(value.clamp(0, 100) as u8)
    }

    /// Reads a wire slot; absent or non-numeric values become 0.
    pub fn from_wire(value: Option<&WireValue>) -> Self {
        value
            .and_then(WireValue::as_i64)
            .map(Quantized::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}
