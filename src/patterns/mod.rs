// src/patterns/mod.rs
use crate::types::{Candle, Zone};
use serde_json::Value;

// Trait for pattern recognizers
pub trait PatternRecognizer {
    fn name(&self) -> &'static str;
    fn detect(&self, candles: &[Candle], zone: &Zone) -> Value; // Return a single JSON object
}

// Declare submodules
pub mod inducement;
pub mod liquidity_pools;
pub mod swing_points;

// Export recognizers
pub use inducement::{detect_inducement, InducementOptions, InducementRecognizer};
pub use liquidity_pools::{
    detect_liquidity_pools, detect_liquidity_pools_with, LiquidityPoolRecognizer,
    DEFAULT_POOL_LOOKBACK,
};
pub use swing_points::{
    find_swing_highs, find_swing_lows, FractalSwingExtractor, SwingPointExtractor,
    DEFAULT_SWING_SENSITIVITY,
};

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Percentage of `part` in `whole`. Callers guarantee `whole != 0`.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    part / whole * 100.0
}
