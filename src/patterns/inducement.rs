// src/patterns/inducement.rs
// Inducement (stop hunt) detection: a candle that wicks through the zone
// boundary, grabs the stops resting there, and closes back inside.
use crate::patterns::{percent_of, round_to, PatternRecognizer};
use crate::types::{Candle, InducementQuality, InducementResult, InducementType, Zone, ZoneType};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_LOOKBACK: usize = 20;
pub const DEFAULT_MIN_WICK_PERCENT: f64 = 50.0;
pub const DEFAULT_MAX_BODY_PERCENT: f64 = 30.0;

/// Candles inspected after the sweep for a reversal.
const REVERSAL_CANDLES: usize = 2;

// Displayed verbatim by downstream consumers.
pub const BULLISH_IMPLICATION: &str =
    "Sell-side liquidity swept below the demand zone - stops were taken before a likely move higher";
pub const BULLISH_RECOMMENDATION: &str =
    "Look for long entries back inside the zone with invalidation below the sweep low";
pub const BEARISH_IMPLICATION: &str =
    "Buy-side liquidity swept above the supply zone - stops were taken before a likely move lower";
pub const BEARISH_RECOMMENDATION: &str =
    "Look for short entries back inside the zone with invalidation above the sweep high";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct InducementOptions {
    pub lookback: usize,
    pub min_wick_percent: f64,
    pub max_body_percent: f64,
}

impl Default for InducementOptions {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            min_wick_percent: DEFAULT_MIN_WICK_PERCENT,
            max_body_percent: DEFAULT_MAX_BODY_PERCENT,
        }
    }
}

/// Scans the last `options.lookback` candles, newest first, and returns the
/// first (most recent) candle that sweeps the zone boundary and closes back
/// inside with a dominant wick and a small body.
///
/// Returns `None` when there are fewer than `lookback` candles or when no
/// candle in the window qualifies.
pub fn detect_inducement(
    candles: &[Candle],
    zone: &Zone,
    options: &InducementOptions,
) -> Option<InducementResult> {
    if candles.is_empty() || candles.len() < options.lookback {
        return None;
    }

    let window_start = candles.len() - options.lookback;
    let zone_low = zone.zone_low();
    let zone_high = zone.zone_high();

    for index in (window_start..candles.len()).rev() {
        let candle = &candles[index];
        let range = candle.range();
        if range == 0.0 {
            trace!("[Inducement] Skipping zero-range candle at {}", index);
            continue;
        }

        let body_percent = percent_of(candle.body(), range);

        let hit = match zone.zone_type {
            ZoneType::Lfz => {
                let wick_percent = percent_of(candle.lower_wick(), range);
                let swept = candle.low < zone_low && candle.close > zone_low;
                (swept
                    && wick_percent >= options.min_wick_percent
                    && body_percent <= options.max_body_percent)
                    .then_some((InducementType::BullishInducement, wick_percent))
            }
            ZoneType::Hfz => {
                let wick_percent = percent_of(candle.upper_wick(), range);
                let swept = candle.high > zone_high && candle.close < zone_high;
                (swept
                    && wick_percent >= options.min_wick_percent
                    && body_percent <= options.max_body_percent)
                    .then_some((InducementType::BearishInducement, wick_percent))
            }
        };

        if let Some((inducement_type, wick_percent)) = hit {
            let result = build_result(
                candles,
                index,
                zone,
                inducement_type,
                wick_percent,
                body_percent,
            );
            debug!(
                "[Inducement] {:?} at index {} (price {:.5}, quality {:?}, reversal {})",
                result.inducement_type,
                index,
                result.inducement_price,
                result.quality,
                result.has_reversal
            );
            return Some(result);
        }
    }

    None
}

fn build_result(
    candles: &[Candle],
    index: usize,
    zone: &Zone,
    inducement_type: InducementType,
    wick_percent: f64,
    body_percent: f64,
) -> InducementResult {
    let candle = candles[index];
    let (inducement_price, zone_level, sweep_distance) = match inducement_type {
        InducementType::BullishInducement => {
            let level = zone.zone_low();
            (candle.low, level, level - candle.low)
        }
        InducementType::BearishInducement => {
            let level = zone.zone_high();
            (candle.high, level, candle.high - level)
        }
    };

    let sweep_percent = if zone_level == 0.0 {
        0.0
    } else {
        round_to(percent_of(sweep_distance, zone_level), 2)
    };

    let following = &candles[index + 1..];
    let has_reversal = check_reversal(following, inducement_type);
    // Redundant with `has_reversal`; kept for consumers that read both flags.
    let reversal_confirmed = has_reversal && following.len() >= REVERSAL_CANDLES;

    let quality = score_quality(sweep_distance, zone.zone_width(), has_reversal);

    let (implication, recommendation) = match inducement_type {
        InducementType::BullishInducement => (BULLISH_IMPLICATION, BULLISH_RECOMMENDATION),
        InducementType::BearishInducement => (BEARISH_IMPLICATION, BEARISH_RECOMMENDATION),
    };

    InducementResult {
        candle,
        candle_index: index,
        inducement_type,
        inducement_price,
        zone_level,
        sweep_distance,
        sweep_percent,
        wick_percent: round_to(wick_percent, 1),
        body_percent: round_to(body_percent, 1),
        has_reversal,
        reversal_confirmed,
        quality,
        implication: implication.to_string(),
        recommendation: recommendation.to_string(),
    }
}

/// Both of the next two candles must close in the reversal direction.
fn check_reversal(following: &[Candle], inducement_type: InducementType) -> bool {
    if following.len() < REVERSAL_CANDLES {
        return false;
    }
    let next = &following[..REVERSAL_CANDLES];
    match inducement_type {
        InducementType::BullishInducement => next.iter().all(Candle::is_bullish),
        InducementType::BearishInducement => next.iter().all(Candle::is_bearish),
    }
}

fn score_quality(sweep_distance: f64, zone_width: f64, has_reversal: bool) -> InducementQuality {
    // A zero-width zone makes any sweep a full sweep.
    let sweep_ratio = if zone_width > 0.0 {
        sweep_distance / zone_width
    } else {
        f64::INFINITY
    };

    let mut score = 0u8;
    if sweep_ratio >= 0.3 {
        score += 2;
    } else if sweep_ratio >= 0.1 {
        score += 1;
    }
    if has_reversal {
        score += 2;
    }

    match score {
        s if s >= 3 => InducementQuality::Excellent,
        2 => InducementQuality::Good,
        _ => InducementQuality::Moderate,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InducementRecognizer {
    pub options: InducementOptions,
}

impl PatternRecognizer for InducementRecognizer {
    fn name(&self) -> &'static str {
        "inducement"
    }

    fn detect(&self, candles: &[Candle], zone: &Zone) -> serde_json::Value {
        let result = detect_inducement(candles, zone, &self.options);
        json!({
            "pattern": self.name(),
            "total_bars": candles.len(),
            "total_detected": usize::from(result.is_some()),
            "data": result,
        })
    }
}
