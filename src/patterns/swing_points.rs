// src/patterns/swing_points.rs
// Fractal swing highs/lows: a candle qualifies when `sensitivity` neighbours on
// each side are strictly lower (highs) or strictly higher (lows).
use crate::types::{Candle, SwingPoint};

pub const DEFAULT_SWING_SENSITIVITY: usize = 2;

/// Source of swing points for the liquidity pool mapper.
pub trait SwingPointExtractor {
    fn swing_highs(&self, candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint>;
    fn swing_lows(&self, candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FractalSwingExtractor;

impl SwingPointExtractor for FractalSwingExtractor {
    fn swing_highs(&self, candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint> {
        find_swing_highs(candles, sensitivity)
    }

    fn swing_lows(&self, candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint> {
        find_swing_lows(candles, sensitivity)
    }
}

fn is_swing_high(candles: &[Candle], i: usize, k: usize) -> bool {
    if i < k || i + k >= candles.len() {
        return false;
    }
    let high = candles[i].high;
    candles[i - k..i].iter().all(|c| c.high < high)
        && candles[i + 1..=i + k].iter().all(|c| c.high < high)
}

fn is_swing_low(candles: &[Candle], i: usize, k: usize) -> bool {
    if i < k || i + k >= candles.len() {
        return false;
    }
    let low = candles[i].low;
    candles[i - k..i].iter().all(|c| c.low > low)
        && candles[i + 1..=i + k].iter().all(|c| c.low > low)
}

/// Swing highs in time order. Indices are relative to `candles`.
pub fn find_swing_highs(candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint> {
    (0..candles.len())
        .filter(|&i| is_swing_high(candles, i, sensitivity))
        .map(|i| SwingPoint {
            price: candles[i].high,
            timestamp: candles[i].timestamp,
            index: i,
        })
        .collect()
}

/// Swing lows in time order. Indices are relative to `candles`.
pub fn find_swing_lows(candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint> {
    (0..candles.len())
        .filter(|&i| is_swing_low(candles, i, sensitivity))
        .map(|i| SwingPoint {
            price: candles[i].low,
            timestamp: candles[i].timestamp,
            index: i,
        })
        .collect()
}
