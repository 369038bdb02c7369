// tests/common/mod.rs
// Shared candle builders for the integration tests.
#![allow(dead_code)]

use inducement_scanner::{Candle, Zone, ZoneType};

pub const MINUTE_MS: i64 = 60_000;

pub fn setup_test_logging() {
    // try_init: tests run in parallel and the logger may already be set.
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(open, high, low, close, 0)
}

/// Re-stamps candles one minute apart, oldest first.
pub fn stamped(mut candles: Vec<Candle>) -> Vec<Candle> {
    for (i, c) in candles.iter_mut().enumerate() {
        c.timestamp = i as i64 * MINUTE_MS;
    }
    candles
}

/// Demand zone 100-110 used throughout.
pub fn demand_zone() -> Zone {
    Zone::new(ZoneType::Lfz, 110.0, 100.0)
}

/// Supply zone 100-110 used throughout.
pub fn supply_zone() -> Zone {
    Zone::new(ZoneType::Hfz, 100.0, 110.0)
}

/// Bullish candle trading well above the demand zone; never sweeps it.
pub fn above_demand() -> Candle {
    candle(112.0, 114.0, 111.0, 113.0)
}

/// Bearish candle trading well below the supply zone; never sweeps it.
pub fn below_supply() -> Candle {
    candle(98.0, 99.0, 96.0, 97.0)
}

/// Sweeps below 100 and closes at 106: wick 61.5%, body 23.1%.
pub fn bullish_sweep() -> Candle {
    candle(103.0, 108.0, 95.0, 106.0)
}

/// Sweeps above 110 and closes at 104: wick 66.7%, body 25%.
pub fn bearish_sweep() -> Candle {
    candle(107.0, 115.0, 103.0, 104.0)
}

/// Dips below 100 but the wick is only 40% of the range.
pub fn weak_bullish_sweep() -> Candle {
    candle(101.0, 104.0, 99.0, 103.0)
}

/// Base candle with flat high/low so it never forms a fractal on its own.
pub fn base_bar() -> Candle {
    candle(115.0, 120.0, 110.0, 115.0)
}

pub fn dip_to(low: f64) -> Candle {
    candle(115.0, 120.0, low, 115.0)
}

pub fn spike_to(high: f64) -> Candle {
    candle(115.0, high, 110.0, 115.0)
}

/// `len` candles produced by `fill`, with `overrides` placed at their indices.
pub fn series(len: usize, fill: fn() -> Candle, overrides: &[(usize, Candle)]) -> Vec<Candle> {
    let mut candles: Vec<Candle> = (0..len).map(|_| fill()).collect();
    for &(idx, c) in overrides {
        candles[idx] = c;
    }
    stamped(candles)
}
