// src/zones/inducement_detail.rs
// Correlates a detected inducement with the liquidity pool it most likely targeted.
use crate::patterns::inducement::{detect_inducement, InducementOptions};
use crate::patterns::liquidity_pools::{detect_liquidity_pools, DEFAULT_POOL_LOOKBACK};
use crate::patterns::PatternRecognizer;
use crate::types::{
    Candle, DetailReport, InducementQuality, InducementResult, InducementType, LiquidityPool,
    Zone,
};
use log::debug;
use serde_json::json;
use std::cmp::Ordering;

/// A pool counts as targeted when the swept price is within 0.5% of its level.
const TARGET_TOLERANCE: f64 = 0.005;
const NEARBY_POOL_COUNT: usize = 3;

pub const NO_INDUCEMENT_REASON: &str = "No inducement pattern detected in the recent candles";

// Displayed verbatim by downstream consumers.
pub const BULLISH_A_PLUS_NOTE: &str =
    "A+ setup: sell-side liquidity grabbed below demand and the reversal is confirmed - high-probability long";
pub const BULLISH_GOOD_NOTE: &str =
    "Good setup: sell-side sweep into demand - wait for bullish confirmation before going long";
pub const BULLISH_MODERATE_NOTE: &str =
    "Moderate setup, monitor: sweep below demand lacks conviction - wait for more evidence";
pub const BEARISH_A_PLUS_NOTE: &str =
    "A+ setup: buy-side liquidity grabbed above supply and the reversal is confirmed - high-probability short";
pub const BEARISH_GOOD_NOTE: &str =
    "Good setup: buy-side sweep into supply - wait for bearish confirmation before going short";
pub const BEARISH_MODERATE_NOTE: &str =
    "Moderate setup, monitor: sweep above supply lacks conviction - wait for more evidence";

pub fn analyze_inducement_detail(
    candles: &[Candle],
    zone: &Zone,
    options: &InducementOptions,
) -> DetailReport {
    let inducement = match detect_inducement(candles, zone, options) {
        Some(result) => result,
        None => return DetailReport::no_inducement(NO_INDUCEMENT_REASON),
    };

    let pools = detect_liquidity_pools(candles, DEFAULT_POOL_LOOKBACK);
    let swept_price = inducement.inducement_price;

    let targeted_pool = pools
        .all_pools
        .iter()
        .find(|pool| (pool.level - swept_price).abs() <= pool.level * TARGET_TOLERANCE)
        .copied();

    let nearby_buy_stops = nearest_pools(&pools.buy_stop_pools, swept_price);
    let nearby_sell_stops = nearest_pools(&pools.sell_stop_pools, swept_price);
    let trading_note = trading_note(&inducement).to_string();

    debug!(
        "[InducementDetail] {:?} at {:.5}, targeted pool: {:?}",
        inducement.inducement_type,
        swept_price,
        targeted_pool.map(|p| p.level)
    );

    DetailReport {
        has_inducement: true,
        reason: None,
        inducement: Some(inducement),
        targeted_pool,
        nearby_buy_stops,
        nearby_sell_stops,
        trading_note: Some(trading_note),
    }
}

/// Up to three pools closest to `price`; ties keep the higher level first.
fn nearest_pools(pools: &[LiquidityPool], price: f64) -> Vec<LiquidityPool> {
    let mut sorted = pools.to_vec();
    sorted.sort_by(|a, b| {
        let da = (a.level - price).abs();
        let db = (b.level - price).abs();
        da.partial_cmp(&db)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.level.partial_cmp(&a.level).unwrap_or(Ordering::Equal))
    });
    sorted.truncate(NEARBY_POOL_COUNT);
    sorted
}

fn trading_note(inducement: &InducementResult) -> &'static str {
    let a_plus =
        inducement.reversal_confirmed && inducement.quality == InducementQuality::Excellent;
    let good = inducement.quality == InducementQuality::Good;

    match (inducement.inducement_type, a_plus, good) {
        (InducementType::BullishInducement, true, _) => BULLISH_A_PLUS_NOTE,
        (InducementType::BullishInducement, false, true) => BULLISH_GOOD_NOTE,
        (InducementType::BullishInducement, false, false) => BULLISH_MODERATE_NOTE,
        (InducementType::BearishInducement, true, _) => BEARISH_A_PLUS_NOTE,
        (InducementType::BearishInducement, false, true) => BEARISH_GOOD_NOTE,
        (InducementType::BearishInducement, false, false) => BEARISH_MODERATE_NOTE,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InducementDetailRecognizer {
    pub options: InducementOptions,
}

impl PatternRecognizer for InducementDetailRecognizer {
    fn name(&self) -> &'static str {
        "inducement_detail"
    }

    fn detect(&self, candles: &[Candle], zone: &Zone) -> serde_json::Value {
        let report = analyze_inducement_detail(candles, zone, &self.options);
        json!({
            "pattern": self.name(),
            "total_bars": candles.len(),
            "total_detected": usize::from(report.has_inducement),
            "data": report,
        })
    }
}
