// tests/liquidity_pool_tests.rs
mod common;

use common::*;
use inducement_scanner::patterns::liquidity_pools::{
    detect_liquidity_pools_with, LiquidityPoolRecognizer,
};
use inducement_scanner::patterns::SwingPointExtractor;
use inducement_scanner::realtime::proximity_detector::{BUY_STOPS_WARNING, SELL_STOPS_WARNING};
use inducement_scanner::{
    check_approaching_liquidity, detect_liquidity_pools, ApproachDirection, Candle,
    LiquidityPool, PatternRecognizer, PoolStrength, PoolType, SwingPoint,
};

/// 60 candles; the first 10 fall outside a 50-candle window.
fn structured_series() -> Vec<Candle> {
    series(
        60,
        base_bar,
        &[
            (3, dip_to(90.0)), // outside the window
            (15, dip_to(100.0)),
            (25, dip_to(100.15)),
            (35, dip_to(105.0)),
            (50, spike_to(130.0)),
        ],
    )
}

#[test]
fn test_insufficient_history_yields_no_pools() {
    setup_test_logging();
    let candles = series(49, base_bar, &[(20, dip_to(100.0))]);
    let pools = detect_liquidity_pools(&candles, 50);
    assert!(pools.is_empty());
    assert!(pools.buy_stop_pools.is_empty());
    assert!(pools.sell_stop_pools.is_empty());

    assert!(detect_liquidity_pools(&[], 50).is_empty());
}

#[test]
fn test_one_pool_per_swing_point_with_clustered_strength() {
    let candles = structured_series();
    let pools = detect_liquidity_pools(&candles, 50);

    let sell_levels: Vec<f64> = pools.sell_stop_pools.iter().map(|p| p.level).collect();
    assert_eq!(sell_levels, vec![100.0, 100.15, 105.0]);
    let sell_strengths: Vec<PoolStrength> =
        pools.sell_stop_pools.iter().map(|p| p.strength).collect();
    assert_eq!(
        sell_strengths,
        vec![PoolStrength::High, PoolStrength::High, PoolStrength::Medium]
    );
    assert!(pools
        .sell_stop_pools
        .iter()
        .all(|p| p.pool_type == PoolType::SellStops));
    assert_eq!(pools.sell_stop_pools[0].timestamp, 15 * MINUTE_MS);

    assert_eq!(pools.buy_stop_pools.len(), 1);
    assert_eq!(pools.buy_stop_pools[0].level, 130.0);
    assert_eq!(pools.buy_stop_pools[0].pool_type, PoolType::BuyStops);
    assert_eq!(pools.buy_stop_pools[0].strength, PoolStrength::Medium);
}

#[test]
fn test_all_pools_sorted_by_level_descending() {
    let pools = detect_liquidity_pools(&structured_series(), 50);
    let levels: Vec<f64> = pools.all_pools.iter().map(|p| p.level).collect();
    assert_eq!(levels, vec![130.0, 105.0, 100.15, 100.0]);
}

struct FixedSwings {
    highs: Vec<SwingPoint>,
    lows: Vec<SwingPoint>,
}

impl SwingPointExtractor for FixedSwings {
    fn swing_highs(&self, _candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint> {
        assert_eq!(sensitivity, 2);
        self.highs.clone()
    }

    fn swing_lows(&self, _candles: &[Candle], sensitivity: usize) -> Vec<SwingPoint> {
        assert_eq!(sensitivity, 2);
        self.lows.clone()
    }
}

fn swing(price: f64, index: usize) -> SwingPoint {
    SwingPoint {
        price,
        timestamp: index as i64 * MINUTE_MS,
        index,
    }
}

#[test]
fn test_injected_extractor_drives_the_mapper() {
    let extractor = FixedSwings {
        highs: vec![swing(120.0, 4), swing(120.1, 12), swing(119.95, 30)],
        lows: vec![swing(100.0, 8), swing(100.15, 20), swing(105.0, 40)],
    };
    let candles = series(50, base_bar, &[]);
    let pools = detect_liquidity_pools_with(&candles, 50, &extractor);

    assert!(pools
        .buy_stop_pools
        .iter()
        .all(|p| p.strength == PoolStrength::VeryHigh));
    let lows: Vec<PoolStrength> = pools.sell_stop_pools.iter().map(|p| p.strength).collect();
    assert_eq!(
        lows,
        vec![PoolStrength::High, PoolStrength::High, PoolStrength::Medium]
    );
    assert_eq!(pools.all_pools.len(), 6);
    assert_eq!(pools.all_pools[0].level, 120.1);
    assert_eq!(pools.all_pools[5].level, 100.0);
}

#[test]
fn test_highs_and_lows_cluster_separately() {
    // A swing high and a swing low at nearly the same price do not reinforce each other.
    let extractor = FixedSwings {
        highs: vec![swing(100.0, 10)],
        lows: vec![swing(100.1, 20)],
    };
    let pools = detect_liquidity_pools_with(&series(50, base_bar, &[]), 50, &extractor);
    assert_eq!(pools.all_pools.len(), 2);
    assert!(pools
        .all_pools
        .iter()
        .all(|p| p.strength == PoolStrength::Medium));
}

#[test]
fn test_pool_recognizer_envelope() {
    let candles = structured_series();
    let value = LiquidityPoolRecognizer::default().detect(&candles, &demand_zone());
    assert_eq!(value["pattern"], "liquidity_pools");
    assert_eq!(value["total_bars"], 60);
    assert_eq!(value["total_detected"], 4);
    assert_eq!(value["data"]["all_pools"][0]["type"], "buy_stops");
}

// --- proximity ---

fn pool(pool_type: PoolType, level: f64) -> LiquidityPool {
    LiquidityPool {
        pool_type,
        level,
        strength: PoolStrength::Medium,
        timestamp: 0,
    }
}

#[test]
fn test_price_just_above_sell_stops() {
    let pools = vec![pool(PoolType::SellStops, 100.0)];
    let warning = check_approaching_liquidity(101.0, &pools, 1.0).unwrap();

    assert_eq!(warning.distance_percent, 0.99);
    assert_eq!(warning.direction, ApproachDirection::ApproachingBelow);
    assert_eq!(warning.warning, SELL_STOPS_WARNING);
    assert_eq!(warning.pool, pools[0]);
}

#[test]
fn test_price_below_buy_stops() {
    let pools = vec![pool(PoolType::BuyStops, 100.5)];
    let warning = check_approaching_liquidity(100.0, &pools, 1.0).unwrap();
    assert_eq!(warning.direction, ApproachDirection::ApproachingAbove);
    assert_eq!(warning.distance_percent, 0.5);
    assert_eq!(warning.warning, BUY_STOPS_WARNING);
}

#[test]
fn test_price_on_the_level_counts_as_approaching_above() {
    let pools = vec![pool(PoolType::SellStops, 100.0)];
    let warning = check_approaching_liquidity(100.0, &pools, 1.0).unwrap();
    assert_eq!(warning.direction, ApproachDirection::ApproachingAbove);
    assert_eq!(warning.distance_percent, 0.0);
}

#[test]
fn test_threshold_is_inclusive() {
    let pools = vec![pool(PoolType::BuyStops, 101.0)];
    assert!(check_approaching_liquidity(100.0, &pools, 1.0).is_some());
    assert!(check_approaching_liquidity(100.0, &pools, 0.99).is_none());
}

#[test]
fn test_no_pool_in_range() {
    let pools = vec![pool(PoolType::BuyStops, 110.0), pool(PoolType::SellStops, 90.0)];
    assert!(check_approaching_liquidity(100.0, &pools, 1.0).is_none());
    assert!(check_approaching_liquidity(100.0, &[], 1.0).is_none());
}

#[test]
fn test_first_match_in_caller_order_not_nearest() {
    let pools = vec![pool(PoolType::BuyStops, 100.9), pool(PoolType::BuyStops, 100.2)];
    let warning = check_approaching_liquidity(100.0, &pools, 1.0).unwrap();
    assert_eq!(warning.pool.level, 100.9);
}
