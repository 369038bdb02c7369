// src/patterns/liquidity_pools.rs
// Maps swing points to the stop orders likely resting beyond them. One pool per
// swing point; strength reflects how many same-side swings sit at that price.
use crate::patterns::swing_points::{
    FractalSwingExtractor, SwingPointExtractor, DEFAULT_SWING_SENSITIVITY,
};
use crate::patterns::PatternRecognizer;
use crate::types::{Candle, LiquidityPool, LiquidityPools, PoolStrength, PoolType, SwingPoint, Zone};
use log::debug;
use serde_json::json;
use std::cmp::Ordering;

pub const DEFAULT_POOL_LOOKBACK: usize = 50;

/// Relative distance within which two swing points count as the same level.
const CLUSTER_TOLERANCE: f64 = 0.002;

pub fn detect_liquidity_pools(candles: &[Candle], lookback: usize) -> LiquidityPools {
    detect_liquidity_pools_with(candles, lookback, &FractalSwingExtractor)
}

pub fn detect_liquidity_pools_with<E: SwingPointExtractor + ?Sized>(
    candles: &[Candle],
    lookback: usize,
    extractor: &E,
) -> LiquidityPools {
    if candles.is_empty() || candles.len() < lookback {
        return LiquidityPools::default();
    }

    let recent = &candles[candles.len() - lookback..];
    let swing_highs = extractor.swing_highs(recent, DEFAULT_SWING_SENSITIVITY);
    let swing_lows = extractor.swing_lows(recent, DEFAULT_SWING_SENSITIVITY);

    let buy_stop_pools = pools_from_swings(&swing_highs, PoolType::BuyStops);
    let sell_stop_pools = pools_from_swings(&swing_lows, PoolType::SellStops);

    let mut all_pools: Vec<LiquidityPool> = buy_stop_pools
        .iter()
        .chain(sell_stop_pools.iter())
        .copied()
        .collect();
    // Stable sort keeps swing order for equal levels.
    all_pools.sort_by(|a, b| b.level.partial_cmp(&a.level).unwrap_or(Ordering::Equal));

    debug!(
        "[LiquidityPools] {} candles -> {} buy-stop, {} sell-stop pools",
        recent.len(),
        buy_stop_pools.len(),
        sell_stop_pools.len()
    );

    LiquidityPools {
        buy_stop_pools,
        sell_stop_pools,
        all_pools,
    }
}

fn pools_from_swings(swings: &[SwingPoint], pool_type: PoolType) -> Vec<LiquidityPool> {
    swings
        .iter()
        .map(|swing| LiquidityPool {
            pool_type,
            level: swing.price,
            strength: classify_strength(cluster_count(swing.price, swings)),
            timestamp: swing.timestamp,
        })
        .collect()
}

/// Swing points within tolerance of `price`, the point itself included.
fn cluster_count(price: f64, swings: &[SwingPoint]) -> usize {
    let tolerance = price * CLUSTER_TOLERANCE;
    swings
        .iter()
        .filter(|other| (other.price - price).abs() <= tolerance)
        .count()
}

fn classify_strength(count: usize) -> PoolStrength {
    match count {
        c if c >= 3 => PoolStrength::VeryHigh,
        2 => PoolStrength::High,
        _ => PoolStrength::Medium,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LiquidityPoolRecognizer {
    pub lookback: usize,
}

impl Default for LiquidityPoolRecognizer {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_POOL_LOOKBACK,
        }
    }
}

impl PatternRecognizer for LiquidityPoolRecognizer {
    fn name(&self) -> &'static str {
        "liquidity_pools"
    }

    // Pools depend on price structure only; the zone is not consulted.
    fn detect(&self, candles: &[Candle], _zone: &Zone) -> serde_json::Value {
        let pools = detect_liquidity_pools(candles, self.lookback);
        json!({
            "pattern": self.name(),
            "total_bars": candles.len(),
            "total_detected": pools.all_pools.len(),
            "data": pools,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swing(price: f64, index: usize) -> SwingPoint {
        SwingPoint {
            price,
            timestamp: index as i64,
            index,
        }
    }

    #[test]
    fn test_strength_counts_only_same_side_neighbours() {
        let lows = vec![swing(100.0, 3), swing(100.15, 9), swing(105.0, 15)];
        let pools = pools_from_swings(&lows, PoolType::SellStops);
        assert_eq!(pools[0].strength, PoolStrength::High);
        assert_eq!(pools[1].strength, PoolStrength::High);
        assert_eq!(pools[2].strength, PoolStrength::Medium);
        assert!(pools.iter().all(|p| p.pool_type == PoolType::SellStops));
    }

    #[test]
    fn test_three_at_one_level_is_very_high() {
        let highs = vec![swing(50.0, 2), swing(50.05, 8), swing(49.98, 14)];
        let pools = pools_from_swings(&highs, PoolType::BuyStops);
        assert!(pools.iter().all(|p| p.strength == PoolStrength::VeryHigh));
    }

    #[test]
    fn test_classify_strength() {
        assert_eq!(classify_strength(1), PoolStrength::Medium);
        assert_eq!(classify_strength(2), PoolStrength::High);
        assert_eq!(classify_strength(7), PoolStrength::VeryHigh);
    }
}
