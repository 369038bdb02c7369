// src/realtime/proximity_detector.rs
use crate::patterns::round_to;
use crate::types::{ApproachDirection, ApproachWarning, LiquidityPool, PoolType};
use log::debug;

pub const DEFAULT_PROXIMITY_THRESHOLD_PERCENT: f64 = 1.0;

pub const BUY_STOPS_WARNING: &str = "price approaching buy-stop liquidity, possible squeeze up";
pub const SELL_STOPS_WARNING: &str = "price approaching sell-stop liquidity, possible sweep down";

/// Returns a warning for the first pool (in the order given) whose level is
/// within `threshold_percent` of `current_price`. The first match is not
/// necessarily the nearest; callers wanting the nearest must pre-sort.
pub fn check_approaching_liquidity(
    current_price: f64,
    pools: &[LiquidityPool],
    threshold_percent: f64,
) -> Option<ApproachWarning> {
    if !current_price.is_finite() || current_price <= 0.0 {
        return None;
    }

    pools.iter().find_map(|pool| {
        let distance_percent = (pool.level - current_price).abs() / current_price * 100.0;
        // NaN levels never count as in range
        if distance_percent.is_nan() || distance_percent > threshold_percent {
            return None;
        }

        let direction = if current_price > pool.level {
            ApproachDirection::ApproachingBelow
        } else {
            ApproachDirection::ApproachingAbove
        };
        let warning = match pool.pool_type {
            PoolType::BuyStops => BUY_STOPS_WARNING,
            PoolType::SellStops => SELL_STOPS_WARNING,
        };

        debug!(
            "🎯 Liquidity proximity: price {:.5} is {:.2}% from {:?} pool at {:.5}",
            current_price, distance_percent, pool.pool_type, pool.level
        );

        Some(ApproachWarning {
            pool: *pool,
            distance_percent: round_to(distance_percent, 2),
            direction,
            warning: warning.to_string(),
        })
    })
}

#[derive(Debug, Clone, Copy)]
pub struct ProximityDetector {
    pub threshold_percent: f64,
}

impl Default for ProximityDetector {
    fn default() -> Self {
        Self::new(DEFAULT_PROXIMITY_THRESHOLD_PERCENT)
    }
}

impl ProximityDetector {
    pub fn new(threshold_percent: f64) -> Self {
        debug!(
            "🎯 Liquidity proximity detector initialized - threshold: {:.2}%",
            threshold_percent
        );
        Self { threshold_percent }
    }

    pub fn check(&self, current_price: f64, pools: &[LiquidityPool]) -> Option<ApproachWarning> {
        check_approaching_liquidity(current_price, pools, self.threshold_percent)
    }
}
