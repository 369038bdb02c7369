pub mod proximity_detector;

pub use proximity_detector::{check_approaching_liquidity, ProximityDetector};
