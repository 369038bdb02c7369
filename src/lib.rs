// src/lib.rs
//! Inducement (stop hunt) detection against supply/demand zones, plus
//! liquidity pool mapping from swing points.

pub mod config;
pub mod data;
pub mod errors;
pub mod patterns;
pub mod realtime;
pub mod types;
pub mod zones;

// Re-export the engine surface
pub use config::ScannerConfig;
pub use errors::ScanError;
pub use patterns::{
    detect_inducement, detect_liquidity_pools, find_swing_highs, find_swing_lows,
    InducementOptions, PatternRecognizer,
};
pub use realtime::check_approaching_liquidity;
pub use types::*;
pub use zones::{analyze_inducement_detail, ScanEngine, ScanRequest, ScanResult};
