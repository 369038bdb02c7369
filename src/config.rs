// src/config.rs
// Scanner configuration read from the environment (a `.env` file is loaded by
// the binary first). Unparsable values fall back to defaults with a warning.
use crate::patterns::inducement::{
    InducementOptions, DEFAULT_LOOKBACK, DEFAULT_MAX_BODY_PERCENT, DEFAULT_MIN_WICK_PERCENT,
};
use crate::patterns::liquidity_pools::DEFAULT_POOL_LOOKBACK;
use crate::realtime::proximity_detector::DEFAULT_PROXIMITY_THRESHOLD_PERCENT;
use log::warn;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScannerConfig {
    pub inducement: InducementOptions,
    /// Candles handed to the pool mapper for the proximity check
    pub pool_lookback: usize,
    pub proximity_threshold_percent: f64,
    pub cache_enabled: bool,
    /// Oldest scan results are evicted past this many entries
    pub cache_max_entries: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            inducement: InducementOptions::default(),
            pool_lookback: DEFAULT_POOL_LOOKBACK,
            proximity_threshold_percent: DEFAULT_PROXIMITY_THRESHOLD_PERCENT,
            cache_enabled: true,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl ScannerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookback = parse_or("INDUCEMENT_LOOKBACK", &lookup, DEFAULT_LOOKBACK);
        let min_wick_percent =
            parse_or("INDUCEMENT_MIN_WICK_PERCENT", &lookup, DEFAULT_MIN_WICK_PERCENT);
        let max_body_percent =
            parse_or("INDUCEMENT_MAX_BODY_PERCENT", &lookup, DEFAULT_MAX_BODY_PERCENT);
        let pool_lookback = parse_or("LIQUIDITY_POOL_LOOKBACK", &lookup, DEFAULT_POOL_LOOKBACK);
        let proximity_threshold_percent = parse_or(
            "PROXIMITY_THRESHOLD_PERCENT",
            &lookup,
            DEFAULT_PROXIMITY_THRESHOLD_PERCENT,
        );
        let cache_enabled = lookup("ENABLE_SCAN_CACHE")
            .map(|v| v.trim().to_lowercase() == "true")
            .unwrap_or(true);
        let cache_max_entries =
            parse_or("SCAN_CACHE_MAX_ENTRIES", &lookup, DEFAULT_CACHE_MAX_ENTRIES);

        Self {
            inducement: InducementOptions {
                lookback,
                min_wick_percent,
                max_body_percent,
            },
            pool_lookback,
            proximity_threshold_percent,
            cache_enabled,
            cache_max_entries,
        }
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Invalid value '{}' for {}, using default {}", raw, key, default);
                default
            }
        },
    }
}
