// src/zones/scan_engine.rs
// Orchestration over the pure detectors: validates requests, memoizes results
// by input fingerprint and runs the proximity check against the latest close.
use crate::config::ScannerConfig;
use crate::errors::ScanError;
use crate::patterns::liquidity_pools::{detect_liquidity_pools, LiquidityPoolRecognizer};
use crate::patterns::{InducementRecognizer, PatternRecognizer};
use crate::realtime::proximity_detector::ProximityDetector;
use crate::types::{ApproachWarning, Candle, DetailReport, Zone};
use crate::zones::inducement_detail::{analyze_inducement_detail, InducementDetailRecognizer};
use dashmap::DashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};

/// Hex chars of the digest reported as `ScanResult::fingerprint`.
const FINGERPRINT_LEN: usize = 16;

// ==================== SCAN REQUEST ====================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub symbol: String,
    pub timeframe: String,
    pub zone: Zone,
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResult {
    pub symbol: String,
    pub timeframe: String,
    pub fingerprint: String,
    pub report: DetailReport,
    pub approaching_liquidity: Option<ApproachWarning>,
    pub candles_analyzed: usize,
}

// ==================== CORE SCAN ENGINE ====================

struct CachedScan {
    /// Insertion order, oldest is evicted first
    seq: u64,
    result: ScanResult,
}

pub struct ScanEngine {
    config: ScannerConfig,
    proximity: ProximityDetector,
    // Keyed by the full SHA-256 hex digest
    cache: DashMap<String, CachedScan>,
    next_seq: AtomicU64,
}

impl ScanEngine {
    pub fn new(config: ScannerConfig) -> Self {
        let proximity = ProximityDetector::new(config.proximity_threshold_percent);
        Self {
            config,
            proximity,
            cache: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Runs the detail analysis and the proximity check for one request.
    pub fn scan(&self, request: &ScanRequest) -> Result<ScanResult, ScanError> {
        validate_zone(&request.zone)?;

        let digest = scan_digest(request, &self.config);
        if self.config.cache_enabled {
            if let Some(hit) = self.cache.get(&digest) {
                debug!(
                    "[ScanEngine] Cache hit for {}/{} ({})",
                    request.symbol, request.timeframe, hit.result.fingerprint
                );
                return Ok(hit.result.clone());
            }
        }

        debug!(
            "[ScanEngine] Scanning {}/{} {} zone with {} candles",
            request.symbol,
            request.timeframe,
            request.zone.zone_type,
            request.candles.len()
        );

        let report =
            analyze_inducement_detail(&request.candles, &request.zone, &self.config.inducement);

        let approaching_liquidity = request.candles.last().and_then(|latest| {
            let pools = detect_liquidity_pools(&request.candles, self.config.pool_lookback);
            self.proximity.check(latest.close, &pools.all_pools)
        });

        if report.has_inducement {
            info!(
                "[ScanEngine] {}/{}: inducement found ({})",
                request.symbol,
                request.timeframe,
                report.trading_note.as_deref().unwrap_or("")
            );
        }

        let result = ScanResult {
            symbol: request.symbol.clone(),
            timeframe: request.timeframe.clone(),
            fingerprint: digest[..FINGERPRINT_LEN].to_string(),
            report,
            approaching_liquidity,
            candles_analyzed: request.candles.len(),
        };

        if self.config.cache_enabled {
            self.cache_insert(digest, result.clone());
        }
        Ok(result)
    }

    /// Inserts a result, first evicting the oldest entries so the cache stays
    /// within `cache_max_entries`. Concurrent inserts may briefly overshoot.
    fn cache_insert(&self, digest: String, result: ScanResult) {
        let max_entries = self.config.cache_max_entries;
        if max_entries == 0 {
            return;
        }

        while self.cache.len() >= max_entries {
            let oldest = self
                .cache
                .iter()
                .min_by_key(|entry| entry.value().seq)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    debug!("[ScanEngine] Cache full, evicting {}", &key[..FINGERPRINT_LEN]);
                    self.cache.remove(&key);
                }
                None => break,
            }
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.cache.insert(digest, CachedScan { seq, result });
    }

    /// Scans each request independently; output order matches input order.
    pub fn scan_batch(&self, requests: &[ScanRequest]) -> Vec<Result<ScanResult, ScanError>> {
        requests.iter().map(|request| self.scan(request)).collect()
    }

    /// Runs a single named recognizer and returns its JSON envelope.
    pub fn detect_pattern(
        &self,
        pattern: &str,
        candles: &[Candle],
        zone: &Zone,
    ) -> Result<Value, ScanError> {
        validate_zone(zone)?;
        let recognizer = self.recognizer(pattern)?;
        Ok(recognizer.detect(candles, zone))
    }

    fn recognizer(&self, pattern: &str) -> Result<Box<dyn PatternRecognizer>, ScanError> {
        let options = self.config.inducement;
        let recognizer: Box<dyn PatternRecognizer> = match pattern {
            "inducement" => Box::new(InducementRecognizer { options }),
            "inducement_detail" => Box::new(InducementDetailRecognizer { options }),
            "liquidity_pools" => Box::new(LiquidityPoolRecognizer {
                lookback: self.config.pool_lookback,
            }),
            other => return Err(ScanError::UnsupportedPattern(other.to_string())),
        };
        Ok(recognizer)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

fn validate_zone(zone: &Zone) -> Result<(), ScanError> {
    if !zone.entry_price.is_finite() || !zone.stop_price.is_finite() {
        return Err(ScanError::InvalidZone(format!(
            "entry {} / stop {} must be finite",
            zone.entry_price, zone.stop_price
        )));
    }
    Ok(())
}

/// Deterministic 16-hex-char id for a request under a given config; the
/// prefix of the full digest the cache is keyed by.
pub fn scan_fingerprint(request: &ScanRequest, config: &ScannerConfig) -> String {
    scan_digest(request, config)[..FINGERPRINT_LEN].to_string()
}

/// Full SHA-256 hex digest of a request under a given config. Floats are
/// hashed by bit pattern so equal inputs always map to the same key.
fn scan_digest(request: &ScanRequest, config: &ScannerConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.symbol.as_bytes());
    hasher.update([0u8]);
    hasher.update(request.timeframe.as_bytes());
    hasher.update([0u8]);
    hasher.update(request.zone.zone_type.to_string().as_bytes());
    hasher.update(request.zone.entry_price.to_bits().to_le_bytes());
    hasher.update(request.zone.stop_price.to_bits().to_le_bytes());

    let options = &config.inducement;
    hasher.update((options.lookback as u64).to_le_bytes());
    hasher.update(options.min_wick_percent.to_bits().to_le_bytes());
    hasher.update(options.max_body_percent.to_bits().to_le_bytes());
    hasher.update((config.pool_lookback as u64).to_le_bytes());
    hasher.update(config.proximity_threshold_percent.to_bits().to_le_bytes());

    for candle in &request.candles {
        hasher.update(candle.open.to_bits().to_le_bytes());
        hasher.update(candle.high.to_bits().to_le_bytes());
        hasher.update(candle.low.to_bits().to_le_bytes());
        hasher.update(candle.close.to_bits().to_le_bytes());
        hasher.update(candle.timestamp.to_le_bytes());
    }

    format!("{:x}", hasher.finalize())
}
