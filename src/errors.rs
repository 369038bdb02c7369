// src/errors.rs
// Errors for everything around the engine. The detectors themselves never fail:
// "not enough data" and "nothing found" are reported as `None`.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column '{0}' in candle data")]
    MissingColumn(String),

    #[error("Invalid candle row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("Pattern '{0}' is not supported by the scan engine")]
    UnsupportedPattern(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
