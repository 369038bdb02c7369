// src/data/candle_loader.rs
// Loads candle series from CSV or JSON files.
use crate::errors::ScanError;
use crate::types::Candle;
use chrono::DateTime;
use csv::ReaderBuilder;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn load_candles(path: impl AsRef<Path>) -> Result<Vec<Candle>, ScanError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let file = File::open(path)?;
    let candles = match extension.as_str() {
        "json" => parse_candles_json(BufReader::new(file))?,
        "csv" => parse_candles_csv(BufReader::new(file))?,
        other => {
            return Err(ScanError::Config(format!(
                "Unsupported candle file extension '{}' for {}",
                other,
                path.display()
            )))
        }
    };

    info!("Loaded {} candles from {}", candles.len(), path.display());
    Ok(candles)
}

pub fn parse_candles_json<R: Read>(reader: R) -> Result<Vec<Candle>, ScanError> {
    Ok(serde_json::from_reader(reader)?)
}

#[derive(Clone, Copy)]
enum TimeColumn {
    /// Epoch milliseconds
    Millis(usize),
    /// RFC 3339 string
    Rfc3339(usize),
}

pub fn parse_candles_csv<R: Read>(reader: R) -> Result<Vec<Candle>, ScanError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    // Find column indices
    let mut time_col = None;
    let mut open_idx = None;
    let mut high_idx = None;
    let mut low_idx = None;
    let mut close_idx = None;

    for (i, name) in headers.iter().enumerate() {
        match name.to_lowercase().as_str() {
            "timestamp" => time_col = Some(TimeColumn::Millis(i)),
            "time" | "_time" if time_col.is_none() => time_col = Some(TimeColumn::Rfc3339(i)),
            "open" => open_idx = Some(i),
            "high" => high_idx = Some(i),
            "low" => low_idx = Some(i),
            "close" => close_idx = Some(i),
            _ => {}
        }
    }

    let time_col = time_col.ok_or_else(|| ScanError::MissingColumn("timestamp".to_string()))?;
    let open_idx = open_idx.ok_or_else(|| ScanError::MissingColumn("open".to_string()))?;
    let high_idx = high_idx.ok_or_else(|| ScanError::MissingColumn("high".to_string()))?;
    let low_idx = low_idx.ok_or_else(|| ScanError::MissingColumn("low".to_string()))?;
    let close_idx = close_idx.ok_or_else(|| ScanError::MissingColumn("close".to_string()))?;

    let mut candles = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let price = |idx: usize, field: &str| -> Result<f64, ScanError> {
            record
                .get(idx)
                .and_then(|v| v.parse::<f64>().ok())
                .ok_or_else(|| ScanError::InvalidRow {
                    line,
                    reason: format!("'{}' is not a number", field),
                })
        };

        let timestamp = match time_col {
            TimeColumn::Millis(idx) => record
                .get(idx)
                .and_then(|v| v.parse::<i64>().ok())
                .ok_or_else(|| ScanError::InvalidRow {
                    line,
                    reason: "'timestamp' is not an integer".to_string(),
                })?,
            TimeColumn::Rfc3339(idx) => parse_rfc3339_millis(record.get(idx).unwrap_or(""))?,
        };

        candles.push(Candle {
            open: price(open_idx, "open")?,
            high: price(high_idx, "high")?,
            low: price(low_idx, "low")?,
            close: price(close_idx, "close")?,
            timestamp,
        });
    }

    debug!("Parsed {} candle rows from CSV", candles.len());
    Ok(candles)
}

fn parse_rfc3339_millis(value: &str) -> Result<i64, ScanError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| ScanError::InvalidTimestamp(format!("'{}': {}", value, e)))
}
