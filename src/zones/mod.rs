pub mod inducement_detail;
pub mod scan_engine;

pub use inducement_detail::{analyze_inducement_detail, InducementDetailRecognizer};
pub use scan_engine::{scan_fingerprint, ScanEngine, ScanRequest, ScanResult};
