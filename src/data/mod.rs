pub mod candle_loader;

pub use candle_loader::{load_candles, parse_candles_csv, parse_candles_json};
