// src/main.rs
use clap::Parser;
use inducement_scanner::data::load_candles;
use inducement_scanner::{ScanEngine, ScanRequest, ScannerConfig, Zone, ZoneType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inducement_scanner")]
#[command(about = "Scan a candle series for inducement (stop hunt) candles around a zone")]
struct Args {
    /// Candle file (.csv or .json), oldest first
    #[arg(short, long)]
    candles: PathBuf,

    /// Zone type: LFZ (demand) or HFZ (supply)
    #[arg(short = 'z', long)]
    zone_type: ZoneType,

    /// Zone entry price
    #[arg(long, allow_negative_numbers = true)]
    entry: f64,

    /// Zone stop price
    #[arg(long, allow_negative_numbers = true)]
    stop: f64,

    #[arg(long, default_value = "UNKNOWN")]
    symbol: String,

    #[arg(long, default_value = "1h")]
    timeframe: String,

    /// scan | inducement | inducement_detail | liquidity_pools
    #[arg(short, long, default_value = "scan")]
    pattern: String,

    /// Overrides INDUCEMENT_LOOKBACK
    #[arg(long)]
    lookback: Option<usize>,

    /// Overrides INDUCEMENT_MIN_WICK_PERCENT
    #[arg(long)]
    min_wick: Option<f64>,

    /// Overrides INDUCEMENT_MAX_BODY_PERCENT
    #[arg(long)]
    max_body: Option<f64>,

    /// Overrides LIQUIDITY_POOL_LOOKBACK
    #[arg(long)]
    pool_lookback: Option<usize>,

    /// Overrides PROXIMITY_THRESHOLD_PERCENT
    #[arg(long)]
    proximity_threshold: Option<f64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn setup_logging(debug: bool) {
    use env_logger::{Builder, Target};
    use log::LevelFilter;

    let mut builder = Builder::new();
    builder.target(Target::Stdout);

    if debug {
        builder.filter_level(LevelFilter::Debug);
    } else {
        builder.filter_level(LevelFilter::Info);
    }

    // RUST_LOG wins over the flag
    builder.parse_default_env();
    builder.init();
}

fn build_config(args: &Args) -> ScannerConfig {
    let mut config = ScannerConfig::from_env();
    if let Some(lookback) = args.lookback {
        config.inducement.lookback = lookback;
    }
    if let Some(min_wick) = args.min_wick {
        config.inducement.min_wick_percent = min_wick;
    }
    if let Some(max_body) = args.max_body {
        config.inducement.max_body_percent = max_body;
    }
    if let Some(pool_lookback) = args.pool_lookback {
        config.pool_lookback = pool_lookback;
    }
    if let Some(threshold) = args.proximity_threshold {
        config.proximity_threshold_percent = threshold;
    }
    config
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    setup_logging(args.debug);

    let config = build_config(&args);
    log::debug!("Scanner config: {:?}", config);

    let candles = load_candles(&args.candles)?;
    let zone = Zone::new(args.zone_type, args.entry, args.stop);
    let engine = ScanEngine::new(config);

    let output = match args.pattern.as_str() {
        "scan" => {
            let request = ScanRequest {
                symbol: args.symbol.clone(),
                timeframe: args.timeframe.clone(),
                zone,
                candles,
            };
            serde_json::to_value(engine.scan(&request)?)?
        }
        pattern => engine.detect_pattern(pattern, &candles, &zone)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
