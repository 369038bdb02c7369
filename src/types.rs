// src/types.rs
use serde::{Deserialize, Serialize};

// --- Input ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: i64) -> Self {
        Candle {
            open,
            high,
            low,
            close,
            timestamp,
        }
    }

    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneType {
    /// Demand zone (support, buy interest)
    #[serde(rename = "LFZ")]
    Lfz,
    /// Supply zone (resistance, sell interest)
    #[serde(rename = "HFZ")]
    Hfz,
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lfz => write!(f, "LFZ"),
            Self::Hfz => write!(f, "HFZ"),
        }
    }
}

impl std::str::FromStr for ZoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LFZ" | "DEMAND" => Ok(Self::Lfz),
            "HFZ" | "SUPPLY" => Ok(Self::Hfz),
            other => Err(format!("unknown zone type '{}', expected LFZ or HFZ", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub entry_price: f64,
    pub stop_price: f64,
    pub zone_type: ZoneType,
}

impl Zone {
    pub fn new(zone_type: ZoneType, entry_price: f64, stop_price: f64) -> Self {
        Zone {
            entry_price,
            stop_price,
            zone_type,
        }
    }

    pub fn zone_low(&self) -> f64 {
        self.entry_price.min(self.stop_price)
    }

    pub fn zone_high(&self) -> f64 {
        self.entry_price.max(self.stop_price)
    }

    pub fn zone_width(&self) -> f64 {
        self.zone_high() - self.zone_low()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SwingPoint {
    pub price: f64,
    pub timestamp: i64,
    pub index: usize,
}

// --- Inducement ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InducementType {
    BullishInducement,
    BearishInducement,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum InducementQuality {
    Moderate,
    Good,
    Excellent,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InducementResult {
    pub candle: Candle,
    /// Position of `candle` in the slice handed to the detector
    pub candle_index: usize,
    pub inducement_type: InducementType,
    /// The swept extreme (candle low for bullish, candle high for bearish)
    pub inducement_price: f64,
    /// The zone boundary that was crossed
    pub zone_level: f64,
    pub sweep_distance: f64,
    pub sweep_percent: f64,
    pub wick_percent: f64,
    pub body_percent: f64,
    pub has_reversal: bool,
    pub reversal_confirmed: bool,
    pub quality: InducementQuality,
    pub implication: String,
    pub recommendation: String,
}

// --- Liquidity ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    /// Resting buy stops above swing highs
    BuyStops,
    /// Resting sell stops below swing lows
    SellStops,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PoolStrength {
    Medium,
    High,
    VeryHigh,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LiquidityPool {
    #[serde(rename = "type")]
    pub pool_type: PoolType,
    pub level: f64,
    pub strength: PoolStrength,
    pub timestamp: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LiquidityPools {
    pub buy_stop_pools: Vec<LiquidityPool>,
    pub sell_stop_pools: Vec<LiquidityPool>,
    /// Both lists combined, sorted by level descending
    pub all_pools: Vec<LiquidityPool>,
}

impl LiquidityPools {
    pub fn is_empty(&self) -> bool {
        self.all_pools.is_empty()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApproachDirection {
    /// Price is above the pool and moving down toward it
    ApproachingBelow,
    /// Price is at or below the pool and moving up toward it
    ApproachingAbove,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApproachWarning {
    pub pool: LiquidityPool,
    pub distance_percent: f64,
    pub direction: ApproachDirection,
    pub warning: String,
}

// --- Output ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetailReport {
    pub has_inducement: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inducement: Option<InducementResult>,
    pub targeted_pool: Option<LiquidityPool>,
    #[serde(default)]
    pub nearby_buy_stops: Vec<LiquidityPool>,
    #[serde(default)]
    pub nearby_sell_stops: Vec<LiquidityPool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trading_note: Option<String>,
}

impl DetailReport {
    pub fn no_inducement(reason: impl Into<String>) -> Self {
        DetailReport {
            has_inducement: false,
            reason: Some(reason.into()),
            inducement: None,
            targeted_pool: None,
            nearby_buy_stops: Vec::new(),
            nearby_sell_stops: Vec::new(),
            trading_note: None,
        }
    }
}
