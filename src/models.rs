use crate::config;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Index the tool reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndexName {
    #[default]
    Nifty,
    #[value(name = "banknifty")]
    BankNifty,
}

impl IndexName {
    /// Symbol used by the option chain endpoints
    pub fn option_symbol(&self) -> &'static str {
        match self {
            IndexName::Nifty => "NIFTY",
            IndexName::BankNifty => "BANKNIFTY",
        }
    }

    /// Name used by the live index endpoints
    pub fn live_index_name(&self) -> &'static str {
        match self {
            IndexName::Nifty => config::NIFTY_INDEX_NAME,
            IndexName::BankNifty => config::BANKNIFTY_INDEX_NAME,
        }
    }
}

// -----------------------------------------------
// MARKET STATUS
// -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketStatus {
    #[serde(rename = "marketState")]
    pub market_state: Vec<MarketState>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One market segment (Capital Market, Currency, Commodity, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketState {
    pub market: String,

    #[serde(rename = "marketStatus", default)]
    pub market_status: Option<String>,

    #[serde(rename = "tradeDate", default)]
    pub trade_date: Option<String>,

    #[serde(default)]
    pub index: Option<String>,

    #[serde(default)]
    pub last: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// -----------------------------------------------
// ALL INDICES
// -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllIndices {
    pub data: Vec<IndexQuote>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexQuote {
    pub index: String,

    #[serde(default)]
    pub last: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// -----------------------------------------------
// LIVE INDEX (equity-stockIndices)
// -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveIndex {
    #[serde(default)]
    pub name: Option<String>,

    pub data: Vec<IndexConstituent>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Row of a live index response; the index itself is one of the rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConstituent {
    pub symbol: String,

    #[serde(default)]
    pub open: Option<f64>,

    #[serde(rename = "dayHigh", default)]
    pub day_high: Option<f64>,

    #[serde(rename = "dayLow", default)]
    pub day_low: Option<f64>,

    #[serde(rename = "lastPrice", default)]
    pub last_price: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// -----------------------------------------------
// OPTION CHAIN
// -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractInfo {
    #[serde(rename = "expiryDates")]
    pub expiry_dates: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Main response structure from NSE option chain API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChain {
    pub records: Records,

    #[serde(default)]
    pub filtered: Option<FilteredData>,
}

impl OptionChain {
    /// Rows for the requested expiry, preferring the filtered section
    pub fn rows(&self) -> &[OptionData] {
        match &self.filtered {
            Some(filtered) if !filtered.data.is_empty() => &filtered.data,
            _ => &self.records.data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Records {
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(rename = "underlyingValue")]
    pub underlying_value: f64,

    #[serde(default)]
    pub data: Vec<OptionData>,

    #[serde(rename = "expiryDates", default)]
    pub expiry_dates: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredData {
    #[serde(default)]
    pub data: Vec<OptionData>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Option data for each strike price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionData {
    #[serde(rename = "strikePrice")]
    pub strike_price: f64,

    #[serde(rename = "expiryDate", alias = "expiryDates", default)]
    pub expiry_date: Option<String>,

    #[serde(rename = "CE", default, skip_serializing_if = "Option::is_none")]
    pub call: Option<OptionDetail>,

    #[serde(rename = "PE", default, skip_serializing_if = "Option::is_none")]
    pub put: Option<OptionDetail>,
}

/// Detailed option information (CE or PE)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDetail {
    #[serde(rename = "openInterest", default)]
    pub open_interest: Option<f64>,

    #[serde(rename = "changeinOpenInterest", default)]
    pub change_in_oi: Option<f64>,

    #[serde(rename = "lastPrice", default)]
    pub last_price: Option<f64>,

    #[serde(rename = "impliedVolatility", default)]
    pub iv: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
