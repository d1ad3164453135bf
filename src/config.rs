use std::path::PathBuf;
use std::time::Duration;

// -----------------------------------------------
// NSE API ENDPOINTS
// -----------------------------------------------
pub const NSE_BASE_URL: &str = "https://www.nseindia.com";
pub const NSE_API_MARKET_STATUS: &str = "https://www.nseindia.com/api/marketStatus";
pub const NSE_API_ALL_INDICES: &str = "https://www.nseindia.com/api/allIndices";
pub const NSE_API_MARKET_TURNOVER: &str = "https://www.nseindia.com/api/market-turnover";

pub fn nse_live_index_url(index: &str) -> String {
    format!(
        "{}/api/equity-stockIndices?index={}",
        NSE_BASE_URL,
        urlencoding::encode(index)
    )
}

pub fn nse_derivative_turnover_url(contracts: &str) -> String {
    format!(
        "{}/api/liveEquity-derivatives?index={}",
        NSE_BASE_URL,
        urlencoding::encode(contracts)
    )
}

pub fn nse_contract_info_url(symbol: &str) -> String {
    format!(
        "{}/api/option-chain-contract-info?symbol={}",
        NSE_BASE_URL,
        urlencoding::encode(symbol)
    )
}

pub fn nse_option_chain_url(typ: &str, symbol: &str, expiry: &str) -> String {
    format!(
        "{}/api/option-chain-v3?type={}&symbol={}&expiry={}",
        NSE_BASE_URL,
        typ,
        urlencoding::encode(symbol),
        urlencoding::encode(expiry)
    )
}

// -----------------------------------------------
// PROVIDER NAMES
// -----------------------------------------------
pub const LIVE_FNO_INDEX: &str = "SECURITIES IN F&O";
pub const DERIVATIVE_TURNOVER_CONTRACTS: &str = "allcontracts";
pub const CAPITAL_MARKET: &str = "Capital Market";
pub const NIFTY_INDEX_NAME: &str = "NIFTY 50";
pub const BANKNIFTY_INDEX_NAME: &str = "NIFTY BANK";
pub const EXPIRY_DATE_FORMAT: &str = "%d-%b-%Y";

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/131.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-IN,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

// -----------------------------------------------
// SESSION WARMUP
// -----------------------------------------------
pub const WARMUP_DELAY_MS: u64 = 200;

// -----------------------------------------------
// RETRY CONFIG
// -----------------------------------------------
pub const RETRY_BASE_DELAY_MS: u64 = 100;
pub const RETRY_FACTOR: u64 = 2;
pub const RETRY_MAX_DELAY_SECS: u64 = 3;
pub const RETRY_MAX_ATTEMPTS: usize = 3;

// -----------------------------------------------
// HTTP HEADERS
// -----------------------------------------------
pub const HEADER_REFERER: &str = "https://www.nseindia.com/";
pub const HEADER_X_REQUESTED_WITH: &str = "XMLHttpRequest";
pub const HEADER_ACCEPT_HTML: &str = "text/html";

// -----------------------------------------------
// OPTION CHAIN LIMITS
// -----------------------------------------------
pub const MIN_STRIKE_LIMIT: usize = 1;
pub const MAX_STRIKE_LIMIT: usize = 100;
pub const TOP_FNO_LIMIT: usize = 5;

// -----------------------------------------------
// OUTPUT
// -----------------------------------------------
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_JSON_INDENT: usize = 2;
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

// -----------------------------------------------
// LOGGING
// -----------------------------------------------
pub const DEFAULT_LOG_DIR: &str = "./logs";
pub const LOG_FILE_PREFIX: &str = "nbn-analyzer.log";

// -----------------------------------------------
// ANALYTICS DEFAULTS
// -----------------------------------------------
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.07;
pub const DAYS_PER_YEAR: f64 = 365.0;

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Root directory for JSON dumps
pub fn get_output_dir() -> PathBuf {
    std::env::var("NBN_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// Indentation used when writing JSON files
pub fn get_json_indent() -> usize {
    std::env::var("NBN_JSON_INDENT")
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .map(|indent| indent.min(8))
        .unwrap_or(DEFAULT_JSON_INDENT)
}

/// Annualized risk-free rate used by the greeks command when none is given
pub fn get_risk_free_rate() -> f64 {
    std::env::var("NBN_RISK_FREE_RATE")
        .ok()
        .and_then(|val| val.parse::<f64>().ok())
        .filter(|rate| rate.is_finite())
        .unwrap_or(DEFAULT_RISK_FREE_RATE)
}

pub fn get_log_dir() -> PathBuf {
    std::env::var("NBN_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR))
}
