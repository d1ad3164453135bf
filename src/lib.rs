pub mod analytics;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod nse_client;
pub mod output;
pub mod processor;

// Re-exports for convenience
pub use analytics::{ExpiryCalculator, ExpiryPair, Ohlc, OptionGreeks, OptionParams, PivotMethod};
pub use error::NBNError;
pub use nse_client::{MarketDataSource, NSEClient};
pub use output::{OutputFormat, OutputSink, OutputWriter};
