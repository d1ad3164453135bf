use crate::analytics::{
    ExpiryCalculator, ExpiryPair, Ohlc, OptionGreeks, OptionParams, PivotLevels, PivotMethod,
    PivotSet, pivot_levels, pivot_set,
};
use crate::config;
use crate::error::NBNError;
use crate::models::{IndexName, IndexQuote, MarketState, OptionChain, OptionData};
use crate::nse_client::MarketDataSource;
use crate::output::OutputSink;
use crate::processor;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

/// Greeks together with the inputs they were computed from
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GreeksReport {
    pub params: OptionParams,
    #[serde(flatten)]
    pub greeks: OptionGreeks,
}

/// Either the full chain for the nearest expiry or the rows around the money
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OptionChainOutput {
    Full(Box<OptionChain>),
    Nearby(Vec<OptionData>),
}

/// Pivot levels for every method or for a single one
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PivotOutput {
    All(PivotSet),
    Single(PivotLevels),
}

/// Command handler: fetch from the source, shape or compute, emit to the sink
pub struct NBNCommands<S, O> {
    source: S,
    sink: O,
    index: IndexName,
}

impl<S: MarketDataSource, O: OutputSink> NBNCommands<S, O> {
    pub fn new(source: S, sink: O, index: IndexName) -> Self {
        Self { source, sink, index }
    }

    pub fn index(&self) -> IndexName {
        self.index
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    fn emit<T: Serialize>(&self, operation: &str, value: &T) -> Result<()> {
        self.sink
            .emit(operation, value)
            .with_context(|| format!("Failed to output {}", operation))?;
        Ok(())
    }

    // -----------------------------------------------
    // MARKET STATUS
    // -----------------------------------------------

    pub async fn nifty_overview(&self) -> Result<MarketState> {
        let status = self.source.market_status().await?;
        let state = processor::capital_market_state(&status)?.clone();
        self.emit("nifty_overview", &state)?;
        Ok(state)
    }

    pub async fn market_overview(&self) -> Result<Vec<MarketState>> {
        let status = self.source.market_status().await?;
        self.emit("market_overview", &status.market_state)?;
        Ok(status.market_state)
    }

    // -----------------------------------------------
    // OPTION CHAIN
    // -----------------------------------------------

    pub async fn option_chain(&self, limit: Option<usize>) -> Result<OptionChainOutput> {
        self.option_chain_as("option_chain", limit).await
    }

    /// Option chain limited to the strikes around the money
    pub async fn top_fno(&self) -> Result<OptionChainOutput> {
        self.option_chain_as("top_fno", Some(config::TOP_FNO_LIMIT)).await
    }

    async fn option_chain_as(&self, operation: &str, limit: Option<usize>) -> Result<OptionChainOutput> {
        let limit = limit.map(processor::validate_limit).transpose()?;
        let symbol = self.index.option_symbol();

        let info = self.source.contract_info(symbol).await?;
        let nearest = info
            .expiry_dates
            .first()
            .ok_or_else(|| NBNError::MissingRecord(format!("expiry dates for {}", symbol)))?;

        debug!(symbol, expiry = %nearest, "fetching nearest expiry chain");
        let chain = self.source.option_chain(symbol, nearest).await?;

        let output = match limit {
            None => OptionChainOutput::Full(Box::new(chain)),
            Some(limit) => {
                let strikes = processor::nearest_strikes(
                    &processor::strikes_of(chain.rows()),
                    chain.records.underlying_value,
                    2 * limit,
                );

                let month = processor::month_expiry(&info.expiry_dates)?;
                let month_rows = match month {
                    Some(month) if &month != nearest => {
                        debug!(symbol, expiry = %month, "fetching monthly expiry chain");
                        self.source.option_chain(symbol, &month).await?.rows().to_vec()
                    }
                    _ => Vec::new(),
                };

                OptionChainOutput::Nearby(processor::filter_nearby(chain.rows(), &month_rows, &strikes))
            }
        };

        self.emit(operation, &output)?;
        Ok(output)
    }

    // -----------------------------------------------
    // INDICES
    // -----------------------------------------------

    /// Quote of the configured index from the all-indices snapshot
    pub async fn index_details(&self) -> Result<IndexQuote> {
        let indices = self.source.all_indices().await?;
        let quote = processor::find_index_quote(&indices, self.index.live_index_name())?.clone();
        self.emit("index_details", &quote)?;
        Ok(quote)
    }

    pub async fn all_indices(&self) -> Result<Value> {
        let indices = self.source.all_indices().await?;
        let value = serde_json::to_value(&indices).map_err(NBNError::from)?;
        self.emit("all_indices", &value)?;
        Ok(value)
    }

    pub async fn live_data(&self) -> Result<Value> {
        let live = self.source.live_index(self.index.live_index_name()).await?;
        let value = serde_json::to_value(&live).map_err(NBNError::from)?;
        self.emit("live_data", &value)?;
        Ok(value)
    }

    // -----------------------------------------------
    // PASS-THROUGH REPORTS
    // -----------------------------------------------

    pub async fn derivative_turnover(&self) -> Result<Value> {
        let value = self.source.derivative_turnover().await?;
        self.emit("derivative_turnover", &value)?;
        Ok(value)
    }

    pub async fn live_fno(&self) -> Result<Value> {
        let value = self.source.live_fno().await?;
        self.emit("live_fno", &value)?;
        Ok(value)
    }

    pub async fn market_turnover(&self) -> Result<Value> {
        let value = self.source.market_turnover().await?;
        self.emit("market_turnover", &value)?;
        Ok(value)
    }

    // -----------------------------------------------
    // ANALYTICS
    // -----------------------------------------------

    async fn fetch_ohlc(&self) -> Result<Ohlc> {
        let name = self.index.live_index_name();
        let live = self.source.live_index(name).await?;
        Ok(processor::extract_ohlc(&live, name)?)
    }

    pub async fn ohlc(&self) -> Result<Ohlc> {
        let ohlc = self.fetch_ohlc().await?;
        self.emit("ohlc", &ohlc)?;
        Ok(ohlc)
    }

    /// Pivot levels from the supplied bar, or from the live index bar
    pub async fn support_resistance(
        &self,
        method: Option<PivotMethod>,
        ohlc: Option<Ohlc>,
    ) -> Result<PivotOutput> {
        let ohlc = match ohlc {
            Some(ohlc) => ohlc,
            None => self.fetch_ohlc().await?,
        };
        info!(?ohlc, method = ?method, "computing pivots");

        let output = match method {
            Some(method) => PivotOutput::Single(pivot_levels(method, &ohlc)),
            None => PivotOutput::All(pivot_set(&ohlc)),
        };

        self.emit("support_resistance", &output)?;
        Ok(output)
    }

    pub fn expiry(&self, today: Option<NaiveDate>) -> Result<ExpiryPair> {
        let calculator = match today {
            Some(date) => ExpiryCalculator::new(date),
            None => ExpiryCalculator::from_local_date(),
        };
        let expiry = calculator.get_expiry();
        info!(today = %calculator.today(), week = %expiry.week, month = %expiry.month, "expiry computed");

        self.emit("expiry", &expiry)?;
        Ok(expiry)
    }

    pub fn greeks(&self, params: OptionParams) -> Result<GreeksReport> {
        params.validate()?;
        let report = GreeksReport {
            params,
            greeks: params.greeks(),
        };

        self.emit("greeks", &report)?;
        Ok(report)
    }
}

/// Years to `expiry` counted in calendar days from `today`
pub fn years_to_expiry(today: NaiveDate, expiry: NaiveDate) -> f64 {
    (expiry - today).num_days() as f64 / config::DAYS_PER_YEAR
}

/// Next weekly expiry strictly after `today`
///
/// On expiry day the contract settles today, so the following week's
/// expiry is used.
pub fn next_weekly_expiry(today: NaiveDate) -> NaiveDate {
    let week = ExpiryCalculator::new(today).get_expiry().week;
    if week > today {
        return week;
    }
    today
        .succ_opt()
        .map(|tomorrow| ExpiryCalculator::new(tomorrow).get_expiry().week)
        .unwrap_or(week)
}

/// Time to expiry in years for the greeks command
///
/// `days` wins over `expiry`; with neither, the next weekly expiry after
/// `today` is used.
pub fn greeks_time(today: NaiveDate, days: Option<f64>, expiry: Option<NaiveDate>) -> f64 {
    match (days, expiry) {
        (Some(days), _) => days / config::DAYS_PER_YEAR,
        (None, Some(expiry)) => years_to_expiry(today, expiry),
        (None, None) => years_to_expiry(today, next_weekly_expiry(today)),
    }
}
