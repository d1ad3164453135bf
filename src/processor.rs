use crate::analytics::Ohlc;
use crate::config;
use crate::error::NBNError;
use crate::models::{AllIndices, IndexQuote, LiveIndex, MarketState, MarketStatus, OptionData};
use chrono::{Datelike, NaiveDate};

/// Build the OHLC bar of an index from a live index response
///
/// Picks the row whose symbol matches `index_name`, falling back to the
/// first row (NSE lists the index itself first).
pub fn extract_ohlc(live: &LiveIndex, index_name: &str) -> Result<Ohlc, NBNError> {
    let row = live
        .data
        .iter()
        .find(|row| row.symbol == index_name)
        .or_else(|| live.data.first())
        .ok_or_else(|| NBNError::MissingRecord(format!("no rows for {}", index_name)))?;

    let field = |value: Option<f64>, name: &str| {
        value.ok_or_else(|| NBNError::MissingRecord(format!("{} missing for {}", name, row.symbol)))
    };

    Ok(Ohlc {
        open: field(row.open, "open")?,
        high: field(row.day_high, "dayHigh")?,
        low: field(row.day_low, "dayLow")?,
        close: field(row.last_price, "lastPrice")?,
    })
}

/// Capital market segment from the market status response
pub fn capital_market_state(status: &MarketStatus) -> Result<&MarketState, NBNError> {
    status
        .market_state
        .iter()
        .find(|state| state.market == config::CAPITAL_MARKET)
        .ok_or_else(|| NBNError::MissingRecord(config::CAPITAL_MARKET.to_string()))
}

pub fn find_index_quote<'a>(indices: &'a AllIndices, index: &str) -> Result<&'a IndexQuote, NBNError> {
    indices
        .data
        .iter()
        .find(|quote| quote.index == index)
        .ok_or_else(|| NBNError::MissingRecord(index.to_string()))
}

pub fn validate_limit(limit: usize) -> Result<usize, NBNError> {
    if (config::MIN_STRIKE_LIMIT..=config::MAX_STRIKE_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(NBNError::InvalidLimit(limit))
    }
}

/// The `count` strikes closest to the underlying (ties keep input order)
pub fn nearest_strikes(strikes: &[f64], underlying_value: f64, count: usize) -> Vec<f64> {
    let mut unique: Vec<f64> = Vec::with_capacity(strikes.len());
    for &strike in strikes {
        if !unique.contains(&strike) {
            unique.push(strike);
        }
    }

    unique.sort_by(|a, b| {
        let da = (a - underlying_value).abs();
        let db = (b - underlying_value).abs();
        da.total_cmp(&db)
    });
    unique.truncate(count);
    unique
}

pub fn parse_expiry(expiry: &str) -> Result<NaiveDate, NBNError> {
    NaiveDate::parse_from_str(expiry.trim(), config::EXPIRY_DATE_FORMAT)
        .map_err(|e| NBNError::Parse(format!("expiry date '{}': {}", expiry, e)))
}

/// Last listed expiry in the same calendar month as the nearest expiry
///
/// Expiries are expected nearest first, as the provider lists them. Returns
/// `None` for an empty list.
pub fn month_expiry(expiries: &[String]) -> Result<Option<String>, NBNError> {
    let Some(nearest) = expiries.first() else {
        return Ok(None);
    };
    let nearest_date = parse_expiry(nearest)?;

    let mut selected = nearest;
    for expiry in expiries {
        let date = parse_expiry(expiry)?;
        if date.year() == nearest_date.year() && date.month() == nearest_date.month() {
            selected = expiry;
        }
    }

    Ok(Some(selected.clone()))
}

/// Nearest-expiry rows at the selected strikes, followed by month-expiry
/// rows at the same strikes
///
/// Callers pass an empty `month_rows` when the month expiry is the nearest
/// expiry, so its rows are listed once rather than twice.
pub fn filter_nearby(
    nearest_rows: &[OptionData],
    month_rows: &[OptionData],
    strikes: &[f64],
) -> Vec<OptionData> {
    nearest_rows
        .iter()
        .chain(month_rows.iter())
        .filter(|row| strikes.contains(&row.strike_price))
        .cloned()
        .collect()
}

/// All strikes listed in a set of rows
pub fn strikes_of(rows: &[OptionData]) -> Vec<f64> {
    rows.iter().map(|row| row.strike_price).collect()
}
