pub mod expiry;
pub mod greeks;
pub mod numeric;
pub mod pivot;

pub use expiry::{EXPIRY_WEEKDAY, ExpiryCalculator, ExpiryPair};
pub use greeks::{GreeksResult, OptionGreeks, OptionParams};
pub use pivot::{Ohlc, PivotLevels, PivotMethod, PivotSet, pivot_levels, pivot_set};
