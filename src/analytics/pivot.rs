//! Support and resistance levels from a single OHLC bar.
//!
//! Five pivot families are supported. They do not share a schema: classic,
//! camarilla and fibonacci produce three levels per side, woodie two and
//! demark one. Levels a method does not produce are absent from the
//! serialized result rather than null.
//!
//! Inputs are trusted as-is. A bar with `high == low` yields zero-width
//! ranges, and NaN inputs propagate into the output unchanged.

use super::numeric::round2;
use crate::error::NBNError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Open/high/low/close of one trading period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    #[serde(rename = "o")]
    pub open: f64,

    #[serde(rename = "h")]
    pub high: f64,

    #[serde(rename = "l")]
    pub low: f64,

    #[serde(rename = "c")]
    pub close: f64,
}

impl Ohlc {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close }
    }

    fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotMethod {
    Classic,
    Woodie,
    Camarilla,
    Demark,
    Fibonacci,
}

impl PivotMethod {
    pub const ALL: [PivotMethod; 5] = [
        PivotMethod::Classic,
        PivotMethod::Woodie,
        PivotMethod::Camarilla,
        PivotMethod::Demark,
        PivotMethod::Fibonacci,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PivotMethod::Classic => "classic",
            PivotMethod::Woodie => "woodie",
            PivotMethod::Camarilla => "camarilla",
            PivotMethod::Demark => "demark",
            PivotMethod::Fibonacci => "fibonacci",
        }
    }

    pub fn levels(&self, ohlc: &Ohlc) -> PivotLevels {
        pivot_levels(*self, ohlc)
    }
}

impl fmt::Display for PivotMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PivotMethod {
    type Err = NBNError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PivotMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| NBNError::UnknownPivotMethod(s.to_string()))
    }
}

/// Support/resistance levels produced by one method, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotLevels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support1: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub support2: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub support3: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance1: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance2: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance3: Option<f64>,
}

impl PivotLevels {
    fn three(supports: [f64; 3], resistances: [f64; 3]) -> Self {
        Self {
            support1: Some(round2(supports[0])),
            support2: Some(round2(supports[1])),
            support3: Some(round2(supports[2])),
            resistance1: Some(round2(resistances[0])),
            resistance2: Some(round2(resistances[1])),
            resistance3: Some(round2(resistances[2])),
        }
    }

    /// Number of levels present.
    pub fn len(&self) -> usize {
        [
            self.support1,
            self.support2,
            self.support3,
            self.resistance1,
            self.resistance2,
            self.resistance3,
        ]
        .iter()
        .filter(|level| level.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Levels for every method, keyed in declaration order.
pub type PivotSet = BTreeMap<PivotMethod, PivotLevels>;

pub fn pivot_set(ohlc: &Ohlc) -> PivotSet {
    PivotMethod::ALL
        .into_iter()
        .map(|method| (method, pivot_levels(method, ohlc)))
        .collect()
}

pub fn pivot_levels(method: PivotMethod, ohlc: &Ohlc) -> PivotLevels {
    match method {
        PivotMethod::Classic => classic(ohlc),
        PivotMethod::Woodie => woodie(ohlc),
        PivotMethod::Camarilla => camarilla(ohlc),
        PivotMethod::Demark => demark(ohlc),
        PivotMethod::Fibonacci => fibonacci(ohlc),
    }
}

fn classic(ohlc: &Ohlc) -> PivotLevels {
    let Ohlc { high, low, close, .. } = *ohlc;
    let pivot = (high + low + close) / 3.0;

    PivotLevels::three(
        [
            pivot * 2.0 - high,
            pivot - ohlc.range(),
            low - 2.0 * (high - pivot),
        ],
        [
            pivot * 2.0 - low,
            pivot + ohlc.range(),
            high + 2.0 * (pivot - low),
        ],
    )
}

fn woodie(ohlc: &Ohlc) -> PivotLevels {
    let Ohlc { high, low, close, .. } = *ohlc;
    let pivot = (high + low + close * 2.0) / 4.0;

    PivotLevels {
        support1: Some(round2(2.0 * pivot - high)),
        support2: Some(round2(pivot - ohlc.range())),
        resistance1: Some(round2(2.0 * pivot - low)),
        resistance2: Some(round2(pivot + ohlc.range())),
        ..PivotLevels::default()
    }
}

fn camarilla(ohlc: &Ohlc) -> PivotLevels {
    let close = ohlc.close;
    let range = ohlc.range() * 1.1;

    PivotLevels::three(
        [close - range / 12.0, close - range / 6.0, close - range / 4.0],
        [range / 12.0 + close, range / 6.0 + close, range / 4.0 + close],
    )
}

fn demark(ohlc: &Ohlc) -> PivotLevels {
    let Ohlc { open, high, low, close } = *ohlc;
    let mid = if close < open {
        high + 2.0 * low + close
    } else if close > open {
        2.0 * high + low + close
    } else {
        high + low + 2.0 * close
    };

    PivotLevels {
        support1: Some(round2(mid / 2.0 - high)),
        resistance1: Some(round2(mid / 2.0 - low)),
        ..PivotLevels::default()
    }
}

const FIBONACCI_RATIOS: [f64; 3] = [0.382, 0.6182, 1.0];

fn fibonacci(ohlc: &Ohlc) -> PivotLevels {
    let pivot = (ohlc.high + ohlc.low + ohlc.close) / 3.0;
    let range = ohlc.range();

    PivotLevels::three(
        FIBONACCI_RATIOS.map(|ratio| pivot - ratio * range),
        FIBONACCI_RATIOS.map(|ratio| pivot + ratio * range),
    )
}
