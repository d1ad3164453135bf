//! Black-Scholes greeks for European index options.
//!
//! Every greek is rounded to 2 decimals. Gamma and vega are shared by calls
//! and puts. Theta is per calendar day (annual theta / 365), vega and rho
//! are per 1% move (divided by 100).
//!
//! No input validation happens here: zero strike, volatility or time to
//! expiry produce NaN/inf exactly as the underlying arithmetic does.
//! [`OptionParams::validate`] exists for callers that want to reject such
//! inputs up front.

use super::numeric::{norm_cdf, norm_pdf, round2};
use crate::error::NBNError;
use serde::{Deserialize, Serialize};

const CALENDAR_DAYS: f64 = 365.0;
const PER_PERCENT: f64 = 100.0;

/// Input parameters for greeks calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionParams {
    /// Spot price of the underlying
    pub spot: f64,
    pub strike: f64,
    /// Time to expiration in years (e.g., 7 days = 7/365)
    pub time_to_expiry: f64,
    /// Annualized risk-free rate (0.07 for 7%)
    pub risk_free_rate: f64,
    /// Annualized implied volatility (0.15 for 15%)
    pub implied_volatility: f64,
    /// Annualized continuous dividend yield, zero for index options
    #[serde(default)]
    pub dividend_yield: f64,
}

impl OptionParams {
    pub fn new(
        spot: f64,
        strike: f64,
        time_to_expiry: f64,
        risk_free_rate: f64,
        implied_volatility: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            implied_volatility,
            dividend_yield: 0.0,
        }
    }

    pub fn with_dividend(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Reject inputs outside the model's domain.
    pub fn validate(&self) -> Result<(), NBNError> {
        let checks = [
            (self.spot, "spot must be positive"),
            (self.strike, "strike must be positive"),
            (self.time_to_expiry, "time to expiry must be positive"),
            (self.implied_volatility, "implied volatility must be positive"),
        ];
        for (value, message) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(NBNError::InvalidOptionParams(format!("{message} (got {value})")));
            }
        }
        if !self.risk_free_rate.is_finite() || !self.dividend_yield.is_finite() {
            return Err(NBNError::InvalidOptionParams(
                "rates must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn sigma_sqrt_t(&self) -> f64 {
        self.implied_volatility * self.time_to_expiry.sqrt()
    }

    fn carry(&self) -> f64 {
        self.risk_free_rate - self.dividend_yield
    }

    /// e^(-qt)
    fn dividend_discount(&self) -> f64 {
        (-self.dividend_yield * self.time_to_expiry).exp()
    }

    /// e^(-rt)
    fn rate_discount(&self) -> f64 {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    pub fn d1(&self) -> f64 {
        let half_var = self.implied_volatility.powi(2) / 2.0;
        ((self.spot / self.strike).ln() + (self.carry() + half_var) * self.time_to_expiry)
            / self.sigma_sqrt_t()
    }

    pub fn d2(&self) -> f64 {
        let half_var = self.implied_volatility.powi(2) / 2.0;
        ((self.spot / self.strike).ln() + (self.carry() - half_var) * self.time_to_expiry)
            / self.sigma_sqrt_t()
    }

    pub fn call_delta(&self) -> f64 {
        round2(self.dividend_discount() * norm_cdf(self.d1()))
    }

    /// Derived from the already rounded call delta, so the result can sit up
    /// to 0.005 away from `Φ(d1) - 1`.
    pub fn put_delta(&self) -> f64 {
        round2(self.call_delta() - 1.0)
    }

    pub fn gamma(&self) -> f64 {
        round2(self.dividend_discount() * norm_pdf(self.d1()) / (self.spot * self.sigma_sqrt_t()))
    }

    pub fn vega(&self) -> f64 {
        round2(
            self.spot * self.dividend_discount() * norm_pdf(self.d1()) * self.time_to_expiry.sqrt()
                / PER_PERCENT,
        )
    }

    fn time_decay(&self) -> f64 {
        -(self.spot * self.dividend_discount() * norm_pdf(self.d1()) * self.implied_volatility)
            / (2.0 * self.time_to_expiry.sqrt())
    }

    pub fn call_theta(&self) -> f64 {
        let carry = self.dividend_yield * self.spot * self.dividend_discount() * norm_cdf(self.d1());
        let interest =
            self.risk_free_rate * self.strike * self.rate_discount() * norm_cdf(self.d2());
        round2((self.time_decay() + carry - interest) / CALENDAR_DAYS)
    }

    pub fn put_theta(&self) -> f64 {
        let carry =
            self.dividend_yield * self.spot * self.dividend_discount() * norm_cdf(-self.d1());
        let interest =
            self.risk_free_rate * self.strike * self.rate_discount() * norm_cdf(-self.d2());
        round2((self.time_decay() - carry + interest) / CALENDAR_DAYS)
    }

    pub fn call_rho(&self) -> f64 {
        round2(
            self.strike * self.time_to_expiry * self.rate_discount() * norm_cdf(self.d2())
                / PER_PERCENT,
        )
    }

    pub fn put_rho(&self) -> f64 {
        round2(
            -self.strike * self.time_to_expiry * self.rate_discount() * norm_cdf(-self.d2())
                / PER_PERCENT,
        )
    }

    pub fn call_greeks(&self) -> GreeksResult {
        GreeksResult {
            delta: self.call_delta(),
            theta: self.call_theta(),
            gamma: self.gamma(),
            vega: self.vega(),
            rho: self.call_rho(),
        }
    }

    pub fn put_greeks(&self) -> GreeksResult {
        GreeksResult {
            delta: self.put_delta(),
            theta: self.put_theta(),
            gamma: self.gamma(),
            vega: self.vega(),
            rho: self.put_rho(),
        }
    }

    pub fn greeks(&self) -> OptionGreeks {
        OptionGreeks {
            call: self.call_greeks(),
            put: self.put_greeks(),
        }
    }
}

/// Greeks for one option side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    pub delta: f64,
    pub theta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub rho: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionGreeks {
    pub call: GreeksResult,
    pub put: GreeksResult,
}

// -----------------------------------------------
// FREE FUNCTIONS (spot, strike, time, rate, sigma)
// -----------------------------------------------

pub fn call_delta(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).call_delta()
}

pub fn put_delta(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).put_delta()
}

pub fn call_theta(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).call_theta()
}

pub fn put_theta(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).put_theta()
}

pub fn call_put_gamma(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).gamma()
}

pub fn call_put_vega(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).vega()
}

pub fn call_rho(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).call_rho()
}

pub fn put_rho(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    OptionParams::new(spot, strike, time, rate, sigma).put_rho()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d1_d2_spread_is_sigma_sqrt_t() {
        let params = OptionParams::new(100.0, 95.0, 0.25, 0.05, 0.2);
        assert!((params.d1() - params.d2() - 0.2 * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_zero_volatility() {
        let params = OptionParams::new(100.0, 100.0, 0.1, 0.05, 0.0);
        assert!(matches!(params.validate(), Err(NBNError::InvalidOptionParams(_))));
        assert!(OptionParams::new(100.0, 100.0, 0.1, 0.05, 0.2).validate().is_ok());
    }

    #[test]
    fn test_zero_dividend_matches_plain_formula() {
        let params = OptionParams::new(100.0, 100.0, 1.0, 0.05, 0.2);
        let expected_call_delta = round2(norm_cdf(params.d1()));
        assert_eq!(params.call_delta(), expected_call_delta);
        assert_eq!(params.with_dividend(0.0), params);
    }
}
