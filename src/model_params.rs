//! Market inputs shared by every pricing model.
//!
//! [`MarketParameters`] is immutable once built and always validated, so a
//! model constructed from it never has to re-check `S`, `K`, `sigma` or `T`.

use crate::error::{ensure_finite, ensure_positive, PricingError, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Day-count basis used to turn calendar days into a year fraction.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Spot, strike, volatility, rate and maturity for a single pricing request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketParameters {
    /// Spot price of the underlying (> 0)
    spot: f64,
    /// Strike price (> 0)
    strike: f64,
    /// Annualized volatility (> 0)
    sigma: f64,
    /// Annualized continuously-compounded risk-free rate
    rate: f64,
    /// Time to maturity in years (> 0)
    maturity: f64,
}

impl MarketParameters {
    /// Creates validated market parameters.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if `spot`, `strike`, `sigma` or
    /// `maturity` is not strictly positive, or if any input is non-finite.
    pub fn new(spot: f64, strike: f64, sigma: f64, rate: f64, maturity: f64) -> Result<Self> {
        Ok(Self {
            spot: ensure_positive("spot", spot)?,
            strike: ensure_positive("strike", strike)?,
            sigma: ensure_positive("sigma", sigma)?,
            rate: ensure_finite("rate", rate)?,
            maturity: ensure_positive("maturity", maturity)?,
        })
    }

    /// Builds parameters from a calendar-day distance to maturity (`T = days / 365`).
    pub fn from_days_to_maturity(
        spot: f64,
        strike: f64,
        sigma: f64,
        rate: f64,
        days: u32,
    ) -> Result<Self> {
        if days == 0 {
            return Err(PricingError::InvalidParameter {
                name: "days_to_maturity",
                value: 0.0,
                constraint: "must be >= 1",
            });
        }
        Self::new(spot, strike, sigma, rate, f64::from(days) / DAYS_PER_YEAR)
    }

    /// Builds parameters from a valuation date and a maturity date.
    ///
    /// The maturity must fall strictly after the valuation date.
    pub fn from_dates(
        spot: f64,
        strike: f64,
        sigma: f64,
        rate: f64,
        valuation: NaiveDate,
        maturity: NaiveDate,
    ) -> Result<Self> {
        let days = (maturity - valuation).num_days();
        if days <= 0 {
            return Err(PricingError::InvalidParameter {
                name: "days_to_maturity",
                value: days as f64,
                constraint: "maturity date must be after the valuation date",
            });
        }
        Self::new(spot, strike, sigma, rate, days as f64 / DAYS_PER_YEAR)
    }

    /// Same as [`MarketParameters::new`] but with rate and volatility quoted in percent.
    pub fn from_percentages(
        spot: f64,
        strike: f64,
        sigma_pct: f64,
        rate_pct: f64,
        maturity: f64,
    ) -> Result<Self> {
        Self::new(spot, strike, sigma_pct / 100.0, rate_pct / 100.0, maturity)
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to maturity in years.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Whole calendar days to maturity, rounded up, never below one.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] if the day count does not fit in a `u32`.
    pub fn days_to_maturity(&self) -> Result<usize> {
        // absorb representation error from days / 365 round trips
        let days = (self.maturity * DAYS_PER_YEAR - 1e-9).ceil();
        if days > f64::from(u32::MAX) {
            return Err(PricingError::InvalidParameter {
                name: "maturity",
                value: self.maturity,
                constraint: "too long to count in calendar days",
            });
        }
        Ok((days as usize).max(1))
    }

    /// Discount factor `e^{-r t}` over a horizon `t` in years.
    pub fn discount(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }
}
