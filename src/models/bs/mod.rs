//! Closed-form Black-Scholes valuation of European options.
//!
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! d2 = d1 - σ√T
//! call = S·Φ(d1) - K·e^{-rT}·Φ(d2)
//! put  = K·e^{-rT}·Φ(-d2) - S·Φ(-d1)
//! ```

use crate::error::{ensure_finite_price, Result};
use crate::model_params::MarketParameters;
use crate::models::traits::PricingModel;
use crate::models::utils::norm_cdf;

/// Analytic Black-Scholes model for a single set of market parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesModel {
    params: MarketParameters,
}

impl BlackScholesModel {
    pub fn new(params: MarketParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    /// Returns `(d1, d2)`.
    #[allow(non_snake_case)]
    pub fn d1_d2(&self) -> (f64, f64) {
        let S = self.params.spot();
        let K = self.params.strike();
        let T = self.params.maturity();
        let sigma = self.params.sigma();
        let vol_sqrt_t = sigma * T.sqrt();
        let d1 = ((S / K).ln() + (self.params.rate() + 0.5 * sigma.powi(2)) * T) / vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }

    fn discounted_strike(&self) -> f64 {
        self.params.strike() * self.params.discount(self.params.maturity())
    }
}

impl PricingModel for BlackScholesModel {
    fn name(&self) -> &'static str {
        "black-scholes"
    }

    fn price_call(&self) -> Result<f64> {
        let (d1, d2) = self.d1_d2();
        let price = self.params.spot() * norm_cdf(d1) - self.discounted_strike() * norm_cdf(d2);
        ensure_finite_price(self.name(), price)
    }

    fn price_put(&self) -> Result<f64> {
        let (d1, d2) = self.d1_d2();
        let price = self.discounted_strike() * norm_cdf(-d2) - self.params.spot() * norm_cdf(-d1);
        ensure_finite_price(self.name(), price)
    }
}
