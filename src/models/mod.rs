pub mod binomial;
pub mod bs;
pub mod monte_carlo;

use crate::error::PricingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// European option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Call,
    Put,
}

impl OptionKind {
    pub const ALL: [OptionKind; 2] = [OptionKind::Call, OptionKind::Put];
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        })
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    /// Accepts `call`/`put` in any case, plus the `"Call Option"` / `"Put Option"` labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" | "call option" => Ok(OptionKind::Call),
            "put" | "p" | "put option" => Ok(OptionKind::Put),
            _ => Err(PricingError::InvalidOptionKind(s.to_string())),
        }
    }
}

/// The three supported valuation methodologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMethod {
    BlackScholes,
    Binomial,
    MonteCarlo,
}

impl PricingMethod {
    pub const ALL: [PricingMethod; 3] = [
        PricingMethod::BlackScholes,
        PricingMethod::Binomial,
        PricingMethod::MonteCarlo,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PricingMethod::BlackScholes => "Black-Scholes Model",
            PricingMethod::Binomial => "Binomial Model",
            PricingMethod::MonteCarlo => "Monte Carlo Simulation",
        }
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for PricingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "blackscholes" | "blackscholesmodel" | "bs" => Ok(PricingMethod::BlackScholes),
            "binomial" | "binomialmodel" | "binomialtree" => Ok(PricingMethod::Binomial),
            "montecarlo" | "montecarlosimulation" | "mc" => Ok(PricingMethod::MonteCarlo),
            _ => Err(PricingError::InvalidPricingMethod(s.to_string())),
        }
    }
}

/// Common traits used by all pricing models
pub mod traits {
    use super::OptionKind;
    use crate::error::Result;

    /// Request/response contract shared by every pricing model.
    ///
    /// Implementors supply the call- and put-specific valuation; [`price`]
    /// dispatches on the option kind.
    ///
    /// [`price`]: PricingModel::price
    pub trait PricingModel {
        /// Short model name used in logs and error messages.
        fn name(&self) -> &'static str;

        fn price_call(&self) -> Result<f64>;

        fn price_put(&self) -> Result<f64>;

        /// Prices the requested side of a European option.
        fn price(&self, kind: OptionKind) -> Result<f64> {
            match kind {
                OptionKind::Call => self.price_call(),
                OptionKind::Put => self.price_put(),
            }
        }
    }
}

/// Utility functions shared by the pricing models
pub mod utils {
    use super::OptionKind;

    /// Terminal payoff of a European option at underlying price `spot`.
    #[inline]
    pub fn payoff(kind: OptionKind, spot: f64, strike: f64) -> f64 {
        match kind {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }

    /// Standard normal cumulative distribution function.
    pub fn norm_cdf(x: f64) -> f64 {
        // 0.5 * [1 + erf(x / sqrt(2))]
        0.5 * (1.0 + libm::erf(x / std::f64::consts::SQRT_2))
    }
}
