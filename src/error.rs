//! Error taxonomy shared by every pricing model.
//!
//! Caller input errors (bad option kind, out-of-range market parameters,
//! pricing before simulating) are kept distinct from genuine arithmetic
//! failures so that neither can be mistaken for a valid price.

use thiserror::Error;

/// Errors raised by the pricing core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// Option kind tag that is neither a call nor a put.
    #[error("invalid option kind: {0:?} (expected \"call\" or \"put\")")]
    InvalidOptionKind(String),

    /// Pricing method tag that names none of the supported models.
    #[error("invalid pricing method: {0:?}")]
    InvalidPricingMethod(String),

    /// A market parameter outside its admissible range.
    #[error("invalid parameter {name}={value}: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    /// A step or path count outside its admissible range.
    #[error("invalid dimension {name}={value}: must be >= 1")]
    InvalidDimension { name: &'static str, value: usize },

    /// A path matrix whose element count does not fit in memory addressing.
    #[error("path matrix of {num_steps} steps x {num_paths} paths is too large")]
    PathMatrixTooLarge { num_steps: usize, num_paths: usize },

    /// Up and down factors collapsed onto each other.
    #[error("degenerate lattice: up factor {up} equals down factor {down}")]
    DegenerateLattice { up: f64, down: f64 },

    /// Risk-neutral probability outside (0, 1), i.e. `d < e^{r dt} < u` fails.
    #[error(
        "risk-neutral probability {probability} outside (0, 1): growth {growth} not within ({down}, {up})"
    )]
    Arbitrage {
        probability: f64,
        growth: f64,
        up: f64,
        down: f64,
    },

    /// A Monte Carlo model was priced before any paths were simulated.
    #[error("monte carlo model has not been simulated; call simulate() first")]
    NotSimulated,

    /// A computation produced a non-finite value.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Invalid pricing configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Shorthand `Result` used throughout the crate.
pub type Result<T, E = PricingError> = std::result::Result<T, E>;

/// Returns an error unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::InvalidParameter {
            name,
            value,
            constraint: "must be > 0 and finite",
        });
    }
    Ok(value)
}

/// Returns an error unless `value` is finite.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(PricingError::InvalidParameter {
            name,
            value,
            constraint: "must be finite",
        });
    }
    Ok(value)
}

/// Returns an error unless `value >= 1`.
pub(crate) fn ensure_count(name: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(PricingError::InvalidDimension { name, value });
    }
    Ok(value)
}

/// Converts a non-finite model output into [`PricingError::Numerical`].
pub(crate) fn ensure_finite_price(model: &str, price: f64) -> Result<f64> {
    if !price.is_finite() {
        return Err(PricingError::Numerical(format!(
            "{} produced a non-finite price: {}",
            model, price
        )));
    }
    Ok(price)
}
