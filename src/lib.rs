//! # Option-Pricing-Lib: European Option Valuation
//!
//! `option-pricing-lib` computes theoretical fair values for European calls and puts
//! under three independent methodologies that share one request/response contract.
//!
//! ## Core Features
//!
//! - **Black-Scholes**: Closed-form analytic valuation
//! - **Binomial Tree**: Cox-Ross-Rubinstein lattice with backward induction
//! - **Monte Carlo**: Seeded geometric Brownian motion path simulation
//! - **Typed Errors**: Invalid inputs, arbitrage violations and state misuse are
//!   reported, never folded into a sentinel price
//!
//! ## Quick Start
//!
//! ```rust
//! use option_pricing_lib::{
//!     BinomialTreeModel, BlackScholesModel, MarketParameters, MonteCarloModel, OptionKind,
//!     PricingModel,
//! };
//!
//! let params = MarketParameters::new(100.0, 100.0, 0.2, 0.05, 1.0)?;
//!
//! let bs = BlackScholesModel::new(params);
//! let call = bs.price(OptionKind::Call)?;
//! assert!((call - 10.45).abs() < 1e-2);
//!
//! let tree = BinomialTreeModel::new(params, 500)?;
//! let put = tree.price(OptionKind::Put)?;
//! assert!((put - 5.57).abs() < 0.05);
//!
//! let mut mc = MonteCarloModel::new(params, 2_000, 12)?;
//! mc.simulate(42)?;
//! let estimate = mc.price_with_stats(OptionKind::Call)?;
//! println!("MC call = {:.4} ± {:.4}", estimate.price, estimate.std_error.unwrap_or(0.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Presets
//!
//! Step and path counts for the numerical models come from [`PricingConfig`]:
//! - `production()`: Deep trees and 100k paths
//! - `fast()`: Balanced speed/accuracy for development
//! - `research()`: Very deep trees and 1M paths
//! - `minimal()`: Quick validation settings

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod error;
pub mod model_params;
pub mod models;

// ================================================================================================
// IMPORTS
// ================================================================================================

use serde::Serialize;
use tracing::debug;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Configuration
pub use config::{BinomialConfig, MonteCarloConfig, PricingConfig};

// Errors
pub use error::{PricingError, Result};

// Market inputs
pub use model_params::MarketParameters;

// Models and the shared contract
pub use models::{
    binomial::{BinomialTreeModel, LatticeState},
    bs::BlackScholesModel,
    monte_carlo::{MonteCarloEstimate, MonteCarloModel, PathMatrix, SimulationState},
    traits::PricingModel,
    OptionKind, PricingMethod,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured step/path settings for common use cases.
///
/// # Available Configurations
///
/// - [`production()`]: Production-grade settings
/// - [`fast()`]: Development-optimized settings
/// - [`research()`]: High-precision settings for research
/// - [`minimal()`]: Quick validation settings
pub mod default_configs {
    use crate::config::PricingConfig;

    /// Production-grade configuration.
    ///
    /// **Characteristics:**
    /// - Binomial steps: 15,000
    /// - Monte Carlo paths: 100,000, one step per day to maturity
    ///
    /// # Example
    ///
    /// ```rust
    /// use option_pricing_lib::default_configs;
    ///
    /// let config = default_configs::production();
    /// assert_eq!(config.monte_carlo.num_paths, 100_000);
    /// ```
    pub fn production() -> PricingConfig {
        PricingConfig::production()
    }

    /// Fast configuration for development and testing.
    ///
    /// **Characteristics:**
    /// - Binomial steps: 1,000
    /// - Monte Carlo paths: 10,000 over 52 weekly steps
    pub fn fast() -> PricingConfig {
        PricingConfig::fast()
    }

    /// High-precision configuration for research and model validation.
    ///
    /// **Characteristics:**
    /// - Binomial steps: 100,000
    /// - Monte Carlo paths: 1,000,000, one step per day to maturity
    ///
    /// Expect multi-second runtimes.
    pub fn research() -> PricingConfig {
        PricingConfig::research()
    }

    /// Minimal configuration for quick validation and debugging.
    ///
    /// **Characteristics:**
    /// - Binomial steps: 100
    /// - Monte Carlo paths: 100 over a single step
    pub fn minimal() -> PricingConfig {
        PricingConfig::minimal()
    }
}

/// Call and put prices from one methodology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethodPrices {
    pub method: PricingMethod,
    pub call: f64,
    pub put: f64,
}

/// Call and put prices from every methodology for the same market inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSummary {
    pub params: MarketParameters,
    pub results: Vec<MethodPrices>,
}

impl PricingSummary {
    /// Prices produced by `method`, if it was run.
    pub fn get(&self, method: PricingMethod) -> Option<&MethodPrices> {
        self.results.iter().find(|r| r.method == method)
    }
}

/// Price one side of a European option with the chosen methodology.
///
/// The numerical models take their step/path counts and seed from `config`;
/// a Monte Carlo model is simulated before it is priced.
///
/// # Errors
///
/// * [`PricingError::Config`] if `config` holds zero step or path counts
/// * any error raised by the selected model
///
/// # Example
///
/// ```rust
/// use option_pricing_lib::{
///     default_configs, price_with_method, MarketParameters, OptionKind, PricingMethod,
/// };
///
/// let params = MarketParameters::new(100.0, 100.0, 0.2, 0.05, 1.0)?;
/// let method: PricingMethod = "Binomial Model".parse()?;
/// let call = price_with_method(method, params, OptionKind::Call, &default_configs::minimal())?;
/// assert!(call > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn price_with_method(
    method: PricingMethod,
    params: MarketParameters,
    kind: OptionKind,
    config: &PricingConfig,
) -> Result<f64> {
    config.validate()?;
    debug!(%method, %kind, "pricing request");
    match method {
        PricingMethod::BlackScholes => BlackScholesModel::new(params).price(kind),
        PricingMethod::Binomial => {
            BinomialTreeModel::new(params, config.binomial.steps)?.price(kind)
        }
        PricingMethod::MonteCarlo => simulated_model(params, config)?.price(kind),
    }
}

/// Price calls and puts with all three methodologies.
///
/// The Monte Carlo paths are simulated once and reused for both sides.
pub fn price_all(params: MarketParameters, config: &PricingConfig) -> Result<PricingSummary> {
    config.validate()?;

    let bs = BlackScholesModel::new(params);
    let tree = BinomialTreeModel::new(params, config.binomial.steps)?;
    let mc = simulated_model(params, config)?;

    let models: [(PricingMethod, &dyn PricingModel); 3] = [
        (PricingMethod::BlackScholes, &bs),
        (PricingMethod::Binomial, &tree),
        (PricingMethod::MonteCarlo, &mc),
    ];

    let results = models
        .into_iter()
        .map(|(method, model)| {
            Ok(MethodPrices {
                method,
                call: model.price_call()?,
                put: model.price_put()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PricingSummary { params, results })
}

fn simulated_model(params: MarketParameters, config: &PricingConfig) -> Result<MonteCarloModel> {
    let mc_config = &config.monte_carlo;
    let mut model = match mc_config.num_steps {
        Some(steps) => MonteCarloModel::new(params, mc_config.num_paths, steps)?,
        None => MonteCarloModel::daily(params, mc_config.num_paths)?,
    };
    model.simulate(mc_config.seed)?;
    Ok(model)
}
