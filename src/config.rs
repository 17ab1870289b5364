use crate::error::PricingError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Binomial lattice settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinomialConfig {
    /// Number of time steps in the tree
    #[serde(default = "default_binomial_steps")]
    pub steps: usize,
}

impl Default for BinomialConfig {
    fn default() -> Self {
        Self {
            steps: default_binomial_steps(),
        }
    }
}

/// Monte Carlo simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of simulated paths
    #[serde(default = "default_num_paths")]
    pub num_paths: usize,
    /// Number of time steps; `None` means one step per calendar day to maturity
    #[serde(default)]
    pub num_steps: Option<usize>,
    /// Random seed for reproducibility
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            num_paths: default_num_paths(),
            num_steps: None,
            seed: default_seed(),
        }
    }
}

/// Main configuration struct for the numerical pricing models
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub binomial: BinomialConfig,

    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,
}

impl PricingConfig {
    /// High accuracy settings for production valuation
    pub fn production() -> Self {
        Self {
            binomial: BinomialConfig { steps: 15_000 },
            monte_carlo: MonteCarloConfig {
                num_paths: 100_000,
                ..MonteCarloConfig::default()
            },
        }
    }

    /// Fast configuration for development and testing
    pub fn fast() -> Self {
        Self {
            binomial: BinomialConfig { steps: 1_000 },
            monte_carlo: MonteCarloConfig {
                num_paths: 10_000,
                num_steps: Some(52),
                ..MonteCarloConfig::default()
            },
        }
    }

    /// High-precision configuration for research and model validation
    pub fn research() -> Self {
        Self {
            binomial: BinomialConfig { steps: 100_000 },
            monte_carlo: MonteCarloConfig {
                num_paths: 1_000_000,
                ..MonteCarloConfig::default()
            },
        }
    }

    /// Minimal configuration for quick validation and debugging
    pub fn minimal() -> Self {
        Self {
            binomial: BinomialConfig { steps: 100 },
            monte_carlo: MonteCarloConfig {
                num_paths: 100,
                num_steps: Some(1),
                ..MonteCarloConfig::default()
            },
        }
    }

    /// Parses a TOML document; missing keys fall back to defaults.
    ///
    /// ```toml
    /// [binomial]
    /// steps = 5000
    ///
    /// [monte_carlo]
    /// num_paths = 50000
    /// num_steps = 252
    /// seed = 42
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).context("failed to parse pricing config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pricing config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid pricing config {}", path.display()))
    }

    /// Rejects zero step or path counts.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.binomial.steps == 0 {
            return Err(PricingError::Config("binomial.steps must be >= 1".into()));
        }
        if self.monte_carlo.num_paths == 0 {
            return Err(PricingError::Config(
                "monte_carlo.num_paths must be >= 1".into(),
            ));
        }
        if self.monte_carlo.num_steps == Some(0) {
            return Err(PricingError::Config(
                "monte_carlo.num_steps must be >= 1 when set".into(),
            ));
        }
        Ok(())
    }
}

fn default_binomial_steps() -> usize {
    5_000
}

fn default_num_paths() -> usize {
    10_000
}

fn default_seed() -> u64 {
    1234
}
