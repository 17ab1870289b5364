//! Cox-Ross-Rubinstein binomial lattice for European options.
//!
//! The tree has `n` steps of length `dt = T/n`, up factor `u = e^{σ√dt}` and
//! down factor `d = 1/u`. Terminal prices are computed in closed form
//! (`S·u^i·d^(n-i)`) rather than by repeated node-by-node multiplication, and the option
//! value is rolled back to the valuation date one step at a time.

use crate::error::{ensure_count, ensure_finite_price, PricingError, Result};
use crate::model_params::MarketParameters;
use crate::models::traits::PricingModel;
use crate::models::utils::payoff;
use crate::models::OptionKind;
use serde::Serialize;
use tracing::debug;

/// Per-call lattice quantities, exposed for inspection and plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatticeState {
    /// Number of time steps
    pub steps: usize,
    /// Step length in years
    pub dt: f64,
    /// Up factor `e^{σ√dt}`
    pub up: f64,
    /// Down factor `1/u`
    pub down: f64,
    /// Risk-neutral up probability
    pub probability: f64,
    /// One-step discount factor `e^{-r dt}`
    pub discount: f64,
    /// Underlying prices at maturity, most-down first (length `steps + 1`)
    pub terminal_prices: Vec<f64>,
}

impl LatticeState {
    /// Builds the lattice for `params` with `steps` time steps.
    ///
    /// # Errors
    ///
    /// * [`PricingError::DegenerateLattice`] if `u == d`
    /// * [`PricingError::Arbitrage`] if the risk-neutral probability is outside `(0, 1)`
    pub fn build(params: &MarketParameters, steps: usize) -> Result<Self> {
        let dt = params.maturity() / steps as f64;
        let up = (params.sigma() * dt.sqrt()).exp();
        let down = 1.0 / up;
        if up - down <= 0.0 {
            return Err(PricingError::DegenerateLattice { up, down });
        }

        let growth = (params.rate() * dt).exp();
        let probability = (growth - down) / (up - down);
        if !(probability > 0.0 && probability < 1.0) {
            return Err(PricingError::Arbitrage {
                probability,
                growth,
                up,
                down,
            });
        }

        // S·u^i·d^(n-i) == S·e^{σ√dt·(2i-n)}, which cannot overflow for deep trees
        let spot = params.spot();
        let log_up = params.sigma() * dt.sqrt();
        let terminal_prices = (0..=steps)
            .map(|i| spot * (log_up * (2.0 * i as f64 - steps as f64)).exp())
            .collect();

        debug!(steps, dt, up, down, probability, "built binomial lattice");

        Ok(Self {
            steps,
            dt,
            up,
            down,
            probability,
            discount: (-params.rate() * dt).exp(),
            terminal_prices,
        })
    }

    /// Option payoffs at maturity, aligned with `terminal_prices`.
    pub fn terminal_payoffs(&self, kind: OptionKind, strike: f64) -> Vec<f64> {
        self.terminal_prices
            .iter()
            .map(|&s| payoff(kind, s, strike))
            .collect()
    }

    /// Rolls `values` back through every step and returns the root value.
    ///
    /// `values` must hold `steps + 1` terminal payoffs.
    fn backward_induction(&self, mut values: Vec<f64>) -> f64 {
        let p = self.probability;
        let q = 1.0 - p;
        for m in (1..=self.steps).rev() {
            // values[..m] becomes the layer one step closer to valuation
            for j in 0..m {
                values[j] = self.discount * (p * values[j + 1] + q * values[j]);
            }
        }
        values[0]
    }
}

/// Binomial tree model with a fixed number of time steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialTreeModel {
    params: MarketParameters,
    steps: usize,
}

impl BinomialTreeModel {
    /// Creates a model with `steps >= 1` time steps.
    ///
    /// The lattice is validated eagerly so that non-arbitrage-free inputs are
    /// reported here rather than at pricing time.
    pub fn new(params: MarketParameters, steps: usize) -> Result<Self> {
        ensure_count("steps", steps)?;
        let model = Self { params, steps };
        model.lattice()?;
        Ok(model)
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Lattice quantities for this model.
    pub fn lattice(&self) -> Result<LatticeState> {
        LatticeState::build(&self.params, self.steps)
    }

    /// Underlying prices at maturity, most-down first.
    pub fn terminal_prices(&self) -> Result<Vec<f64>> {
        Ok(self.lattice()?.terminal_prices)
    }

    fn price_kind(&self, kind: OptionKind) -> Result<f64> {
        let lattice = self.lattice()?;
        let payoffs = lattice.terminal_payoffs(kind, self.params.strike());
        let price = lattice.backward_induction(payoffs);
        ensure_finite_price(self.name(), price)
    }
}

impl PricingModel for BinomialTreeModel {
    fn name(&self) -> &'static str {
        "binomial"
    }

    fn price_call(&self) -> Result<f64> {
        self.price_kind(OptionKind::Call)
    }

    fn price_put(&self) -> Result<f64> {
        self.price_kind(OptionKind::Put)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 0.2, 0.05, 1.0).unwrap()
    }

    #[test]
    fn one_step_tree_by_hand() {
        let lattice = LatticeState::build(&params(), 1).unwrap();
        let u = 0.2_f64.exp();
        let d = 1.0 / u;
        let p = (0.05_f64.exp() - d) / (u - d);
        let expected = (-0.05_f64).exp() * p * (100.0 * u - 100.0);

        let payoffs = lattice.terminal_payoffs(OptionKind::Call, 100.0);
        let value = lattice.backward_induction(payoffs);
        assert!((value - expected).abs() < 1e-12, "{} vs {}", value, expected);
    }

    #[test]
    fn terminal_prices_are_ordered_and_centered() {
        let lattice = LatticeState::build(&params(), 4).unwrap();
        assert_eq!(lattice.terminal_prices.len(), 5);
        assert!(lattice.terminal_prices.windows(2).all(|w| w[0] < w[1]));
        // even step count puts the middle node back at spot
        assert!((lattice.terminal_prices[2] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn zero_steps_rejected() {
        assert_eq!(
            BinomialTreeModel::new(params(), 0),
            Err(PricingError::InvalidDimension {
                name: "steps",
                value: 0
            })
        );
    }
}
