//! Monte Carlo valuation under geometric Brownian motion.
//!
//! The model works in two phases. [`MonteCarloModel::simulate`] fills a
//! `(num_steps + 1) × num_paths` matrix of prices, one row per time point,
//! using the exact log-normal step. Row 0 holds the spot and row `num_steps`
//! lies exactly at maturity, so the matrix carries one more row than there are
//! steps.
//!
//!
//! ```text
//! S(t+dt) = S(t) · exp((r - σ²/2)·dt + σ·√dt·Z),   Z ~ N(0, 1)
//! ```
//!
//! and keeps it on the instance. Pricing then discounts the mean terminal
//! payoff. Pricing an instance that was never simulated fails with
//! [`PricingError::NotSimulated`].

use crate::error::{ensure_count, ensure_finite_price, PricingError, Result};
use crate::model_params::MarketParameters;
use crate::models::traits::PricingModel;
use crate::models::utils::payoff;
use crate::models::OptionKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;
use statrs::statistics::Statistics;
use tracing::{debug, info, warn};

/// Simulated prices stored row-major: row `i` holds every path at time `i·dt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl PathMatrix {
    fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Number of time points (`num_steps + 1`).
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of paths.
    pub fn num_paths(&self) -> usize {
        self.cols
    }

    /// All paths at time index `i`, or `None` past the last row.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        (i < self.rows).then(|| &self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Prices at maturity.
    pub fn terminal_row(&self) -> &[f64] {
        let start = (self.rows - 1) * self.cols;
        &self.data[start..]
    }

    /// One full path (every time point for path `j`), or `None` if out of range.
    pub fn path(&self, j: usize) -> Option<Vec<f64>> {
        (j < self.cols).then(|| {
            (0..self.rows)
                .map(|i| self.data[i * self.cols + j])
                .collect()
        })
    }

    /// Copy of the first `m` paths (all of them if `m` exceeds the path count).
    pub fn first_paths(&self, m: usize) -> PathMatrix {
        let cols = m.min(self.cols);
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            let start = i * self.cols;
            data.extend_from_slice(&self.data[start..start + cols]);
        }
        PathMatrix {
            rows: self.rows,
            cols,
            data,
        }
    }

    /// Splits out row `i - 1` (read-only) and row `i` (writable).
    fn step_rows(&mut self, i: usize) -> (&[f64], &mut [f64]) {
        let (head, tail) = self.data.split_at_mut(i * self.cols);
        (&head[(i - 1) * self.cols..], &mut tail[..self.cols])
    }
}

/// Lifecycle of a [`MonteCarloModel`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SimulationState {
    #[default]
    Uninitialized,
    Simulated(PathMatrix),
}

/// Discounted mean payoff together with its sampling error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonteCarloEstimate {
    /// Present value of the mean terminal payoff
    pub price: f64,
    /// Standard error of `price`; `None` with a single path
    pub std_error: Option<f64>,
    /// Number of paths averaged
    pub num_paths: usize,
}

impl MonteCarloEstimate {
    /// Symmetric confidence interval `price ± z·std_error`.
    pub fn confidence_interval(&self, z: f64) -> Option<(f64, f64)> {
        self.std_error
            .map(|se| (self.price - z * se, self.price + z * se))
    }
}

/// Monte Carlo model with a fixed path count and time grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloModel {
    params: MarketParameters,
    num_paths: usize,
    num_steps: usize,
    state: SimulationState,
}

impl MonteCarloModel {
    /// Creates an unsimulated model with `num_paths >= 1` and `num_steps >= 1`.
    ///
    /// # Errors
    ///
    /// * [`PricingError::InvalidDimension`] for a zero count
    /// * [`PricingError::PathMatrixTooLarge`] if `(num_steps + 1) × num_paths`
    ///   overflows `usize`
    pub fn new(params: MarketParameters, num_paths: usize, num_steps: usize) -> Result<Self> {
        let num_paths = ensure_count("num_paths", num_paths)?;
        let num_steps = ensure_count("num_steps", num_steps)?;
        num_steps
            .checked_add(1)
            .and_then(|rows| rows.checked_mul(num_paths))
            .ok_or(PricingError::PathMatrixTooLarge {
                num_steps,
                num_paths,
            })?;

        Ok(Self {
            params,
            num_paths,
            num_steps,
            state: SimulationState::Uninitialized,
        })
    }

    /// Creates a model with one time step per calendar day to maturity.
    pub fn daily(params: MarketParameters, num_paths: usize) -> Result<Self> {
        Self::new(params, num_paths, params.days_to_maturity()?)
    }

    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Step length in years.
    pub fn dt(&self) -> f64 {
        self.params.maturity() / self.num_steps as f64
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self.state, SimulationState::Simulated(_))
    }

    /// Simulates all paths with a generator seeded from `seed`.
    ///
    /// The same inputs and seed always reproduce the same matrix.
    ///
    /// # Errors
    ///
    /// [`PricingError::Numerical`] if a simulated price overflows; the previous
    /// state is kept in that case.
    pub fn simulate(&mut self, seed: u64) -> Result<&PathMatrix> {
        let mut rng = StdRng::seed_from_u64(seed);
        debug!(seed, "seeded monte carlo generator");
        self.simulate_with_rng(&mut rng)
    }

    /// Simulates all paths drawing normals from `rng`.
    ///
    /// Any previous matrix is replaced.
    pub fn simulate_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&PathMatrix> {
        let dt = self.dt();
        let sigma = self.params.sigma();
        let drift = (self.params.rate() - 0.5 * sigma * sigma) * dt;
        let vol = sigma * dt.sqrt();

        debug!(
            num_paths = self.num_paths,
            num_steps = self.num_steps,
            dt,
            "simulating gbm paths"
        );

        let mut paths = PathMatrix::filled(self.num_steps + 1, self.num_paths, self.params.spot());
        // row i depends on row i - 1, so rows are generated strictly in time order
        for i in 1..=self.num_steps {
            let (prev, next) = paths.step_rows(i);
            for (s_next, &s_prev) in next.iter_mut().zip(prev) {
                let z: f64 = rng.sample(StandardNormal);
                *s_next = s_prev * (drift + vol * z).exp();
            }
        }

        if !paths.terminal_row().iter().all(|s| s.is_finite()) {
            return Err(PricingError::Numerical(
                "simulated prices overflowed".to_string(),
            ));
        }

        info!(
            num_paths = self.num_paths,
            num_steps = self.num_steps,
            "monte carlo simulation complete"
        );

        self.state = SimulationState::Simulated(paths);
        self.paths()
    }

    /// The simulated path matrix.
    pub fn paths(&self) -> Result<&PathMatrix> {
        match &self.state {
            SimulationState::Simulated(paths) => Ok(paths),
            SimulationState::Uninitialized => Err(PricingError::NotSimulated),
        }
    }

    /// The first `m` simulated paths, for display. Does not touch the stored matrix.
    pub fn sample_paths(&self, m: usize) -> Result<PathMatrix> {
        Ok(self.paths()?.first_paths(m))
    }

    /// Undiscounted payoff of every path at maturity.
    pub fn terminal_payoffs(&self, kind: OptionKind) -> Result<Vec<f64>> {
        let strike = self.params.strike();
        Ok(self
            .paths()?
            .terminal_row()
            .iter()
            .map(|&s| payoff(kind, s, strike))
            .collect())
    }

    /// Discounted mean payoff and its standard error.
    pub fn price_with_stats(&self, kind: OptionKind) -> Result<MonteCarloEstimate> {
        if !self.is_simulated() {
            warn!(%kind, "monte carlo model priced before simulate()");
        }
        let payoffs = self.terminal_payoffs(kind)?;
        let discount = self.params.discount(self.params.maturity());

        let price = ensure_finite_price(self.name(), discount * payoffs.iter().mean())?;
        let std_error = (payoffs.len() > 1)
            .then(|| discount * payoffs.iter().std_dev() / (payoffs.len() as f64).sqrt());

        Ok(MonteCarloEstimate {
            price,
            std_error,
            num_paths: payoffs.len(),
        })
    }
}

impl PricingModel for MonteCarloModel {
    fn name(&self) -> &'static str {
        "monte-carlo"
    }

    fn price_call(&self) -> Result<f64> {
        Ok(self.price_with_stats(OptionKind::Call)?.price)
    }

    fn price_put(&self) -> Result<f64> {
        Ok(self.price_with_stats(OptionKind::Put)?.price)
    }
}
