#![allow(dead_code)] // each test binary uses a different subset

use option_pricing_lib::MarketParameters;

/// The reference scenario: S=100, K=100, r=5%, sigma=20%, T=1y.
pub const SPOT: f64 = 100.0;
pub const STRIKE: f64 = 100.0;
pub const SIGMA: f64 = 0.2;
pub const RATE: f64 = 0.05;
pub const MATURITY: f64 = 1.0;

/// Black-Scholes values for the reference scenario.
pub const BS_CALL: f64 = 10.450_583_572_185_565;
pub const BS_PUT: f64 = 5.573_526_022_256_971;

pub fn reference_params() -> MarketParameters {
    MarketParameters::new(SPOT, STRIKE, SIGMA, RATE, MATURITY).expect("valid reference params")
}

pub fn params(spot: f64, strike: f64, sigma: f64, rate: f64, maturity: f64) -> MarketParameters {
    MarketParameters::new(spot, strike, sigma, rate, maturity).expect("valid params")
}

/// A small grid of valid market inputs covering ITM/ATM/OTM, low/high vol and rates.
pub fn parameter_grid() -> Vec<MarketParameters> {
    let mut grid = Vec::new();
    for &spot in &[80.0, 100.0, 125.0] {
        for &sigma in &[0.05, 0.2, 0.6] {
            for &rate in &[-0.01, 0.0, 0.05] {
                for &maturity in &[0.1, 1.0, 3.0] {
                    grid.push(params(spot, 100.0, sigma, rate, maturity));
                }
            }
        }
    }
    grid
}

/// Put-call parity right-hand side `S - K·e^{-rT}`.
pub fn parity_rhs(p: &MarketParameters) -> f64 {
    p.spot() - p.strike() * (-p.rate() * p.maturity()).exp()
}

pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() < tol,
        "{}: expected {} ± {}, got {} (diff {:.3e})",
        what,
        expected,
        tol,
        actual,
        (actual - expected).abs()
    );
}
