// demos/pricing_demo.rs

//! Demonstration of the three pricing methodologies
//!
//! This example shows how to:
//! 1. Build validated market parameters from a valuation and maturity date
//! 2. Price calls and puts with Black-Scholes, a binomial tree and Monte Carlo
//! 3. Inspect the lattice and a bounded slice of simulated paths
//! 4. Compare the numerical models against the analytic value
//!
//! Run with `RUST_LOG=debug cargo run --example pricing_demo` to see model internals.

use anyhow::Result;
use chrono::NaiveDate;
use option_pricing_lib::{
    default_configs, price_all, BinomialTreeModel, MarketParameters, MonteCarloModel, OptionKind,
    PricingMethod,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    println!("European Option Pricing Demo");
    println!("============================");

    // Spot would normally come from a market-data feed
    let spot = 189.84;
    let strike = 190.0;
    let valuation = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    let maturity = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    let params = MarketParameters::from_dates(spot, strike, 0.25, 0.045, valuation, maturity)?;

    println!("Spot:     {:.2}", params.spot());
    println!("Strike:   {:.2}", params.strike());
    println!("Sigma:    {:.1}%", params.sigma() * 100.0);
    println!("Rate:     {:.1}%", params.rate() * 100.0);
    println!(
        "Maturity: {} days ({:.4} years)",
        params.days_to_maturity()?,
        params.maturity()
    );

    println!("\nStep 1: Pricing with every method...");
    let config = default_configs::fast();
    let summary = price_all(params, &config)?;

    println!("{:<24} {:>10} {:>10}", "Method", "Call", "Put");
    println!("{}", "-".repeat(46));
    for result in &summary.results {
        println!(
            "{:<24} {:>10.4} {:>10.4}",
            result.method.label(),
            result.call,
            result.put
        );
    }

    if let Some(bs) = summary.get(PricingMethod::BlackScholes) {
        println!("\nDeviation from Black-Scholes:");
        for result in summary.results.iter().filter(|r| r.method != bs.method) {
            println!(
                "  {:<24} call {:+.4}  put {:+.4}",
                result.method.label(),
                result.call - bs.call,
                result.put - bs.put
            );
        }
    }

    println!("\nStep 2: Inspecting a small binomial lattice...");
    let lattice = BinomialTreeModel::new(params, 4)?.lattice()?;
    println!(
        "  u = {:.6}, d = {:.6}, p = {:.6}",
        lattice.up, lattice.down, lattice.probability
    );
    println!("  Terminal prices: {:.2?}", lattice.terminal_prices);

    println!("\nStep 3: Monte Carlo confidence interval and sample paths...");
    let mut mc = MonteCarloModel::daily(params, 20_000)?;
    mc.simulate(config.monte_carlo.seed)?;
    for kind in OptionKind::ALL {
        let estimate = mc.price_with_stats(kind)?;
        match estimate.confidence_interval(1.96) {
            Some((lo, hi)) => println!(
                "  {:<4} {:.4}  95% CI [{:.4}, {:.4}]",
                kind,
                estimate.price,
                lo,
                hi
            ),
            None => println!("  {:<4} {:.4}", kind, estimate.price),
        }
    }

    let sample = mc.sample_paths(3)?;
    for j in 0..sample.num_paths() {
        if let Some(path) = sample.path(j) {
            let last = path.last().copied().unwrap_or(f64::NAN);
            println!(
                "  path {}: start {:.2} -> maturity {:.2} ({} points)",
                j,
                path[0],
                last,
                path.len()
            );
        }
    }

    Ok(())
}
