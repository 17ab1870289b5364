mod test_utils;

use option_pricing_lib::{
    default_configs, price_all, price_with_method, BinomialTreeModel, BlackScholesModel,
    MarketParameters, MonteCarloModel, OptionKind, PricingConfig, PricingError, PricingMethod,
    PricingModel,
};
use test_utils::{assert_close, params, reference_params, BS_CALL, BS_PUT};

/// All three methodologies agree on the reference scenario.
#[test]
fn test_price_all_methods_agree() {
    let summary = price_all(reference_params(), &default_configs::fast()).expect("price_all");
    assert_eq!(summary.results.len(), 3);

    for r in &summary.results {
        println!("{:<24} call={:.4} put={:.4}", r.method.label(), r.call, r.put);
    }

    let bs = summary.get(PricingMethod::BlackScholes).unwrap();
    assert_close(bs.call, BS_CALL, 1e-9, "bs call");
    assert_close(bs.put, BS_PUT, 1e-9, "bs put");

    let tree = summary.get(PricingMethod::Binomial).unwrap();
    assert_close(tree.call, BS_CALL, 0.05, "binomial call");
    assert_close(tree.put, BS_PUT, 0.05, "binomial put");

    // 10k paths: roughly 0.15 / 0.09 standard error for call / put
    let mc = summary.get(PricingMethod::MonteCarlo).unwrap();
    assert_close(mc.call, BS_CALL, 0.6, "monte carlo call");
    assert_close(mc.put, BS_PUT, 0.4, "monte carlo put");
}

/// Dispatch by method matches building the model directly with the same settings.
#[test]
fn test_price_with_method_matches_direct_models() {
    let p = reference_params();
    let config = default_configs::minimal();

    let bs = price_with_method(PricingMethod::BlackScholes, p, OptionKind::Call, &config).unwrap();
    assert_eq!(bs, BlackScholesModel::new(p).price_call().unwrap());

    let tree = price_with_method(PricingMethod::Binomial, p, OptionKind::Put, &config).unwrap();
    let direct_tree = BinomialTreeModel::new(p, config.binomial.steps).unwrap();
    assert_eq!(tree, direct_tree.price_put().unwrap());

    let mc = price_with_method(PricingMethod::MonteCarlo, p, OptionKind::Call, &config).unwrap();
    let mut direct_mc = MonteCarloModel::new(
        p,
        config.monte_carlo.num_paths,
        config.monte_carlo.num_steps.unwrap(),
    )
    .unwrap();
    direct_mc.simulate(config.monte_carlo.seed).unwrap();
    assert_eq!(mc.to_bits(), direct_mc.price_call().unwrap().to_bits());
}

/// String tags are validated at the boundary.
#[test]
fn test_string_tags_parse_or_fail() {
    let kind: OptionKind = "Put Option".parse().unwrap();
    let method: PricingMethod = "Black-Scholes Model".parse().unwrap();
    let price = price_with_method(method, reference_params(), kind, &PricingConfig::default());
    assert_close(price.unwrap(), BS_PUT, 1e-9, "parsed request");

    let err = "Butterfly".parse::<OptionKind>().unwrap_err();
    assert_eq!(err, PricingError::InvalidOptionKind("Butterfly".to_string()));
    assert!(err.to_string().contains("Butterfly"));

    assert!(matches!(
        "trinomial".parse::<PricingMethod>(),
        Err(PricingError::InvalidPricingMethod(_))
    ));
}

/// Invalid configs are rejected before any model runs.
#[test]
fn test_invalid_config_rejected() {
    let mut config = default_configs::minimal();
    config.monte_carlo.num_paths = 0;
    let result = price_with_method(
        PricingMethod::MonteCarlo,
        reference_params(),
        OptionKind::Call,
        &config,
    );
    assert!(matches!(result, Err(PricingError::Config(_))));
}

/// Every model collapses to intrinsic value as T -> 0.
#[test]
fn test_all_models_near_expiry() {
    let config = PricingConfig::from_toml_str(
        r#"
        [binomial]
        steps = 1

        [monte_carlo]
        num_paths = 1000
        num_steps = 1
        seed = 9
        "#,
    )
    .unwrap();

    for &(spot, strike) in &[(120.0, 100.0), (80.0, 100.0)] {
        let p = params(spot, strike, 0.3, 0.05, 1e-6);
        let summary = price_all(p, &config).unwrap();
        for r in &summary.results {
            assert_close(r.call, (spot - strike).max(0.0), 1e-2, &format!("{} call", r.method));
            assert_close(r.put, (strike - spot).max(0.0), 1e-2, &format!("{} put", r.method));
        }
    }
}

/// Arbitrage-violating inputs surface as errors through the convenience API.
#[test]
fn test_arbitrage_error_propagates() {
    let p = params(100.0, 100.0, 0.01, 0.5, 1.0);
    let mut config = default_configs::minimal();
    config.binomial.steps = 1;
    assert!(matches!(
        price_all(p, &config),
        Err(PricingError::Arbitrage { .. })
    ));
    // the analytic model has no lattice constraint
    assert!(price_with_method(PricingMethod::BlackScholes, p, OptionKind::Call, &config).is_ok());
}

/// Daily stepping follows the calendar distance to maturity.
#[test]
fn test_daily_steps_from_dates() {
    use chrono::NaiveDate;

    let valuation = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let maturity = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    let p = MarketParameters::from_dates(100.0, 95.0, 0.25, 0.03, valuation, maturity).unwrap();

    let mut model = MonteCarloModel::daily(p, 50).unwrap();
    assert_eq!(model.num_steps(), 30);
    assert_eq!(model.simulate(0).unwrap().num_rows(), 31);
}
