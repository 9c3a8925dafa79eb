// tests/greeks_test.rs
use approx::assert_relative_eq;
use malliavin_greeks::analytics::bs_analytic;
use malliavin_greeks::math_utils::{norm_cdf, norm_pdf};
use malliavin_greeks::{Derivative, GreeksError, Param};

const S0: f64 = 100.0;
const K: f64 = 75.0;
const R: f64 = 0.05;
const SIGMA: f64 = 0.20;
const T: f64 = 1.0;

fn call() -> Derivative {
    Derivative::european_call(S0, K, R, SIGMA, T).expect("valid contract")
}

#[test]
fn test_greeks_exact_matches_black_scholes_formulas() {
    // Recompute the formulas independently of the analytics module
    let d1 = ((S0 / K).ln() + (R + 0.5 * SIGMA * SIGMA) * T) / (SIGMA * T.sqrt());
    let expected_delta = norm_cdf(d1);
    let expected_vega = S0 * norm_pdf(d1) * T.sqrt();
    let expected_gamma = norm_pdf(d1) / (S0 * SIGMA * T.sqrt());

    let (delta, vega, gamma) = call().greeks_exact().expect("closed form exists");

    println!("\nExact delta: {}", delta);
    println!("Exact vega: {}", vega);
    println!("Exact gamma: {}", gamma);

    assert_relative_eq!(delta, expected_delta, epsilon = 1e-12);
    assert_relative_eq!(vega, expected_vega, epsilon = 1e-12);
    assert_relative_eq!(gamma, expected_gamma, epsilon = 1e-12);
}

#[test]
fn test_greeks_exact_unsupported_variants() {
    let digital = Derivative::digital_option(S0, K, R, SIGMA, T).unwrap();
    let corridor = Derivative::corridor_option(S0, 75.0, 85.0, R, SIGMA, T).unwrap();
    let asian = Derivative::asian_corridor(S0, R, SIGMA, T, 50.0, 100.0, 365).unwrap();

    for d in [&digital, &corridor, &asian] {
        let err = d.greeks_exact().unwrap_err();
        println!("{}: {}", d.name(), err);
        assert!(
            matches!(err, GreeksError::UnsupportedOperation { .. }),
            "{} should have no closed form",
            d.name()
        );
    }
}

#[test]
fn test_malliavin_delta_vs_exact() {
    let call = call().with_seed(42);
    let (exact_delta, _, _) = call.greeks_exact().unwrap();

    let mc_delta = call
        .greeks_malliavin(1_000_000, Param::Price0, 1)
        .expect("supported pair");

    let rel_error = (mc_delta - exact_delta).abs() / exact_delta;
    println!("\nMalliavin Delta: {}", mc_delta);
    println!("Exact Delta: {}", exact_delta);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.02, "Relative error exceeds 2%: {}", rel_error);
}

#[test]
fn test_malliavin_vega_vs_exact() {
    let call = call().with_seed(42);
    let (_, exact_vega, _) = call.greeks_exact().unwrap();

    let mc_vega = call
        .greeks_malliavin(1_000_000, Param::Vol, 1)
        .expect("supported pair");

    let rel_error = (mc_vega - exact_vega).abs() / exact_vega;
    println!("\nMalliavin Vega: {}", mc_vega);
    println!("Exact Vega: {}", exact_vega);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.15, "Relative error exceeds 15%: {}", rel_error);
}

#[test]
fn test_malliavin_gamma_vs_exact() {
    let call = call().with_seed(42);
    let (_, _, exact_gamma) = call.greeks_exact().unwrap();

    let mc_gamma = call
        .greeks_malliavin(1_000_000, Param::Price0, 2)
        .expect("supported pair");

    let rel_error = (mc_gamma - exact_gamma).abs() / exact_gamma;
    println!("\nMalliavin Gamma: {}", mc_gamma);
    println!("Exact Gamma: {}", exact_gamma);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.15, "Relative error exceeds 15%: {}", rel_error);
}

#[test]
fn test_finite_difference_delta_vs_exact() {
    let call = call().with_seed(42);
    let (exact_delta, _, _) = call.greeks_exact().unwrap();

    let fd_delta = call
        .greeks_difference_method(1_000_000, 1.0, Param::Price0, 1)
        .expect("valid arguments");

    let rel_error = (fd_delta - exact_delta).abs() / exact_delta;
    println!("\nFD Delta: {}", fd_delta);
    println!("Exact Delta: {}", exact_delta);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.08, "Relative error exceeds 8%: {}", rel_error);
}

#[test]
fn test_finite_difference_vega_vs_exact() {
    let call = call().with_seed(42);
    let (_, exact_vega, _) = call.greeks_exact().unwrap();

    let fd_vega = call
        .greeks_difference_method(1_000_000, 0.04, Param::Vol, 1)
        .expect("valid arguments");

    let rel_error = (fd_vega - exact_vega).abs() / exact_vega;
    println!("\nFD Vega: {}", fd_vega);
    println!("Exact Vega: {}", exact_vega);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.20, "Relative error exceeds 20%: {}", rel_error);
}

#[test]
fn test_finite_difference_gamma_vs_exact_atm() {
    // Gamma is largest at-the-money; the second-order quotient with
    // independent redraws is the noisiest estimator here, so the band is wide
    let call = Derivative::european_call(100.0, 100.0, R, SIGMA, T)
        .unwrap()
        .with_seed(42);
    let (_, _, exact_gamma) = call.greeks_exact().unwrap();

    let fd_gamma = call
        .greeks_difference_method(1_000_000, 8.0, Param::Price0, 2)
        .expect("valid arguments");

    let rel_error = (fd_gamma - exact_gamma).abs() / exact_gamma;
    println!("\nFD Gamma: {}", fd_gamma);
    println!("Exact Gamma: {}", exact_gamma);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.20, "Relative error exceeds 20%: {}", rel_error);
}

#[test]
fn test_malliavin_variance_below_finite_difference() {
    // The reason this crate exists: at equal N, Malliavin delta estimates
    // scatter far less across runs than finite-difference estimates built
    // from independently redrawn price pairs
    let n_runs = 16;
    let n_sims = 20_000;
    let epsilon = 1.0;

    let base = Derivative::european_call(100.0, 100.0, R, SIGMA, T).unwrap();

    let mut fd = Vec::with_capacity(n_runs);
    let mut mall = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let d = base.clone().with_seed(1_000 + i as u64);
        fd.push(
            d.greeks_difference_method(n_sims, epsilon, Param::Price0, 1)
                .expect("valid arguments"),
        );
        mall.push(
            d.greeks_malliavin(n_sims, Param::Price0, 1)
                .expect("supported pair"),
        );
    }

    let var = |xs: &[f64]| {
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64
    };

    let var_fd = var(&fd);
    let var_mall = var(&mall);

    println!("\nFD delta variance: {}", var_fd);
    println!("Malliavin delta variance: {}", var_mall);
    println!("Variance ratio: {}", var_fd / var_mall);

    assert!(
        var_fd > 2.0 * var_mall,
        "Expected materially lower Malliavin variance (fd {} vs malliavin {})",
        var_fd,
        var_mall
    );
}

#[test]
fn test_estimators_agree_on_delta() {
    // Both estimators converge to the same exact delta
    let call = call().with_seed(42);
    let (exact_delta, _, _) = call.greeks_exact().unwrap();

    let fd_delta = call
        .greeks_difference_method(500_000, 1.0, Param::Price0, 1)
        .unwrap();
    let mall_delta = call.greeks_malliavin(500_000, Param::Price0, 1).unwrap();

    println!("\nExact: {} | FD: {} | Malliavin: {}", exact_delta, fd_delta, mall_delta);

    assert!((fd_delta - exact_delta).abs() / exact_delta < 0.10);
    assert!((mall_delta - exact_delta).abs() / exact_delta < 0.05);
}

#[test]
fn test_malliavin_second_order_vega_invalid_for_every_variant() {
    let variants = [
        Derivative::european_call(S0, K, R, SIGMA, T).unwrap(),
        Derivative::digital_option(S0, K, R, SIGMA, T).unwrap(),
        Derivative::corridor_option(S0, 75.0, 85.0, R, SIGMA, T).unwrap(),
        Derivative::asian_corridor(S0, R, SIGMA, T, 50.0, 100.0, 365).unwrap(),
    ];

    for d in &variants {
        let err = d.greeks_malliavin(1_000, Param::Vol, 2).unwrap_err();
        println!("{}: {}", d.name(), err);
        assert!(
            matches!(err, GreeksError::InvalidArgument { .. }),
            "{} should reject (vol, order 2)",
            d.name()
        );
    }
}

#[test]
fn test_malliavin_rejects_unsupported_parameters_and_orders() {
    let call = call();

    for param in [Param::InterestRate, Param::Maturity] {
        assert!(matches!(
            call.greeks_malliavin(1_000, param, 1),
            Err(GreeksError::InvalidArgument { .. })
        ));
    }
    for order in [0, 3] {
        assert!(matches!(
            call.greeks_malliavin(1_000, Param::Price0, order),
            Err(GreeksError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_finite_difference_rejects_zero_epsilon_and_bad_order() {
    let call = call();

    assert!(matches!(
        call.greeks_difference_method(1_000, 0.0, Param::Price0, 1),
        Err(GreeksError::InvalidArgument { .. })
    ));
    assert!(matches!(
        call.greeks_difference_method(1_000, 1.0, Param::Price0, 3),
        Err(GreeksError::InvalidArgument { .. })
    ));
}

#[test]
fn test_digital_malliavin_delta_matches_analytic_digital_delta() {
    // The digital payoff is discontinuous, so only the weight-based
    // estimator is trustworthy here. Analytic digital delta is
    // e^(-rT) phi(d2) / (S sigma sqrt(T)).
    let digital = Derivative::digital_option(S0, K, R, SIGMA, T)
        .unwrap()
        .with_seed(42);

    let d2 = ((S0 / K).ln() + (R - 0.5 * SIGMA * SIGMA) * T) / (SIGMA * T.sqrt());
    let exact = (-R * T).exp() * norm_pdf(d2) / (S0 * SIGMA * T.sqrt());

    let mc_delta = digital
        .greeks_malliavin(2_000_000, Param::Price0, 1)
        .expect("supported pair");

    let rel_error = (mc_delta - exact).abs() / exact;
    println!("\nDigital Malliavin Delta: {}", mc_delta);
    println!("Analytic Digital Delta: {}", exact);
    println!("Relative Error: {}", rel_error);

    assert!(rel_error < 0.10, "Relative error exceeds 10%: {}", rel_error);
}

#[test]
fn test_asian_finite_difference_delta_is_finite() {
    // No closed form for the Asian corridor; the difference quotient must
    // at least produce a finite, moderate sensitivity
    let asian = Derivative::asian_corridor(S0, R, SIGMA, T, 50.0, 100.0, 365)
        .unwrap()
        .with_seed(42);

    let fd_delta = asian
        .greeks_difference_method(20_000, 1.0, Param::Price0, 1)
        .expect("valid arguments");

    println!("\nAsian Corridor FD Delta: {}", fd_delta);
    assert!(fd_delta.is_finite());
    assert!(fd_delta.abs() < 1.0);
}

#[test]
fn test_analytic_module_self_consistency() {
    // bs_call_delta equals the first difference quotient of bs_call_price
    let eps = 1e-4;
    let fd = (bs_analytic::bs_call_price(S0 + eps, K, R, SIGMA, T)
        - bs_analytic::bs_call_price(S0 - eps, K, R, SIGMA, T))
        / (2.0 * eps);
    assert_relative_eq!(
        fd,
        bs_analytic::bs_call_delta(S0, K, R, SIGMA, T),
        epsilon = 1e-6
    );
}
