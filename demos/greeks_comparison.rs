// demos/greeks_comparison.rs
//
// Replays the classic experiment: for a vanilla European call, sweep the
// simulation count and compare finite-difference Greeks against their
// Malliavin-weight counterparts, with the closed-form Black-Scholes values
// as the reference line. Prints the variance ratios and writes the delta
// convergence sweep to CSV.

use malliavin_greeks::math_utils::Timer;
use malliavin_greeks::output;
use malliavin_greeks::{Derivative, Param};

fn variance(xs: &[f64]) -> f64 {
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (xs.len() - 1) as f64
}

fn main() {
    // Experiment contract: S0 = 100, K = 75, r = 5%, sigma = 20%, T = 1y
    let call = Derivative::european_call(100.0, 75.0, 0.05, 0.2, 1.0).expect("valid contract");

    let (exact_delta, exact_vega, exact_gamma) = call.greeks_exact().expect("closed form");
    println!("Exact delta: {:.6}", exact_delta);
    println!("Exact vega:  {:.6}", exact_vega);
    println!("Exact gamma: {:.6}", exact_gamma);
    println!();

    let n_max = 10_000;
    let step = 250;
    let (eps_vega, eps_delta, eps_gamma) = (0.04, 8.0, 8.0);

    let mut timer = Timer::new();
    timer.start();

    let mut delta_rows = Vec::new();
    let mut fd_delta = Vec::new();
    let mut fd_vega = Vec::new();
    let mut fd_gamma = Vec::new();
    let mut mall_delta = Vec::new();
    let mut mall_vega = Vec::new();
    let mut mall_gamma = Vec::new();

    for (run, n) in (1..n_max).step_by(step).enumerate() {
        // A fresh seed per run keeps the sweep points independent
        let d = call.clone().with_seed(run as u64);

        let fd_d = d
            .greeks_difference_method(n, eps_delta, Param::Price0, 1)
            .expect("fd delta");
        let fd_v = d
            .greeks_difference_method(n, eps_vega, Param::Vol, 1)
            .expect("fd vega");
        let fd_g = d
            .greeks_difference_method(n, eps_gamma, Param::Price0, 2)
            .expect("fd gamma");

        let m_d = d.greeks_malliavin(n, Param::Price0, 1).expect("malliavin delta");
        let m_v = d.greeks_malliavin(n, Param::Vol, 1).expect("malliavin vega");
        let m_g = d.greeks_malliavin(n, Param::Price0, 2).expect("malliavin gamma");

        delta_rows.push((n, fd_d, m_d));
        fd_delta.push(fd_d);
        fd_vega.push(fd_v);
        fd_gamma.push(fd_g);
        mall_delta.push(m_d);
        mall_vega.push(m_v);
        mall_gamma.push(m_g);
    }

    let elapsed = timer.elapsed_ms();
    println!("Monte Carlo sweep time: {:.0} ms", elapsed);
    println!("{}", "*".repeat(50));
    println!("ratio_finite_difference_to_malliavin:");
    println!("- delta: {}", variance(&fd_delta) / variance(&mall_delta));
    println!("- gamma: {}", variance(&fd_gamma) / variance(&mall_gamma));
    println!("- vega:  {}", variance(&fd_vega) / variance(&mall_vega));

    std::fs::create_dir_all("results").expect("Could not create results directory");
    let csv = "results/delta_convergence.csv";
    match output::write_convergence_to_csv(csv, &delta_rows) {
        Ok(_) => println!("Delta convergence sweep written to {}", csv),
        Err(e) => eprintln!("Error writing convergence sweep: {}", e),
    }

    let exact_delta_str = exact_delta.to_string();
    let exact_vega_str = exact_vega.to_string();
    let exact_gamma_str = exact_gamma.to_string();
    let elapsed_str = elapsed.to_string();
    let summary = vec![
        ("metric", "value"),
        ("exact_delta", exact_delta_str.as_str()),
        ("exact_vega", exact_vega_str.as_str()),
        ("exact_gamma", exact_gamma_str.as_str()),
        ("sweep_time_ms", elapsed_str.as_str()),
    ];
    match output::write_summary_to_csv("results/summary.csv", &summary) {
        Ok(_) => println!("Summary written to results/summary.csv"),
        Err(e) => eprintln!("Error writing summary: {}", e),
    }
}
