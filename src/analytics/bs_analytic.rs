// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! Closed forms under the risk-neutral GBM dynamics
//! `dS_t = r S_t dt + sigma S_t dW_t`, built on
//! `d1 = [ln(S/K) + (r + sigma^2/2)T] / (sigma sqrt(T))` and
//! `d2 = d1 - sigma sqrt(T)`. These serve both as the exact-Greeks
//! operation of the vanilla call and as independent oracles for the
//! Monte Carlo estimators in the test suite.

use crate::math_utils::{norm_cdf, norm_pdf};

fn d1_d2(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> (f64, f64) {
    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    (d1, d1 - sigma_sqrt_t)
}

/// Black-Scholes European call price: `S Phi(d1) - K e^(-rT) Phi(d2)`
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, d2) = d1_d2(s, k, r, sigma, t);
    s * norm_cdf(d1) - k * (-r * t).exp() * norm_cdf(d2)
}

/// Black-Scholes call delta: `Phi(d1)`
pub fn bs_call_delta(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_cdf(d1)
}

/// Black-Scholes call vega: `S phi(d1) sqrt(T)`
pub fn bs_call_vega(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    s * norm_pdf(d1) * t.sqrt()
}

/// Black-Scholes call gamma: `phi(d1) / (S sigma sqrt(T))`
pub fn bs_call_gamma(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (d1, _) = d1_d2(s, k, r, sigma, t);
    norm_pdf(d1) / (s * sigma * t.sqrt())
}

/// Cash-or-nothing digital price: `e^(-rT) Phi(d2)`
///
/// Pays one unit when `S_T >= K`; `Phi(d2)` is the risk-neutral
/// probability of finishing at or above the strike.
pub fn bs_digital_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let (_, d2) = d1_d2(s, k, r, sigma, t);
    (-r * t).exp() * norm_cdf(d2)
}

/// Corridor price: `e^(-rT) (Phi(d2(K1)) - Phi(d2(K2)))`
///
/// Pays one unit when `K1 <= S_T <= K2`, the difference of two digitals.
pub fn bs_corridor_price(s: f64, k1: f64, k2: f64, r: f64, sigma: f64, t: f64) -> f64 {
    bs_digital_price(s, k1, r, sigma, t) - bs_digital_price(s, k2, r, sigma, t)
}
