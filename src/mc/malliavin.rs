// src/mc/malliavin.rs
//! Malliavin-weight Greek estimator
//!
//! # Mathematical Framework
//!
//! Malliavin calculus turns a Greek into a plain expectation,
//! `Greek = E[payoff(S_T) * weight(Z)]`, where the stochastic weight
//! absorbs the differentiation. The payoff itself is never differentiated,
//! so discontinuous digital and corridor payoffs pose no difficulty.
//!
//! For the one-step GBM terminal value the weights are:
//!
//! ```text
//! delta:  z / (sigma sqrt(T)),  result = e^(-rT) mean(payoff * w) / S0
//! vega:   z^2/sigma - z sqrt(T) - 1/sigma,  result = e^(-rT) mean(payoff * w)
//! gamma:  vega estimate / (S0^2 sigma T)
//! ```
//!
//! Each Greek is a single Monte Carlo pass of `n` draws. No differencing of
//! independently noisy price estimates takes place, which is why these
//! estimators show materially lower variance than the finite-difference
//! baseline at equal `n`.

use crate::error::{validation::*, GreeksResult};
use crate::mc::mc_engine;
use crate::params::ParamSet;
use crate::payoffs::Payoff;
use crate::rng;
use rayon::prelude::*;

fn delta_weight(params: &ParamSet, z: f64) -> f64 {
    z / (params.vol * params.maturity.sqrt())
}

fn vega_weight(params: &ParamSet, z: f64) -> f64 {
    z * z / params.vol - z * params.maturity.sqrt() - 1.0 / params.vol
}

/// Mean of `payoff(S_T(z)) * weight(z)` over `n` independent draws
fn weighted_mean<W>(
    params: &ParamSet,
    payoff: &Payoff,
    n: usize,
    seed: u64,
    weight: W,
) -> GreeksResult<f64>
where
    W: Fn(&ParamSet, f64) -> f64 + Sync,
{
    validate_sims(n)?;

    let sum = (0..n)
        .into_par_iter()
        .map(|i| {
            let mut rng = rng::seed_rng_from_u64(seed.wrapping_add(i as u64));
            let z = rng::get_normal_draw(&mut rng);
            let s_t = mc_engine::terminal_value(params, z);
            payoff.value(s_t) * weight(params, z)
        })
        .sum::<f64>();

    Ok(sum / n as f64)
}

/// Malliavin delta: `e^(-rT) * mean(payoff * z/(sigma sqrt(T))) / S0`
pub fn delta(params: &ParamSet, payoff: &Payoff, n: usize, seed: u64) -> GreeksResult<f64> {
    let mean = weighted_mean(params, payoff, n, seed, delta_weight)?;
    Ok(params.discount_factor() * mean / params.price_0)
}

/// Malliavin vega: `e^(-rT) * mean(payoff * (z^2/sigma - z sqrt(T) - 1/sigma))`
pub fn vega(params: &ParamSet, payoff: &Payoff, n: usize, seed: u64) -> GreeksResult<f64> {
    let mean = weighted_mean(params, payoff, n, seed, vega_weight)?;
    Ok(params.discount_factor() * mean)
}

/// Malliavin gamma, derived from the vega pass
///
/// Under GBM the second spot derivative relates to the volatility
/// sensitivity through `gamma = vega / (S0^2 sigma T)`; no independent
/// weight formula is used.
pub fn gamma(params: &ParamSet, payoff: &Payoff, n: usize, seed: u64) -> GreeksResult<f64> {
    let v = vega(params, payoff, n, seed)?;
    Ok(v / (params.price_0 * params.price_0 * params.vol * params.maturity))
}
