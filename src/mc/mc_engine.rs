// src/mc/mc_engine.rs
//! Monte Carlo pricing engine
//!
//! One engine prices every contract variant; the payoff and the aggregation
//! style are the only specialization points. The engine works on whatever
//! [`ParamSet`] it is handed, so a bumped pricing call simply passes a
//! perturbed view and the bump flows through both the asset dynamics and
//! the discount factor.

use crate::derivative::Style;
use crate::error::{validation::*, GreeksError, GreeksResult};
use crate::params::ParamSet;
use crate::payoffs::Payoff;
use crate::rng;
use rayon::prelude::*;

/// Exact GBM terminal value `S0 * exp((r - sigma^2/2)T + sigma sqrt(T) z)`
pub(crate) fn terminal_value(params: &ParamSet, z: f64) -> f64 {
    params.price_0
        * ((params.interest_rate - 0.5 * params.vol * params.vol) * params.maturity
            + params.vol * params.maturity.sqrt() * z)
            .exp()
}

/// Arithmetic average of a discretized GBM path over its non-initial steps
///
/// Draws `steps` Brownian increments with `dt = T/steps`, evaluates the
/// exact GBM solution on the cumulative path `W_j`, and averages
/// `S_1 ... S_m`. The initial value `S_0` is excluded from the average.
fn path_average<R: rand::Rng + ?Sized>(params: &ParamSet, steps: usize, rng: &mut R) -> f64 {
    let dt = params.maturity / steps as f64;
    let sqrt_dt = dt.sqrt();
    let drift = params.interest_rate - 0.5 * params.vol * params.vol;

    let mut w = 0.0;
    let mut sum_s = 0.0;
    for j in 1..=steps {
        w += sqrt_dt * rng::get_normal_draw(rng);
        let t_j = dt * j as f64;
        sum_s += params.price_0 * (drift * t_j + params.vol * w).exp();
    }
    sum_s / steps as f64
}

/// Discounted Monte Carlo price estimate over `n` independent runs
///
/// European styles consume one normal draw per run and apply the payoff to
/// the terminal value; Asian styles discretize the Brownian path and apply
/// the payoff to the path average. Either way the estimate is
/// `exp(-r T) * mean(payoff)`, unbiased for the true discounted expectation
/// as `n` grows.
///
/// Every run seeds its own RNG from `seed` plus the run index, so the pass
/// parallelizes across runs without shared generator state.
pub fn mc_price(
    params: &ParamSet,
    payoff: &Payoff,
    style: Style,
    n: usize,
    seed: u64,
) -> GreeksResult<f64> {
    validate_sims(n)?;

    let mean_payoff = match style {
        Style::European => {
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let mut rng = rng::seed_rng_from_u64(seed.wrapping_add(i as u64));
                    let z = rng::get_normal_draw(&mut rng);
                    payoff.value(terminal_value(params, z))
                })
                .sum::<f64>()
                / n as f64
        }
        Style::Asian { steps } => {
            validate_steps(steps)?;
            (0..n)
                .into_par_iter()
                .map(|i| {
                    let mut rng = rng::seed_rng_from_u64(seed.wrapping_add(i as u64));
                    payoff.value(path_average(params, steps, &mut rng))
                })
                .sum::<f64>()
                / n as f64
        }
    };

    let price = params.discount_factor() * mean_payoff;
    if !price.is_finite() {
        return Err(GreeksError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("Price estimate is not finite: {}", price),
        });
    }

    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ParamSet {
        ParamSet::new(100.0, 0.05, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_terminal_value_at_zero_draw() {
        // z = 0 leaves only the deterministic drift
        let p = params();
        let expected = 100.0 * ((0.05 - 0.02f64) * 1.0).exp();
        assert_relative_eq!(terminal_value(&p, 0.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_terminal_value_monotone_in_draw() {
        let p = params();
        assert!(terminal_value(&p, 1.0) > terminal_value(&p, 0.0));
        assert!(terminal_value(&p, 0.0) > terminal_value(&p, -1.0));
    }

    #[test]
    fn test_mc_price_rejects_zero_sims() {
        let p = params();
        let payoff = Payoff::VanillaCall { strike: 100.0 };
        assert!(mc_price(&p, &payoff, Style::European, 0, 42).is_err());
    }

    #[test]
    fn test_mc_price_rejects_zero_steps() {
        let p = params();
        let payoff = Payoff::Corridor {
            lower: 50.0,
            upper: 100.0,
        };
        assert!(mc_price(&p, &payoff, Style::Asian { steps: 0 }, 100, 42).is_err());
    }

    #[test]
    fn test_path_average_stays_near_spot_for_low_vol() {
        let p = ParamSet::new(100.0, 0.0, 1e-6, 1.0).unwrap();
        let mut rng = rng::seed_rng_from_u64(7);
        let avg = path_average(&p, 64, &mut rng);
        assert_relative_eq!(avg, 100.0, epsilon = 1e-2);
    }
}
