// src/mc/finite_diff.rs
//! Finite-difference Greek estimator
//!
//! Builds central difference quotients from two or three pricing calls.
//! Each call runs on its own randomness stream: the bumped-up, bumped-down
//! and unbumped estimates share no draws. This makes the quotient noisier
//! than a common-random-numbers design would be, and that is the point —
//! it is the documented comparison baseline for the Malliavin estimator,
//! not an oversight to tighten up.

use crate::error::{validation::*, GreeksError, GreeksResult};

/// Central difference quotient over independent pricing calls
///
/// `price(epsilon, stream)` must return a fresh Monte Carlo price estimate
/// for the target parameter offset by `epsilon`, drawing randomness from
/// the given stream. Order 1 uses two calls, order 2 uses three; the
/// unperturbed price of the second-order quotient is recomputed from
/// scratch, never cached.
pub fn difference_quotient<F>(price: F, epsilon: f64, order: u32) -> GreeksResult<f64>
where
    F: Fn(f64, u64) -> GreeksResult<f64>,
{
    validate_finite("epsilon", epsilon)?;
    if epsilon == 0.0 {
        return Err(GreeksError::InvalidArgument {
            argument: "epsilon".to_string(),
            reason: "must be non-zero".to_string(),
        });
    }
    validate_order(order)?;

    if order == 2 {
        return Ok(
            (price(epsilon, 1)? + price(-epsilon, 2)? - 2.0 * price(0.0, 3)?)
                / (epsilon * epsilon),
        );
    }

    Ok((price(epsilon, 1)? - price(-epsilon, 2)?) / (2.0 * epsilon))
}
