//! # malliavin-greeks: Monte Carlo Greeks under Black-Scholes
//!
//! A Rust library for pricing option contracts and estimating their
//! sensitivities ("Greeks") by Monte Carlo simulation, comparing three
//! estimators side by side:
//!
//! - **Finite differences**: bump a parameter, reprice, build a difference
//!   quotient. Each pricing call redraws its own randomness, so the quotient
//!   is the (deliberately noisy) no-common-random-numbers baseline.
//! - **Analytic formulas**: closed-form Black-Scholes delta, vega and gamma,
//!   available for the vanilla European call only.
//! - **Malliavin weights**: a single Monte Carlo pass averaging
//!   `payoff(S_T) * weight(Z)`, where the weight comes from Malliavin
//!   calculus. No differentiation of the payoff is needed, which is what
//!   makes this estimator work for discontinuous digital and corridor
//!   payoffs where pathwise methods break down.
//!
//! ## Quick Start
//!
//! ```rust
//! use malliavin_greeks::{Derivative, Param};
//!
//! // Vanilla call: S0 = 100, K = 75, r = 5%, sigma = 20%, T = 1y
//! let call = Derivative::european_call(100.0, 75.0, 0.05, 0.2, 1.0)
//!     .expect("valid contract")
//!     .with_seed(42);
//!
//! let price = call.price_monte_carlo(10_000, None).expect("pricing succeeds");
//! let delta = call.greeks_malliavin(10_000, Param::Price0, 1).expect("delta");
//! let (exact_delta, _vega, _gamma) = call.greeks_exact().expect("closed form");
//!
//! assert!(price > 0.0);
//! assert!((delta - exact_delta).abs() < 0.1);
//! ```
//!
//! ## Mathematical Foundation
//!
//! The underlying follows risk-neutral geometric Brownian motion,
//! `S_T = S_0 * exp((r - sigma^2/2)T + sigma sqrt(T) Z)` with `Z ~ N(0,1)`.
//! Prices are discounted expected payoffs estimated over N independent
//! draws; Asian variants discretize the Brownian path and average it.

// Module declarations
pub mod error;
pub mod rng;
pub mod math_utils;
pub mod params;
pub mod payoffs;
pub mod derivative;
pub mod mc;
pub mod analytics;
pub mod output;

// Re-export commonly used types for convenience
pub use derivative::{Derivative, Style};
pub use error::{GreeksError, GreeksResult};
pub use params::{Bump, Param, ParamSet};
pub use payoffs::Payoff;
