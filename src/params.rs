// src/params.rs
//! Contract parameters and the perturbed-view mechanism
//!
//! A [`ParamSet`] is immutable once a derivative is built. Bumping never
//! mutates it: [`ParamSet::bumped`] returns a perturbed copy that the
//! pricing engine evaluates in full, discount factor included. Strike
//! levels live inside the payoff variant, not here, so they are not
//! bumpable market parameters.

use crate::error::{validation::*, GreeksResult};
use std::fmt;

/// A bumpable market parameter of the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Spot price at t = 0
    Price0,
    /// Risk-free interest rate
    InterestRate,
    /// Volatility
    Vol,
    /// Maturity in years
    Maturity,
}

impl Param {
    pub fn as_str(&self) -> &'static str {
        match self {
            Param::Price0 => "price_0",
            Param::InterestRate => "interest_rate",
            Param::Vol => "vol",
            Param::Maturity => "maturity",
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-parameter additive perturbation applied for one pricing call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bump {
    pub param: Param,
    pub epsilon: f64,
}

impl Bump {
    pub fn new(param: Param, epsilon: f64) -> Self {
        Bump { param, epsilon }
    }
}

/// Market parameters of a derivative contract
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSet {
    pub price_0: f64,
    pub interest_rate: f64,
    pub vol: f64,
    pub maturity: f64,
}

impl ParamSet {
    /// Build a validated parameter set
    ///
    /// Requires `price_0 > 0`, `vol > 0`, `maturity > 0` and a finite rate.
    pub fn new(price_0: f64, interest_rate: f64, vol: f64, maturity: f64) -> GreeksResult<Self> {
        validate_positive("price_0", price_0)?;
        validate_finite("interest_rate", interest_rate)?;
        validate_positive("vol", vol)?;
        validate_positive("maturity", maturity)?;

        Ok(ParamSet {
            price_0,
            interest_rate,
            vol,
            maturity,
        })
    }

    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::Price0 => self.price_0,
            Param::InterestRate => self.interest_rate,
            Param::Vol => self.vol,
            Param::Maturity => self.maturity,
        }
    }

    /// Perturbed copy with `param` offset by `epsilon`
    ///
    /// The base set stays untouched; the copy is not re-validated since a
    /// bump is a transient view, not a new contract.
    pub fn bumped(&self, param: Param, epsilon: f64) -> Self {
        let mut view = *self;
        match param {
            Param::Price0 => view.price_0 += epsilon,
            Param::InterestRate => view.interest_rate += epsilon,
            Param::Vol => view.vol += epsilon,
            Param::Maturity => view.maturity += epsilon,
        }
        view
    }

    /// Risk-neutral discount factor `exp(-r T)`
    pub fn discount_factor(&self) -> f64 {
        (-self.interest_rate * self.maturity).exp()
    }
}
