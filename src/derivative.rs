// src/derivative.rs
//! Derivative contract model
//!
//! A [`Derivative`] owns an immutable [`ParamSet`], a [`Payoff`] and an
//! aggregation [`Style`], and exposes the four estimation operations:
//! `price_monte_carlo`, `greeks_difference_method`, `greeks_exact` and
//! `greeks_malliavin`. The variants form a closed set dispatched through
//! the single pricing engine; there is no inheritance hierarchy to walk.
//!
//! Every operation draws fresh randomness. Fixing a base seed with
//! [`Derivative::with_seed`] makes a run reproducible, but the separate
//! pricing passes inside one finite-difference call still run on distinct
//! derived streams, so bumped and unbumped estimates never share draws.

use crate::analytics::bs_analytic;
use crate::error::{validation::*, GreeksError, GreeksResult};
use crate::mc::{finite_diff, malliavin, mc_engine};
use crate::params::{Bump, Param, ParamSet};
use crate::payoffs::Payoff;
use crate::rng;

/// How the payoff input is aggregated from the simulated dynamics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Payoff of the terminal asset value, one draw per run
    European,
    /// Payoff of the arithmetic path average over `steps` grid points
    Asian { steps: usize },
}

impl Style {
    fn label(&self) -> &'static str {
        match self {
            Style::European => "euro",
            Style::Asian { .. } => "asian",
        }
    }
}

/// An option contract together with its estimation operations
#[derive(Debug, Clone)]
pub struct Derivative {
    name: String,
    params: ParamSet,
    payoff: Payoff,
    style: Style,
    seed: Option<u64>,
}

impl Derivative {
    fn build(params: ParamSet, payoff: Payoff, style: Style) -> GreeksResult<Self> {
        if let Style::Asian { steps } = style {
            validate_steps(steps)?;
        }
        Ok(Derivative {
            name: format!("{}_{}", style.label(), payoff.kind()),
            params,
            payoff,
            style,
            seed: None,
        })
    }

    /// Vanilla European call, payoff `max(S_T - K, 0)`
    pub fn european_call(s0: f64, k: f64, r: f64, sigma: f64, t: f64) -> GreeksResult<Self> {
        Self::build(
            ParamSet::new(s0, r, sigma, t)?,
            Payoff::VanillaCall { strike: k },
            Style::European,
        )
    }

    /// European digital, paying one unit when `S_T >= K`
    pub fn digital_option(s0: f64, k: f64, r: f64, sigma: f64, t: f64) -> GreeksResult<Self> {
        Self::build(
            ParamSet::new(s0, r, sigma, t)?,
            Payoff::Digital { strike: k },
            Style::European,
        )
    }

    /// European corridor, paying one unit when `K1 <= S_T <= K2`
    pub fn corridor_option(
        s0: f64,
        k1: f64,
        k2: f64,
        r: f64,
        sigma: f64,
        t: f64,
    ) -> GreeksResult<Self> {
        Self::build(
            ParamSet::new(s0, r, sigma, t)?,
            Payoff::Corridor {
                lower: k1,
                upper: k2,
            },
            Style::European,
        )
    }

    /// Asian contract with a caller-supplied payoff applied to the path
    /// average over `steps` discretization points
    pub fn asian(
        s0: f64,
        r: f64,
        sigma: f64,
        t: f64,
        payoff: Payoff,
        steps: usize,
    ) -> GreeksResult<Self> {
        Self::build(ParamSet::new(s0, r, sigma, t)?, payoff, Style::Asian { steps })
    }

    /// Asian corridor, paying one unit when the path average lands in
    /// `[K1, K2]`
    pub fn asian_corridor(
        s0: f64,
        r: f64,
        sigma: f64,
        t: f64,
        k1: f64,
        k2: f64,
        steps: usize,
    ) -> GreeksResult<Self> {
        Self::asian(
            s0,
            r,
            sigma,
            t,
            Payoff::Corridor {
                lower: k1,
                upper: k2,
            },
            steps,
        )
    }

    /// Fix the base seed so repeated runs reproduce
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    pub fn payoff(&self) -> &Payoff {
        &self.payoff
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// Base seed for one randomness stream of the current call
    ///
    /// Without a fixed seed every stream comes straight from OS entropy.
    fn call_seed(&self, stream: u64) -> u64 {
        match self.seed {
            Some(s) => rng::mix_seed(s, stream),
            None => rng::entropy_seed(),
        }
    }

    /// Discounted Monte Carlo price estimate over `n` independent runs
    ///
    /// When a [`Bump`] is given, the named parameter is additively offset
    /// in a perturbed copy of the parameter set before anything is
    /// evaluated; the offset reaches the dynamics and the discount factor
    /// alike. The base parameter set is never mutated.
    pub fn price_monte_carlo(&self, n: usize, bump: Option<Bump>) -> GreeksResult<f64> {
        let params = match bump {
            Some(b) => self.params.bumped(b.param, b.epsilon),
            None => self.params,
        };
        mc_engine::mc_price(&params, &self.payoff, self.style, n, self.call_seed(0))
    }

    /// Finite-difference Greek estimate for `param`
    ///
    /// Order 1 is the central quotient `(P(+eps) - P(-eps)) / 2 eps`,
    /// order 2 is `(P(+eps) + P(-eps) - 2 P(0)) / eps^2`. Each price term
    /// is an independent Monte Carlo call on its own randomness stream.
    pub fn greeks_difference_method(
        &self,
        n: usize,
        epsilon: f64,
        param: Param,
        order: u32,
    ) -> GreeksResult<f64> {
        finite_diff::difference_quotient(
            |eps, stream| {
                let params = if eps == 0.0 {
                    self.params
                } else {
                    self.params.bumped(param, eps)
                };
                mc_engine::mc_price(&params, &self.payoff, self.style, n, self.call_seed(stream))
            },
            epsilon,
            order,
        )
    }

    /// Closed-form `(delta, vega, gamma)`
    ///
    /// Only the vanilla European call has a closed-form solution; every
    /// other variant fails with an unsupported-operation error rather than
    /// returning an approximation.
    pub fn greeks_exact(&self) -> GreeksResult<(f64, f64, f64)> {
        match (self.style, self.payoff) {
            (Style::European, Payoff::VanillaCall { strike }) => {
                let p = &self.params;
                let delta =
                    bs_analytic::bs_call_delta(p.price_0, strike, p.interest_rate, p.vol, p.maturity);
                let vega =
                    bs_analytic::bs_call_vega(p.price_0, strike, p.interest_rate, p.vol, p.maturity);
                let gamma =
                    bs_analytic::bs_call_gamma(p.price_0, strike, p.interest_rate, p.vol, p.maturity);
                Ok((delta, vega, gamma))
            }
            _ => Err(GreeksError::UnsupportedOperation {
                operation: "greeks_exact".to_string(),
                context: self.name.clone(),
            }),
        }
    }

    /// Malliavin-weight Greek estimate
    ///
    /// Supported pairs: `(Price0, 1)` delta, `(Vol, 1)` vega and
    /// `(Price0, 2)` gamma. `(Vol, 2)` has no defined second-order weight
    /// and fails for every variant, as does any parameter outside
    /// `{price_0, vol}`. Asian styles fail with not-implemented once the
    /// arguments themselves are valid.
    pub fn greeks_malliavin(&self, n: usize, param: Param, order: u32) -> GreeksResult<f64> {
        if !matches!(param, Param::Price0 | Param::Vol) {
            return Err(GreeksError::InvalidArgument {
                argument: "target_param".to_string(),
                reason: format!("{} is not in {{price_0, vol}}", param),
            });
        }
        validate_order(order)?;
        if param == Param::Vol && order == 2 {
            return Err(GreeksError::InvalidArgument {
                argument: "order".to_string(),
                reason: "no second-order Malliavin weight is defined for vol".to_string(),
            });
        }
        if let Style::Asian { .. } = self.style {
            return Err(GreeksError::NotImplemented {
                operation: "greeks_malliavin".to_string(),
            });
        }

        let seed = self.call_seed(0);
        match (param, order) {
            (Param::Price0, 1) => malliavin::delta(&self.params, &self.payoff, n, seed),
            (Param::Vol, 1) => malliavin::vega(&self.params, &self.payoff, n, seed),
            (Param::Price0, 2) => malliavin::gamma(&self.params, &self.payoff, n, seed),
            // All other pairs were rejected above
            _ => unreachable!("order/parameter pair already validated"),
        }
    }
}
