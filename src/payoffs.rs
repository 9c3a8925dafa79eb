// src/payoffs.rs
//! Option Payoff Functions
//!
//! Pure mappings from one real number to a non-negative cash payoff. The
//! input is the terminal asset value for European styles, or the arithmetic
//! path average for Asian styles; the payoff itself does not know which.

/// Enumeration of supported option payoff types
///
/// Each variant owns its strike level(s); the surrounding contract supplies
/// the market parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// Vanilla call: max(x - K, 0)
    VanillaCall { strike: f64 },

    /// Digital: 1 if x >= K, else 0
    Digital { strike: f64 },

    /// Corridor: 1 if K1 <= x <= K2, else 0
    Corridor { lower: f64, upper: f64 },
}

impl Payoff {
    /// Cash payoff for a terminal (or path-averaged) asset value
    pub fn value(&self, x: f64) -> f64 {
        match self {
            Payoff::VanillaCall { strike } => (x - strike).max(0.0),
            Payoff::Digital { strike } => {
                if x >= *strike {
                    1.0
                } else {
                    0.0
                }
            }
            Payoff::Corridor { lower, upper } => {
                if x >= *lower && x <= *upper {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Short payoff-kind label, used to build contract names
    pub fn kind(&self) -> &'static str {
        match self {
            Payoff::VanillaCall { .. } => "call",
            Payoff::Digital { .. } => "digital",
            Payoff::Corridor { .. } => "corridor",
        }
    }
}
