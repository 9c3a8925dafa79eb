// src/error.rs
use std::fmt;

/// Custom error types for the malliavin-greeks library
#[derive(Debug, Clone, PartialEq)]
pub enum GreeksError {
    /// Invalid parameter values at contract construction
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid simulation configuration (path counts, step counts)
    InvalidConfiguration { field: String, reason: String },

    /// Invalid argument to an estimation call (order, target parameter,
    /// incompatible order/parameter pairs, zero epsilon)
    InvalidArgument { argument: String, reason: String },

    /// Operation with no closed-form solution for this variant
    UnsupportedOperation { operation: String, context: String },

    /// Operation not defined for this variant
    NotImplemented { operation: String },

    /// Numerical instability in an estimator
    NumericalInstability { method: String, reason: String },
}

impl fmt::Display for GreeksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreeksError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            GreeksError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            GreeksError::InvalidArgument { argument, reason } => {
                write!(f, "Invalid argument '{}': {}", argument, reason)
            }
            GreeksError::UnsupportedOperation { operation, context } => {
                write!(
                    f,
                    "Unsupported operation '{}' in context: {}",
                    operation, context
                )
            }
            GreeksError::NotImplemented { operation } => {
                write!(f, "Operation '{}' is not implemented for this variant", operation)
            }
            GreeksError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
        }
    }
}

impl std::error::Error for GreeksError {}

/// Result type alias for malliavin-greeks operations
pub type GreeksResult<T> = Result<T, GreeksError>;

/// Validation utilities
pub mod validation {
    use super::{GreeksError, GreeksResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> GreeksResult<()> {
        if value <= 0.0 {
            Err(GreeksError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> GreeksResult<()> {
        if !value.is_finite() {
            Err(GreeksError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate simulation count
    pub fn validate_sims(n: usize) -> GreeksResult<()> {
        if n == 0 {
            Err(GreeksError::InvalidConfiguration {
                field: "n_sims".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if n > 1_000_000_000 {
            Err(GreeksError::InvalidConfiguration {
                field: "n_sims".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate path discretization count for Asian styles
    pub fn validate_steps(steps: usize) -> GreeksResult<()> {
        if steps == 0 {
            Err(GreeksError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(GreeksError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate difference-quotient order
    pub fn validate_order(order: u32) -> GreeksResult<()> {
        if order != 1 && order != 2 {
            Err(GreeksError::InvalidArgument {
                argument: "order".to_string(),
                reason: format!("{} is not in {{1, 2}}", order),
            })
        } else {
            Ok(())
        }
    }
}
