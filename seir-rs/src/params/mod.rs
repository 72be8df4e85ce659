//! Parameters for the compartment models.
//!
//! Parameters are plain `Copy` structs with getset accessors that can be read
//! from and written to the TOML configuration through serde. Each struct knows
//! how to validate itself, so invalid values are rejected before any
//! computation starts.
pub mod constants;
mod seir;
mod vaccine;

pub use constants::*;
pub use seir::*;
pub use vaccine::*;

use crate::prelude::Real;

/// Fail with a configuration error unless value is finite and strictly
/// positive.
pub(crate) fn check_positive(name: &'static str, value: Real) -> crate::Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(crate::Error::invalid(name, format!("must be positive, got {}", value)))
    }
}

/// Fail with a configuration error unless value is finite and non-negative.
pub(crate) fn check_non_negative(name: &'static str, value: Real) -> crate::Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(crate::Error::invalid(name, format!("must be non-negative, got {}", value)))
    }
}
