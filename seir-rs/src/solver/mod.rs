//! Inverse solvers that estimate a daily reproduction number from a series
//! of confirmed cases.
//!
//! Solvers own a compartment model and drive it forward one day per yielded
//! estimate. Each estimate is the R0 of a grid that best reproduces the
//! confirmed cases in a window of days ahead of the current model day.
//!
//! ```
//! use seir::prelude::*;
//!
//! let model = SEIR::with_population(1000.0, 1.0, SEIRParams::new(5.0, 3.0, 2.5));
//! let confirmed = vec![1.0, 1.0, 2.0, 3.0, 5.0, 8.0];
//! let estimates: Vec<Estimate> = RollingSolver::new(model, confirmed, 1).collect();
//! assert_eq!(estimates.len(), 6);
//! ```
mod driver;
mod grid;
mod input;
mod interval;
mod rolling;

pub use grid::*;
pub use input::*;
pub use interval::*;
pub use rolling::*;

use crate::prelude::{Count, Real, Time};
use serde::{Deserialize, Serialize};

/// A single daily estimate produced by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Position in the confirmed series.
    pub index: usize,
    /// Model day after applying the estimate.
    pub day: Time,
    pub reproduction: Real,
    /// Sum of squared differences between confirmed and simulated cases in
    /// the residual window.
    pub residual: Real,
    /// Simulated cases after applying the estimate.
    pub cases: Count,
}
