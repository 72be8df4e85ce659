//! Deterministic SEIR/SEIRV compartment models and estimation of the
//! time-varying basic reproduction number (R₀) from confirmed case counts.
//!
//! The crate is organized leaf-first: [`params`] holds epidemiological
//! parameters, [`models`] the discrete-time compartment models, [`solver`] the
//! grid-search R₀ estimators and [`sim`] the forward simulation and the
//! estimation pipeline that ties everything together. Date-indexed input series
//! are handled by [`series`].
pub mod config;
pub mod epidemic;
pub mod error;
pub mod models;
pub mod params;
pub mod prelude;
pub mod progress;
pub mod series;
pub mod sim;
pub mod solver;
pub mod utils;

pub use crate::epidemic::*;
pub use crate::error::{Error, Result};
