pub use crate::config::{Config, SolverMode};
pub use crate::epidemic::{CompartmentModel, Compartments, Vaccinated};
pub use crate::error::{Error, Result};
pub use crate::models::{SEIR, SEIRV};
pub use crate::params::{SEIRParams, VaccineParams};
pub use crate::progress::{LogProgress, Progress, ScaledProgress};
pub use crate::series::{Observation, SequenceAligner};
pub use crate::sim::{Epicurve, EstimationReport, Simulation};
pub use crate::solver::{Estimate, Grid, IntervalSolver, RollingSolver, VaccinationSeries};

/// Basic representation of time. This crate measures time in days.
pub type Time = u32;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

/// Head count reported by compartment models.
///
/// Signed, since Euler drift may push a compartment slightly below zero.
pub type Count = i64;

pub(crate) const INF: Real = Real::INFINITY;
pub(crate) const NAN: Real = Real::NAN;
