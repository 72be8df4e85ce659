//! Forward simulation over calendar dates and the estimation pipeline that
//! feeds it.
mod epicurve;
mod estimation;
mod simulation;

pub use epicurve::*;
pub use estimation::*;
pub use simulation::*;
