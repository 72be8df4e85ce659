//! Deterministic compartment models.
pub mod seir;
pub mod seirv;
pub use seir::*;
pub use seirv::*;
