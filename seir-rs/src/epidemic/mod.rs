mod model;
mod vaccines;

pub use model::*;
pub use vaccines::*;
