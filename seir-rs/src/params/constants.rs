use crate::prelude::{Real, Time};

///////////////////////////////////////////////////////////////////////////////
// Default params for COVID-19 in Germany
///////////////////////////////////////////////////////////////////////////////

pub const POPULATION: Real = 83_019_213.0;
pub const INITIAL_INFECTIOUS: Real = 1.0;
pub const INCUBATION_PERIOD: Real = 5.2;
pub const INFECTIOUS_PERIOD: Real = 2.9;
pub const REPRODUCTION: Real = 3.4;

// Vaccination
pub const VACCINE_EFFECTIVENESS: Real = 0.9;
pub const PROTECTION_DELAY: Time = 14;

// Estimation
pub const RESIDUAL_WINDOW: usize = 1;
pub const INTERVAL_DAYS: usize = 1;
pub const FORWARD_WINDOW: usize = 5;

/// Reference population for incidence rates.
pub const INCIDENCE_SCALE: Real = 100_000.0;

/// Number of days summed into incidence rates.
pub const INCIDENCE_DAYS: usize = 7;
