use super::{check_non_negative, check_positive, constants as cte};
use crate::prelude::{Real, Result};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// Epidemiological parameters of the SEIR family of models.
///
/// All periods are measured in days. The reproduction number is the only
/// parameter expected to change during a run: solvers tune it day by day.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SEIRParams {
    /// Incubation period is the average duration in the "Exposed" category.
    /// Agents are infected but *CANNOT* infect other agents.
    incubation_period: Real,

    /// Infectious period is the average duration in the "Infectious" category.
    /// Agents are infected and *CAN* infect other agents.
    infectious_period: Real,

    /// Basic reproduction number, R0.
    reproduction: Real,
}

impl SEIRParams {
    pub fn new(incubation_period: Real, infectious_period: Real, reproduction: Real) -> Self {
        SEIRParams {
            incubation_period,
            infectious_period,
            reproduction,
        }
    }

    /// Return a copy with the given R0.
    pub fn with_reproduction(mut self, reproduction: Real) -> Self {
        self.reproduction = reproduction;
        self
    }

    /// Check that periods are positive and R0 is non-negative.
    pub fn validate(&self) -> Result<()> {
        check_positive("incubation_period", self.incubation_period)?;
        check_positive("infectious_period", self.infectious_period)?;
        check_non_negative("reproduction", self.reproduction)
    }

    /// Number of new contaminations caused by each infectious individual per
    /// day in a fully susceptible population.
    #[inline]
    pub fn transmission_rate(&self) -> Real {
        self.reproduction / self.infectious_period
    }

    /// Daily flux S -> E, given the susceptible pool that can be reached by
    /// the infection.
    #[inline]
    pub fn exposure_flux(&self, susceptible: Real, infectious: Real, population: Real) -> Real {
        (susceptible / population) * self.transmission_rate() * infectious
    }

    /// Daily flux E -> I.
    #[inline]
    pub fn incubation_flux(&self, exposed: Real) -> Real {
        exposed / self.incubation_period
    }

    /// Daily flux I -> R.
    #[inline]
    pub fn removal_flux(&self, infectious: Real) -> Real {
        infectious / self.infectious_period
    }
}

impl Default for SEIRParams {
    fn default() -> Self {
        SEIRParams::new(cte::INCUBATION_PERIOD, cte::INFECTIOUS_PERIOD, cte::REPRODUCTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn fluxes() {
        let params = SEIRParams::new(5.0, 2.0, 3.0);
        assert_approx_eq!(params.transmission_rate(), 1.5);
        assert_approx_eq!(params.exposure_flux(500.0, 10.0, 1000.0), 7.5);
        assert_approx_eq!(params.incubation_flux(10.0), 2.0);
        assert_approx_eq!(params.removal_flux(10.0), 5.0);
    }

    #[test]
    fn validation() {
        assert!(SEIRParams::default().validate().is_ok());
        assert!(SEIRParams::new(0.0, 2.0, 1.0).validate().is_err());
        assert!(SEIRParams::new(5.0, -1.0, 1.0).validate().is_err());
        assert!(SEIRParams::new(5.0, 2.0, -0.1).validate().is_err());
        assert!(SEIRParams::new(5.0, 2.0, Real::NAN).validate().is_err());
        assert!(SEIRParams::new(5.0, 2.0, 0.0).validate().is_ok());
    }

    #[test]
    fn setters_and_builders() {
        let mut params = SEIRParams::default().with_reproduction(1.2);
        assert_eq!(params.reproduction(), 1.2);
        params.set_reproduction(0.8);
        assert_eq!(params.reproduction(), 0.8);
        assert_eq!(params.incubation_period(), cte::INCUBATION_PERIOD);
    }
}
