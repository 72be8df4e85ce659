use std::fmt;

use crate::{
    epidemic::{CompartmentModel, Compartments},
    params::SEIRParams,
    prelude::{Real, Result, Time},
    Error,
};

/// The classical Susceptible, Exposed, Infectious, Removed model integrated
/// with a daily Euler step.
#[derive(Debug, Clone, PartialEq)]
pub struct SEIR {
    population: Real,
    state: Compartments,
    params: SEIRParams,
    day: Time,
}

impl SEIR {
    /// Create a new model with only susceptible and infectious individuals.
    /// The population is the sum of both.
    pub fn new(susceptible: Real, infectious: Real, params: SEIRParams) -> Self {
        SEIR::from_counts(susceptible, 0.0, infectious, 0.0, params)
    }

    /// Create a new model from the sizes of all compartments.
    pub fn from_counts(
        susceptible: Real,
        exposed: Real,
        infectious: Real,
        removed: Real,
        params: SEIRParams,
    ) -> Self {
        SEIR::from_compartments(
            Compartments::new(susceptible, exposed, infectious, removed),
            params,
        )
    }

    /// Create a new model in which everyone but the infectious seed is
    /// susceptible.
    pub fn with_population(population: Real, infectious: Real, params: SEIRParams) -> Self {
        SEIR::new(population - infectious, infectious, params)
    }

    pub fn from_compartments(state: Compartments, params: SEIRParams) -> Self {
        SEIR {
            population: state.total(),
            state,
            params,
            day: 0,
        }
    }

    /// Check that the population is positive, no compartment starts negative
    /// and params are valid.
    pub fn validate(&self) -> Result<()> {
        if !(self.population.is_finite() && self.population > 0.0) {
            return Err(Error::invalid(
                "population",
                format!("must be positive, got {}", self.population),
            ));
        }
        let st = &self.state;
        if [st.susceptible, st.exposed, st.infectious, st.removed]
            .iter()
            .any(|&x| x < 0.0)
        {
            return Err(Error::invalid("compartments", "initial sizes must be non-negative"));
        }
        self.params.validate()
    }

    /// Integrate one day keeping `shielded` individuals out of reach of the
    /// infection.
    pub(crate) fn advance_shielded(&mut self, shielded: Real) {
        self.state.euler_step(self.population, &self.params, shielded);
        self.day += 1;
    }
}

impl CompartmentModel for SEIR {
    fn population(&self) -> Real {
        self.population
    }

    fn compartments(&self) -> &Compartments {
        &self.state
    }

    fn params(&self) -> &SEIRParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut SEIRParams {
        &mut self.params
    }

    fn day(&self) -> Time {
        self.day
    }

    fn advance(&mut self) {
        self.advance_shielded(0.0);
    }
}

impl fmt::Display for SEIR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Day:         {}", self.day)?;
        writeln!(f, "Susceptible: {}", self.susceptible())?;
        writeln!(f, "Exposed:     {}", self.exposed())?;
        writeln!(f, "Infectious:  {}", self.infectious())?;
        writeln!(f, "Removed:     {}", self.removed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    fn small_town() -> SEIR {
        SEIR::new(999.0, 1.0, SEIRParams::new(5.0, 3.0, 2.5))
    }

    #[test]
    fn outbreak_in_small_town() {
        let mut m = small_town();
        m.step(30);
        assert_eq!(m.day(), 30);
        assert!(m.cases() > 1, "cases: {}", m.cases());
        assert!(m.susceptible() < 999);
    }

    #[test]
    fn population_is_conserved() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let params = SEIRParams::new(
                rng.gen_range(2.0..10.0),
                rng.gen_range(2.0..10.0),
                rng.gen_range(0.0..4.0),
            );
            let infectious = rng.gen_range(1.0..100.0);
            let mut m = SEIR::with_population(1e6, infectious, params);
            for day in 1..=200 {
                m.set_reproduction(rng.gen_range(0.0..4.0));
                m.step(day);
                let total = m.compartments().total();
                assert!((total - 1e6).abs() <= 1e-6 * 1e6, "total: {}", total);
            }
        }
    }

    #[test]
    fn backward_step_is_a_noop() {
        let mut m = small_town();
        m.step(10);
        let snapshot = m.clone();
        m.step(10);
        m.step(3);
        m.step(0);
        assert_eq!(m, snapshot);
    }

    #[test]
    fn reads_are_idempotent() {
        let mut m = small_town();
        m.step(17);
        assert_eq!(m.exposed(), m.exposed());
        assert_eq!(m.cases(), m.cases());
        assert_eq!(m.to_string(), m.to_string());
    }

    #[test]
    fn step_equals_repeated_advance() {
        let mut a = small_town();
        let mut b = small_town();
        a.step(12);
        for _ in 0..12 {
            b.advance();
        }
        assert_eq!(a, b);
    }

    #[test]
    fn reproduction_can_be_changed_at_any_time() {
        let mut m = small_town();
        m.step(5);
        m.set_reproduction(0.0);
        let susceptible = m.susceptible_real();
        m.step(10);
        assert_approx_eq!(m.susceptible_real(), susceptible);
        assert_eq!(m.reproduction(), 0.0);
    }

    #[test]
    fn first_day() {
        let mut m = SEIR::new(999.0, 1.0, SEIRParams::new(5.0, 2.0, 4.0));
        m.advance();
        let st = m.compartments();
        assert_approx_eq!(st.susceptible, 999.0 - 1.998);
        assert_approx_eq!(st.exposed, 1.998);
        assert_approx_eq!(st.infectious, 0.5);
        assert_approx_eq!(st.removed, 0.5);
        assert_eq!(m.cases(), 2);
    }

    #[test]
    fn validation() {
        assert!(small_town().validate().is_ok());
        assert!(SEIR::new(0.0, 0.0, SEIRParams::default()).validate().is_err());
        assert!(SEIR::new(10.0, -1.0, SEIRParams::default()).validate().is_err());
        assert!(SEIR::new(10.0, 1.0, SEIRParams::new(1.0, 0.0, 1.0)).validate().is_err());
    }
}
