use std::fmt;

use super::SEIR;
use crate::{
    epidemic::{CompartmentModel, Compartments, ProtectionQueue, Vaccinated},
    params::{SEIRParams, VaccineParams},
    prelude::{Real, Result, Time},
};

/// SEIR model with vaccination.
///
/// Vaccinated individuals stay in the susceptible compartment, but a fraction
/// `effectiveness` of them is out of reach of the infection once the
/// protection delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub struct SEIRV {
    seir: SEIR,
    vaccine: VaccineParams,
    queue: ProtectionQueue,
}

impl SEIRV {
    /// Add vaccination to a SEIR model with nobody vaccinated yet.
    pub fn new(seir: SEIR, vaccine: VaccineParams) -> Self {
        SEIRV::with_vaccinated(seir, 0.0, vaccine)
    }

    /// Add vaccination to a SEIR model with the given cumulative count of
    /// vaccinated individuals on day 0.
    pub fn with_vaccinated(seir: SEIR, vaccinated: Real, vaccine: VaccineParams) -> Self {
        let queue = ProtectionQueue::new(vaccine.protection_delay(), vaccinated);
        SEIRV {
            seir,
            vaccine,
            queue,
        }
    }

    pub fn seir(&self) -> &SEIR {
        &self.seir
    }

    pub fn queue(&self) -> &ProtectionQueue {
        &self.queue
    }

    pub fn validate(&self) -> Result<()> {
        self.seir.validate()?;
        self.vaccine.validate()
    }
}

impl CompartmentModel for SEIRV {
    fn population(&self) -> Real {
        self.seir.population()
    }

    fn compartments(&self) -> &Compartments {
        self.seir.compartments()
    }

    fn params(&self) -> &SEIRParams {
        self.seir.params()
    }

    fn params_mut(&mut self) -> &mut SEIRParams {
        self.seir.params_mut()
    }

    fn day(&self) -> Time {
        self.seir.day()
    }

    fn advance(&mut self) {
        let shielded = self.shielded();
        self.seir.advance_shielded(shielded);
        self.queue.roll();
    }

    fn vaccinated_count(&self) -> Option<Real> {
        Some(self.vaccinated())
    }
}

impl Vaccinated for SEIRV {
    fn vaccine(&self) -> &VaccineParams {
        &self.vaccine
    }

    fn vaccinated(&self) -> Real {
        self.queue.latest()
    }

    fn set_vaccinated(&mut self, value: Real) {
        self.queue.record(value);
    }

    fn delayed_vaccinated(&self) -> Real {
        self.queue.protected()
    }
}

impl fmt::Display for SEIRV {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.seir, f)?;
        writeln!(f, "Vaccinated:  {}", self.vaccinated())
    }
}
