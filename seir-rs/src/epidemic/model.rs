use crate::{
    params::{SEIRParams, VaccineParams},
    prelude::{Count, Real, Time},
};
use paste::paste;
use serde::{Deserialize, Serialize};

/// Real-valued sizes of the S, E, I, R compartments.
///
/// Accumulators are never clamped or rounded: Euler drift may produce small
/// negative values. Models round on read.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compartments {
    pub susceptible: Real,
    pub exposed: Real,
    pub infectious: Real,
    pub removed: Real,
}

impl Compartments {
    pub fn new(susceptible: Real, exposed: Real, infectious: Real, removed: Real) -> Self {
        Compartments {
            susceptible,
            exposed,
            infectious,
            removed,
        }
    }

    /// Sum of all compartments. Equals the population up to floating point
    /// drift.
    pub fn total(&self) -> Real {
        self.susceptible + self.exposed + self.infectious + self.removed
    }

    /// Everyone that was ever infected, E + I + R.
    pub fn cases(&self) -> Real {
        self.exposed + self.infectious + self.removed
    }

    /// Advance a single day with explicit Euler integration.
    ///
    /// All fluxes are computed from the state before the step. The `shielded`
    /// individuals are removed from the susceptible pool reachable by the
    /// infection, but stay in S.
    pub fn euler_step(&mut self, population: Real, params: &SEIRParams, shielded: Real) {
        let exposure = params.exposure_flux(self.susceptible - shielded, self.infectious, population);
        let incubation = params.incubation_flux(self.exposed);
        let removal = params.removal_flux(self.infectious);

        self.susceptible -= exposure;
        self.exposed += exposure - incubation;
        self.infectious += incubation - removal;
        self.removed += removal;
    }
}

/// Round a real-valued compartment to a head count. Halfway values round to
/// the nearest even number.
#[inline]
pub fn round_count(x: Real) -> Count {
    x.round_ties_even() as Count
}

macro_rules! compartment {
    ($name:ident) => {
        paste! {
            #[doc = "Number of individuals in the `" $name "` compartment, rounded to the nearest integer."]
            fn $name(&self) -> Count {
                round_count(self.compartments().$name)
            }

            #[doc = "Real-valued size of the `" $name "` compartment."]
            fn [<$name _real>](&self) -> Real {
                self.compartments().$name
            }
        }
    };
}

/// Basic trait for deterministic compartment models of a single region.
///
/// A model owns its state and a day counter. The only way to mutate the
/// compartments is to move forward in time, either one day with advance() or
/// up to a given day with step(). The reproduction number can be changed at
/// any time and is used by all subsequent days.
pub trait CompartmentModel: Clone {
    /// Total number of individuals, fixed at construction.
    fn population(&self) -> Real;

    /// Real-valued state of the model.
    fn compartments(&self) -> &Compartments;

    fn params(&self) -> &SEIRParams;

    fn params_mut(&mut self) -> &mut SEIRParams;

    /// Number of days simulated since construction.
    fn day(&self) -> Time;

    /// Integrate exactly one day.
    fn advance(&mut self);

    compartment!(susceptible);
    compartment!(exposed);
    compartment!(infectious);
    compartment!(removed);

    /// Confirmed cases, E + I + R, each compartment rounded on read.
    fn cases(&self) -> Count {
        self.exposed() + self.infectious() + self.removed()
    }

    fn reproduction(&self) -> Real {
        self.params().reproduction()
    }

    fn set_reproduction(&mut self, value: Real) {
        self.params_mut().set_reproduction(value);
    }

    fn incubation_period(&self) -> Real {
        self.params().incubation_period()
    }

    fn infectious_period(&self) -> Real {
        self.params().infectious_period()
    }

    /// Advance simulation until the given day.
    ///
    /// Days that were already simulated are ignored, hence stepping backwards
    /// is a no-op.
    fn step(&mut self, day: Time) {
        while self.day() < day {
            self.advance();
        }
    }

    /// Latest cumulative number of vaccinated individuals, if model tracks
    /// vaccination.
    fn vaccinated_count(&self) -> Option<Real> {
        None
    }
}

/// Extension of CompartmentModel for models that remove vaccinated
/// individuals from the susceptible pool.
pub trait Vaccinated: CompartmentModel {
    fn vaccine(&self) -> &VaccineParams;

    /// Fraction of vaccinated individuals protected from infection.
    fn effectiveness(&self) -> Real {
        self.vaccine().effectiveness()
    }

    /// Days between vaccination and protection.
    fn protection_delay(&self) -> Time {
        self.vaccine().protection_delay()
    }

    /// Latest cumulative vaccinated count.
    fn vaccinated(&self) -> Real;

    /// Register the cumulative vaccinated count for the current day.
    fn set_vaccinated(&mut self, value: Real);

    /// Vaccinated count that takes effect in the next day, i.e., the value
    /// registered protection_delay() days ago.
    fn delayed_vaccinated(&self) -> Real;

    /// Individuals protected by vaccination in the next day.
    fn shielded(&self) -> Real {
        self.vaccine().protected(self.delayed_vaccinated())
    }

    /// Susceptible pool that can be reached by the infection in the next day.
    fn effective_susceptible(&self) -> Real {
        self.susceptible_real() - self.shielded()
    }
}
