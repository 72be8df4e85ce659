use crate::{
    epidemic::Vaccinated,
    prelude::{Real, Result},
    Error,
};

/// External daily input that is fed to a model before each simulated day.
pub trait DailyInput<M> {
    /// Number of days with input. None for inputs that are defined for every
    /// day.
    fn days(&self) -> Option<usize>;

    /// Apply the input of the given day to model.
    fn apply(&self, model: &mut M, index: usize);
}

/// No input.
impl<M> DailyInput<M> for () {
    fn days(&self) -> Option<usize> {
        None
    }

    fn apply(&self, _: &mut M, _: usize) {}
}

/// Cumulative count of vaccinated individuals per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaccinationSeries(Vec<Real>);

impl VaccinationSeries {
    pub fn new(values: Vec<Real>) -> Self {
        VaccinationSeries(values)
    }

    pub fn values(&self) -> &[Real] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<Real> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fail unless there is one value per confirmed value. An empty confirmed
    /// series matches anything.
    pub fn check_matches(&self, confirmed: usize) -> Result<()> {
        if confirmed > 0 && confirmed != self.len() {
            return Err(Error::LengthMismatch {
                confirmed,
                vaccinated: self.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<Real>> for VaccinationSeries {
    fn from(values: Vec<Real>) -> Self {
        VaccinationSeries(values)
    }
}

impl<M: Vaccinated> DailyInput<M> for VaccinationSeries {
    fn days(&self) -> Option<usize> {
        Some(self.len())
    }

    fn apply(&self, model: &mut M, index: usize) {
        if let Some(value) = self.get(index) {
            model.set_vaccinated(value);
        }
    }
}
