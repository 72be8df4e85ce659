use super::{driver::SolverCore, DailyInput, Estimate, Fit, Grid, VaccinationSeries};
use crate::{
    epidemic::{CompartmentModel, Vaccinated},
    prelude::{Real, Result},
    progress::Progress,
};
use log::warn;

/// Estimate a constant R0 for consecutive blocks of `interval` days.
///
/// The search runs on the first day of each block and fits all confirmed
/// values of the block. The same estimate is then yielded for every day of
/// the block while the model advances daily with it.
pub struct IntervalSolver<M, I = ()> {
    core: SolverCore<M, I>,
    interval: usize,
    current: Option<Fit>,
}

impl<M: CompartmentModel> IntervalSolver<M, ()> {
    pub fn new(model: M, confirmed: Vec<Real>, interval: usize) -> Self {
        IntervalSolver::from_parts(model, confirmed, (), interval)
    }
}

impl<M: Vaccinated> IntervalSolver<M, VaccinationSeries> {
    /// Solver for a vaccinated model. See RollingSolver::with_vaccinated().
    pub fn with_vaccinated(
        model: M,
        confirmed: Vec<Real>,
        vaccinated: VaccinationSeries,
        interval: usize,
    ) -> Result<Self> {
        vaccinated.check_matches(confirmed.len())?;
        Ok(IntervalSolver::from_parts(model, confirmed, vaccinated, interval))
    }
}

impl<M, I> IntervalSolver<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    fn from_parts(model: M, confirmed: Vec<Real>, input: I, interval: usize) -> Self {
        if interval == 0 {
            warn!("interval must be at least one day, using 1");
        }
        IntervalSolver {
            core: SolverCore::new(model, confirmed, input),
            interval: interval.max(1),
            current: None,
        }
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.core.grid = grid;
        self
    }

    pub fn with_progress<P: Progress + 'static>(mut self, progress: P) -> Self {
        self.core.set_progress(progress);
        self
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    pub fn model(&self) -> &M {
        &self.core.model
    }

    pub fn into_model(self) -> M {
        self.core.model
    }

    pub fn solve(self) -> Vec<Estimate> {
        self.collect()
    }
}

impl<M, I> Iterator for IntervalSolver<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    type Item = Estimate;

    fn next(&mut self) -> Option<Estimate> {
        if self.core.is_done() {
            return None;
        }
        let fit = match self.current {
            Some(fit) if self.core.index % self.interval != 0 => fit,
            _ => self.core.search(self.interval),
        };
        self.current = Some(fit);
        Some(self.core.commit(fit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.core.remaining();
        (n, Some(n))
    }
}

impl<M, I> ExactSizeIterator for IntervalSolver<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
}
