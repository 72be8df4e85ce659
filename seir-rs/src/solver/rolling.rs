use super::{driver::SolverCore, DailyInput, Estimate, Grid, VaccinationSeries};
use crate::{
    epidemic::{CompartmentModel, Vaccinated},
    prelude::{Real, Result},
    progress::Progress,
};
use log::warn;

/// Estimate R0 day by day, fitting a window of the following days.
///
/// For each index i, the solver searches the grid for the R0 that best
/// reproduces `confirmed[i..i + window]` starting from the current model
/// state, yields it and advances its model one day with it. Close to the end
/// of the series the window shrinks to the remaining days.
pub struct RollingSolver<M, I = ()> {
    core: SolverCore<M, I>,
    window: usize,
}

impl<M: CompartmentModel> RollingSolver<M, ()> {
    pub fn new(model: M, confirmed: Vec<Real>, window: usize) -> Self {
        RollingSolver::from_parts(model, confirmed, (), window)
    }
}

impl<M: Vaccinated> RollingSolver<M, VaccinationSeries> {
    /// Solver for a vaccinated model. The vaccinated series must have one
    /// value per confirmed value, which is applied to the model before the
    /// corresponding day.
    pub fn with_vaccinated(
        model: M,
        confirmed: Vec<Real>,
        vaccinated: VaccinationSeries,
        window: usize,
    ) -> Result<Self> {
        vaccinated.check_matches(confirmed.len())?;
        Ok(RollingSolver::from_parts(model, confirmed, vaccinated, window))
    }
}

impl<M, I> RollingSolver<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    fn from_parts(model: M, confirmed: Vec<Real>, input: I, window: usize) -> Self {
        if window == 0 {
            warn!("residual window must be at least one day, using 1");
        }
        RollingSolver {
            core: SolverCore::new(model, confirmed, input),
            window: window.max(1),
        }
    }

    /// Replace the default grid of R0 candidates.
    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.core.grid = grid;
        self
    }

    pub fn with_progress<P: Progress + 'static>(mut self, progress: P) -> Self {
        self.core.set_progress(progress);
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Model advanced by all estimates yielded so far.
    pub fn model(&self) -> &M {
        &self.core.model
    }

    pub fn into_model(self) -> M {
        self.core.model
    }

    /// Run to completion.
    pub fn solve(self) -> Vec<Estimate> {
        self.collect()
    }
}

impl<M, I> Iterator for RollingSolver<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    type Item = Estimate;

    fn next(&mut self) -> Option<Estimate> {
        if self.core.is_done() {
            return None;
        }
        let fit = self.core.search(self.window);
        Some(self.core.commit(fit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.core.remaining();
        (n, Some(n))
    }
}

impl<M, I> ExactSizeIterator for RollingSolver<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
}
