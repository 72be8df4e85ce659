use super::{residual, DailyInput, Estimate, Fit, Grid};
use crate::{
    epidemic::CompartmentModel,
    prelude::Real,
    progress::{DynProgress, Progress, ProgressCounter},
};
use log::debug;

/// State shared by all solvers: the model, the series it is fitted to and the
/// position of the next estimate.
pub(crate) struct SolverCore<M, I> {
    pub model: M,
    pub confirmed: Vec<Real>,
    pub input: I,
    pub grid: Grid,
    pub index: usize,
    progress: DynProgress,
    counter: ProgressCounter,
}

impl<M, I> SolverCore<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    pub fn new(model: M, confirmed: Vec<Real>, input: I) -> Self {
        let counter = ProgressCounter::new(confirmed.len());
        SolverCore {
            model,
            confirmed,
            input,
            grid: Grid::default(),
            index: 0,
            progress: Box::new(()),
            counter,
        }
    }

    pub fn set_progress<P: Progress + 'static>(&mut self, progress: P) {
        self.progress = Box::new(progress);
    }

    pub fn len(&self) -> usize {
        self.confirmed.len()
    }

    /// Number of estimates not yielded yet.
    pub fn remaining(&self) -> usize {
        self.len() - self.index
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.len()
    }

    /// Search the grid for the R0 that best reproduces the next `window`
    /// confirmed values.
    pub fn search(&self, window: usize) -> Fit {
        let end = (self.index + window).min(self.len());
        let confirmed = &self.confirmed[self.index..end];
        let fit = self
            .grid
            .best_fit(|r| residual(&self.model, r, confirmed, &self.input, self.index));
        debug!(
            "index {} (day {}): R0 = {:.1}, residual = {:.3} over {} days",
            self.index,
            self.model.day(),
            fit.reproduction,
            fit.residual,
            confirmed.len()
        );
        fit
    }

    /// Advance the model one day using the given fit and emit the estimate
    /// for the current index.
    pub fn commit(&mut self, fit: Fit) -> Estimate {
        self.model.set_reproduction(fit.reproduction);
        self.input.apply(&mut self.model, self.index);
        self.model.advance();

        let estimate = Estimate {
            index: self.index,
            day: self.model.day(),
            reproduction: fit.reproduction,
            residual: fit.residual,
            cases: self.model.cases(),
        };
        self.index += 1;
        if let Some(value) = self.counter.tick(self.index) {
            self.progress.report(value);
        }
        estimate
    }
}
