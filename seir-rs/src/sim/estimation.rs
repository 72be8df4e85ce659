use std::{collections::BTreeMap, io};

use super::{Epicurve, Simulation};
use crate::{
    config::{Config, SolverMode},
    epidemic::CompartmentModel,
    params::FORWARD_WINDOW,
    prelude::{Count, Real, Result, Time},
    progress::Progress,
    series::{add_days, align_confirmed, write_rows, Observation, SequenceAligner},
    solver::{Estimate, IntervalSolver, RollingSolver, VaccinationSeries},
    utils::{PointStats, PointStatsAcc, Stats, Window},
};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// R0 estimates of a confirmed series keyed by date.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationReport {
    /// Date of the first estimate.
    pub first_date: NaiveDate,
    /// Days the model was advanced before the first estimate.
    pub lead_days: Time,
    pub estimates: Vec<Estimate>,
    pub by_date: BTreeMap<NaiveDate, Real>,
    /// Mean of the last estimates, used for dates after the confirmed series.
    pub forward_reproduction: Real,
}

/// CSV row of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateRow {
    pub date: NaiveDate,
    pub reproduction: Real,
    pub residual: Real,
    pub cases: Count,
}

impl EstimationReport {
    pub fn date(&self, index: usize) -> NaiveDate {
        add_days(self.first_date, index as i64)
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = EstimateRow> + '_ {
        self.estimates.iter().map(move |e| EstimateRow {
            date: self.date(e.index),
            reproduction: e.reproduction,
            residual: e.residual,
            cases: e.cases,
        })
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        write_rows(writer, self.rows())
    }

    /// Summary statistics of the estimated R0 values.
    pub fn stats(&self) -> PointStats {
        let mut acc = PointStatsAcc::new();
        acc.add_many(self.estimates.iter().map(|e| e.reproduction));
        acc.stats()
    }
}

/// Mean of the last `FORWARD_WINDOW` estimates, or the fallback if there are
/// none.
pub fn forward_reproduction(estimates: &[Estimate], fallback: Real) -> Real {
    if estimates.is_empty() {
        return fallback;
    }
    let mut window = Window::new(FORWARD_WINDOW);
    window.extend(estimates.iter().map(|e| e.reproduction));
    window.mean()
}

/// Align the vaccinated series to `n` days starting at `first`.
fn align_vaccinated(
    cfg: &Config,
    observations: &[Observation],
    first: NaiveDate,
    n: usize,
) -> Result<VaccinationSeries> {
    if n == 0 {
        return Ok(VaccinationSeries::default());
    }
    let values = SequenceAligner::new(first, add_days(first, n as i64 - 1))?
        .with_baseline(0.0)
        .with_daily_increment(cfg.vaccine.daily_increment)
        .align(observations)?;
    Ok(values.into())
}

/// Estimate daily R0 values for a series of confirmed cases.
///
/// The model described by cfg starts at `cfg.run.start` and is advanced with
/// its initial R0 until the day before the first usable observation. When a
/// vaccinated series is given, the vaccinated model and solvers are used.
pub fn estimate_reproduction<P>(
    cfg: &Config,
    confirmed: &[Observation],
    vaccinated: Option<&[Observation]>,
    progress: P,
) -> Result<EstimationReport>
where
    P: Progress + 'static,
{
    cfg.validate()?;
    let alignment = align_confirmed(confirmed, cfg.run.start, cfg.run.end)?;
    let n = alignment.values.len();
    if n == 0 {
        warn!("no confirmed cases after {}", cfg.run.start);
    } else {
        info!(
            "estimating R0 for {} days from {} ({} lead days, {:?} solver, window {})",
            n,
            alignment.first_date,
            alignment.lead_days,
            cfg.solver.mode,
            cfg.window()
        );
    }

    let (mode, window, grid) = (cfg.solver.mode, cfg.window(), cfg.solver.grid);
    let values = alignment.values.clone();
    let estimates = match vaccinated {
        None => {
            let mut model = cfg.seir();
            model.step(alignment.lead_days);
            match mode {
                SolverMode::Rolling => RollingSolver::new(model, values, window)
                    .with_grid(grid)
                    .with_progress(progress)
                    .solve(),
                SolverMode::Interval => IntervalSolver::new(model, values, window)
                    .with_grid(grid)
                    .with_progress(progress)
                    .solve(),
            }
        }
        Some(observations) => {
            let series = align_vaccinated(cfg, observations, alignment.first_date, n)?;
            let mut model = cfg.seirv();
            model.step(alignment.lead_days);
            match mode {
                SolverMode::Rolling => {
                    RollingSolver::with_vaccinated(model, values, series, window)?
                        .with_grid(grid)
                        .with_progress(progress)
                        .solve()
                }
                SolverMode::Interval => {
                    IntervalSolver::with_vaccinated(model, values, series, window)?
                        .with_grid(grid)
                        .with_progress(progress)
                        .solve()
                }
            }
        }
    };

    let by_date = estimates
        .iter()
        .map(|e| (alignment.date(e.index), e.reproduction))
        .collect();
    let forward = forward_reproduction(&estimates, cfg.model.reproduction);
    info!("forward R0 = {:.2}", forward);

    Ok(EstimationReport {
        first_date: alignment.first_date,
        lead_days: alignment.lead_days,
        estimates,
        by_date,
        forward_reproduction: forward,
    })
}

/// Simulate the configured model from start to end using the estimated R0
/// values and the forward R0 for all other dates.
pub fn project<P>(
    cfg: &Config,
    report: &EstimationReport,
    vaccinated: Option<&[Observation]>,
    progress: P,
) -> Result<Epicurve>
where
    P: Progress + 'static,
{
    cfg.validate()?;
    let (start, end) = (cfg.run.start, cfg.run.end);
    let schedule = report.by_date.clone();
    let forward = report.forward_reproduction;

    match vaccinated {
        None => {
            let mut model = cfg.seir();
            model.set_reproduction(forward);
            Simulation::new(model, start)
                .with_schedule(schedule)
                .with_progress(progress)
                .run(end)
        }
        Some(observations) => {
            let n = (end - start).num_days() as usize;
            let series = align_vaccinated(cfg, observations, add_days(start, 1), n)?;
            let mut model = cfg.seirv();
            model.set_reproduction(forward);
            Simulation::with_vaccinated(model, start, series)
                .with_schedule(schedule)
                .with_progress(progress)
                .run(end)
        }
    }
}
