use std::collections::BTreeMap;

use super::Epicurve;
use crate::{
    epidemic::{CompartmentModel, Vaccinated},
    prelude::{Real, Result, Time},
    progress::{DynProgress, Progress, ProgressCounter},
    series::{date_range, days_between, add_days},
    solver::{DailyInput, VaccinationSeries},
    Error,
};
use chrono::NaiveDate;
use log::info;

/// Simulate a model over calendar dates.
///
/// Model day 0 corresponds to the start date. Each following date sets the
/// reproduction number from a date-indexed schedule, falling back to a fixed
/// value on dates without an entry, applies the daily input (if any) and
/// steps the model to that date.
pub struct Simulation<M, I = ()> {
    model: M,
    start: NaiveDate,
    input: I,
    schedule: BTreeMap<NaiveDate, Real>,
    fallback: Real,
    progress: DynProgress,
}

impl<M: CompartmentModel> Simulation<M, ()> {
    pub fn new(model: M, start: NaiveDate) -> Self {
        Simulation::from_parts(model, start, ())
    }
}

impl<M: Vaccinated> Simulation<M, VaccinationSeries> {
    /// Simulation of a vaccinated model. The i-th vaccinated value is applied
    /// on the (i + 1)-th day after start. The last value is kept for the
    /// remaining days.
    pub fn with_vaccinated(model: M, start: NaiveDate, vaccinated: VaccinationSeries) -> Self {
        Simulation::from_parts(model, start, vaccinated)
    }
}

impl<M, I> Simulation<M, I>
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    fn from_parts(model: M, start: NaiveDate, input: I) -> Self {
        Simulation {
            fallback: model.reproduction(),
            model,
            start,
            input,
            schedule: BTreeMap::new(),
            progress: Box::new(()),
        }
    }

    /// Use the given R0 values for the dates they contain.
    pub fn with_schedule(mut self, schedule: BTreeMap<NaiveDate, Real>) -> Self {
        self.schedule = schedule;
        self
    }

    /// R0 for dates absent from the schedule. Defaults to the initial R0 of
    /// the model.
    pub fn with_fallback(mut self, reproduction: Real) -> Self {
        self.fallback = reproduction;
        self
    }

    pub fn with_progress<P: Progress + 'static>(mut self, progress: P) -> Self {
        self.progress = Box::new(progress);
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    /// Current date of the model.
    pub fn date(&self) -> NaiveDate {
        add_days(self.start, self.model.day() as i64)
    }

    /// R0 used for the given date.
    pub fn reproduction_at(&self, date: NaiveDate) -> Real {
        self.schedule.get(&date).copied().unwrap_or(self.fallback)
    }

    /// Run from the current date of the model up to end (inclusive) and
    /// record one row per simulated date.
    pub fn run(&mut self, end: NaiveDate) -> Result<Epicurve> {
        let first = add_days(self.date(), 1);
        if end < self.date() {
            return Err(Error::InvalidRange {
                start: self.date(),
                end,
            });
        }

        let mut curve = Epicurve::new(&self.model);
        let mut counter = ProgressCounter::new(days_between(self.date(), end) as usize);
        for (n, date) in date_range(first, end).enumerate() {
            let day = days_between(self.start, date) as Time;
            self.model.set_reproduction(self.reproduction_at(date));
            self.input.apply(&mut self.model, day as usize - 1);
            self.model.step(day);
            curve.record(date, &self.model);

            if let Some(value) = counter.tick(n + 1) {
                self.progress.report(value);
            }
        }
        if let Some(row) = curve.last() {
            info!(
                "simulated {} days up to {}: {} cases, R0 = {:.2}",
                curve.len(),
                row.date,
                row.cases,
                row.reproduction
            );
        }
        Ok(curve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{SEIR, SEIRV},
        params::{SEIRParams, VaccineParams},
        series::ymd,
    };

    fn model() -> SEIR {
        SEIR::with_population(100_000.0, 10.0, SEIRParams::new(5.0, 3.0, 2.5))
    }

    #[test]
    fn one_row_per_date() {
        let mut sim = Simulation::new(model(), ymd(2021, 1, 1));
        let curve = sim.run(ymd(2021, 1, 31)).unwrap();
        assert_eq!(curve.len(), 30);
        assert_eq!(curve.rows()[0].date, ymd(2021, 1, 2));
        assert_eq!(curve.rows()[0].day, 1);
        assert_eq!(curve.last().unwrap().day, 30);
        assert_eq!(sim.date(), ymd(2021, 1, 31));
        assert!(curve.rows().iter().all(|r| r.daily >= 0));

        // Continue where the last run stopped.
        let more = sim.run(ymd(2021, 2, 2)).unwrap();
        assert_eq!(more.len(), 2);
        assert_eq!(more.rows()[0].day, 31);
        assert!(sim.run(ymd(2021, 1, 1)).is_err());
        assert!(sim.run(ymd(2021, 2, 2)).unwrap().is_empty());
    }

    #[test]
    fn schedule_overrides_fallback() {
        let schedule: BTreeMap<_, _> = vec![(ymd(2021, 1, 3), 0.5), (ymd(2021, 1, 4), 1.5)]
            .into_iter()
            .collect();
        let mut sim = Simulation::new(model(), ymd(2021, 1, 1))
            .with_schedule(schedule)
            .with_fallback(4.0);
        let curve = sim.run(ymd(2021, 1, 6)).unwrap();
        let r = curve.column(|row| row.reproduction);
        assert_eq!(r, vec![4.0, 0.5, 1.5, 4.0, 4.0]);

        let mut sim = Simulation::new(model(), ymd(2021, 1, 1));
        let curve = sim.run(ymd(2021, 1, 3)).unwrap();
        assert_eq!(curve.column(|row| row.reproduction), vec![2.5, 2.5]);
    }

    #[test]
    fn schedule_matches_manual_stepping() {
        let schedule: BTreeMap<_, _> = (1..=10)
            .map(|d| (ymd(2021, 1, 1 + d), d as Real / 4.0))
            .collect();
        let mut sim = Simulation::new(model(), ymd(2021, 1, 1)).with_schedule(schedule);
        sim.run(ymd(2021, 1, 11)).unwrap();

        let mut manual = model();
        for d in 1..=10 {
            manual.set_reproduction(d as Real / 4.0);
            manual.advance();
        }
        assert_eq!(sim.model(), &manual);
    }

    #[test]
    fn vaccinated_simulation() {
        let seirv = SEIRV::new(model(), VaccineParams::new(0.9, 3));
        let vaccinated = VaccinationSeries::new((1..=5).map(|x| 1000.0 * x as Real).collect());
        let mut sim = Simulation::with_vaccinated(seirv, ymd(2021, 1, 1), vaccinated);
        let curve = sim.run(ymd(2021, 1, 10)).unwrap();
        let v: Vec<Real> = curve.rows().iter().filter_map(|r| r.vaccinated).collect();
        assert_eq!(v.len(), 9);
        assert_eq!(&v[..5], &[1000.0, 2000.0, 3000.0, 4000.0, 5000.0]);
        assert!(v[5..].iter().all(|&x| x == 5000.0));
        assert_eq!(curve.rows()[1].daily_vaccinated, Some(1000.0));
        assert_eq!(curve.rows()[6].daily_vaccinated, Some(0.0));
    }
}
