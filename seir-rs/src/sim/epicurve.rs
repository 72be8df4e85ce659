use std::io;

use crate::{
    epidemic::CompartmentModel,
    params::{INCIDENCE_DAYS, INCIDENCE_SCALE},
    prelude::{Count, Real, Result, Time},
    series::write_rows,
    utils::{round_to, Window},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// State of a simulation at the end of some date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpicurveRow {
    pub date: NaiveDate,
    pub day: Time,
    pub susceptible: Count,
    pub exposed: Count,
    pub infectious: Count,
    pub removed: Count,
    pub cases: Count,
    /// New cases since the previous row. Never negative.
    pub daily: Count,
    /// Sum of the last 7 daily values per 100k inhabitants.
    pub incidence7: Real,
    pub reproduction: Real,
    pub vaccinated: Option<Real>,
    pub daily_vaccinated: Option<Real>,
}

/// Daily table of a simulated epidemic.
#[derive(Debug, Clone, PartialEq)]
pub struct Epicurve {
    population: Real,
    rows: Vec<EpicurveRow>,
    window: Window,
    last_cases: Count,
    last_vaccinated: Option<Real>,
}

impl Epicurve {
    /// Start an empty curve from the initial state of model.
    pub fn new<M: CompartmentModel>(model: &M) -> Self {
        Epicurve {
            population: model.population(),
            rows: vec![],
            window: Window::new(INCIDENCE_DAYS),
            last_cases: model.cases(),
            last_vaccinated: model.vaccinated_count(),
        }
    }

    /// Append the current state of model as the row for date.
    pub fn record<M: CompartmentModel>(&mut self, date: NaiveDate, model: &M) -> &EpicurveRow {
        let cases = model.cases();
        let daily = (cases - self.last_cases).max(0);
        self.last_cases = cases;
        self.window.add(daily as Real);

        let vaccinated = model.vaccinated_count();
        let daily_vaccinated = match (vaccinated, self.last_vaccinated) {
            (Some(v), Some(last)) => Some((v - last).max(0.0)),
            (Some(v), None) => Some(v.max(0.0)),
            _ => None,
        };
        self.last_vaccinated = vaccinated;

        self.rows.push(EpicurveRow {
            date,
            day: model.day(),
            susceptible: model.susceptible(),
            exposed: model.exposed(),
            infectious: model.infectious(),
            removed: model.removed(),
            cases,
            daily,
            incidence7: round_to(self.window.sum() / (self.population / INCIDENCE_SCALE), 2),
            reproduction: model.reproduction(),
            vaccinated,
            daily_vaccinated,
        });
        &self.rows[self.rows.len() - 1]
    }

    pub fn rows(&self) -> &[EpicurveRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&EpicurveRow> {
        self.rows.last()
    }

    /// Extract a column as a vector of reals, e.g., for plotting.
    pub fn column<F>(&self, f: F) -> Vec<Real>
    where
        F: Fn(&EpicurveRow) -> Real,
    {
        self.rows.iter().map(f).collect()
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        write_rows(writer, &self.rows)
    }

    /// Render epicurve as CSV data
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = vec![];
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::SEIR, params::SEIRParams, series::ymd};

    #[test]
    fn daily_and_incidence() {
        let mut model = SEIR::with_population(200_000.0, 50.0, SEIRParams::new(4.0, 3.0, 3.0));
        let mut curve = Epicurve::new(&model);
        let start = ymd(2021, 1, 1);
        for day in 1..=20 {
            model.step(day);
            curve.record(start + chrono::Duration::days(day as i64), &model);
        }
        assert_eq!(curve.len(), 20);

        let rows = curve.rows();
        assert!(rows.iter().all(|r| r.daily >= 0));
        assert_eq!(rows[0].daily, (rows[0].cases - 50).max(0));
        for i in 1..rows.len() {
            assert_eq!(rows[i].daily, (rows[i].cases - rows[i - 1].cases).max(0));
        }

        // 7-day sum of daily cases per 100k inhabitants (= divided by 2).
        let sum: Count = rows[13..20].iter().map(|r| r.daily).sum();
        assert_eq!(rows[19].incidence7, round_to(sum as Real / 2.0, 2));
        let sum: Count = rows[..3].iter().map(|r| r.daily).sum();
        assert_eq!(rows[2].incidence7, round_to(sum as Real / 2.0, 2));
        assert!(rows.iter().all(|r| r.vaccinated.is_none()));
    }

    #[test]
    fn csv_output() {
        let model = SEIR::new(999.0, 1.0, SEIRParams::new(5.0, 3.0, 2.5));
        let mut curve = Epicurve::new(&model);
        curve.record(ymd(2021, 1, 2), &model);
        let csv = curve.to_csv_string().unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("date,day,susceptible,exposed,infectious,removed,cases,daily,incidence7,reproduction,vaccinated,daily_vaccinated")
        );
        assert_eq!(lines.next(), Some("2021-01-02,0,999,0,1,0,1,0,0.0,2.5,,"));
        assert_eq!(curve.column(|r| r.cases as Real), vec![1.0]);
    }
}
