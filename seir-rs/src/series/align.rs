use super::{add_days, check_ordered, date_range, days_between, Observation};
use crate::{
    prelude::{Real, Result, Time},
    Error,
};
use chrono::NaiveDate;
use getset::CopyGetters;
use log::debug;

/// Align a series of observations to one value per calendar day.
///
/// Dates before the first observation take the baseline value, dates between
/// two observations repeat the previous one and dates after the last
/// observation grow by a constant daily increment. Observations after the end
/// date only mark the days before them as interior.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct SequenceAligner {
    start: NaiveDate,
    end: NaiveDate,
    baseline: Real,
    daily_increment: Real,
}

impl SequenceAligner {
    /// Aligner for all days from start to end, both included.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(SequenceAligner {
            start,
            end,
            baseline: 0.0,
            daily_increment: 0.0,
        })
    }

    /// Value used for dates before the first observation.
    pub fn with_baseline(mut self, baseline: Real) -> Self {
        self.baseline = baseline;
        self
    }

    /// Daily growth after the last observation.
    pub fn with_daily_increment(mut self, increment: Real) -> Self {
        self.daily_increment = increment;
        self
    }

    /// Number of aligned days.
    pub fn len(&self) -> usize {
        days_between(self.start, self.end) as usize + 1
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        date_range(self.start, self.end)
    }

    /// Produce exactly len() values, one per day.
    pub fn align(&self, observations: &[Observation]) -> Result<Vec<Real>> {
        check_ordered(observations)?;

        let mut out = Vec::with_capacity(self.len());
        let mut next = 0;
        let mut prev: Option<&Observation> = None;
        for date in self.dates() {
            while next < observations.len() && observations[next].date <= date {
                prev = Some(&observations[next]);
                next += 1;
            }
            let value = match prev {
                None => self.baseline,
                Some(obs) if next == observations.len() => {
                    obs.value + self.daily_increment * days_between(obs.date, date) as Real
                }
                Some(obs) => obs.value,
            };
            out.push(value);
        }
        debug!(
            "aligned {} observations to {} days ({} -> {})",
            observations.len(),
            out.len(),
            self.start,
            self.end
        );
        Ok(out)
    }
}

/// Expand observations into a daily series from the first to the last date,
/// repeating the previous value on missing days.
pub fn fill_gaps(observations: &[Observation]) -> Result<Vec<Observation>> {
    let (first, last) = match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Ok(vec![]),
    };
    let values = SequenceAligner::new(first, last)?.align(observations)?;
    Ok(date_range(first, last)
        .zip(values)
        .map(Observation::from)
        .collect())
}

/// Confirmed cases aligned to the calendar of a model that starts at some date.
///
/// Model day 0 is the start date, so the first usable observation is the one
/// following the start. The model must be advanced `lead_days` days before
/// the value for `first_date` can be compared with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmedAlignment {
    pub first_date: NaiveDate,
    pub lead_days: Time,
    pub values: Vec<Real>,
}

impl ConfirmedAlignment {
    /// Date of the i-th value.
    pub fn date(&self, i: usize) -> NaiveDate {
        add_days(self.first_date, i as i64)
    }

    /// Date of the last value, if any.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.values.len().checked_sub(1).map(|i| self.date(i))
    }
}

/// Align confirmed cases to a model that starts at `start`.
///
/// Observations on or before the start date and after the end date are
/// skipped, gaps are filled with the previous value.
pub fn align_confirmed(
    observations: &[Observation],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ConfirmedAlignment> {
    check_ordered(observations)?;
    let day_after = add_days(start, 1);
    let empty = ConfirmedAlignment {
        first_date: day_after,
        lead_days: 0,
        values: vec![],
    };

    let (first, last) = match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => (first.date.max(day_after), last.date.min(end)),
        _ => return Ok(empty),
    };
    if first > last {
        return Ok(empty);
    }

    let values = SequenceAligner::new(first, last)?.align(observations)?;
    Ok(ConfirmedAlignment {
        first_date: first,
        lead_days: (days_between(start, first) - 1) as Time,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ymd;

    fn obs(day: u32, value: Real) -> Observation {
        Observation::new(ymd(2021, 3, day), value)
    }

    #[test]
    fn interior_gaps_repeat_and_tail_grows() {
        let observations = vec![obs(3, 10.0), obs(4, 12.0), obs(8, 20.0)];
        let aligner = SequenceAligner::new(ymd(2021, 3, 1), ymd(2021, 3, 10))
            .unwrap()
            .with_baseline(1.0)
            .with_daily_increment(5.0);
        assert_eq!(aligner.len(), 10);

        let values = aligner.align(&observations).unwrap();
        assert_eq!(
            values,
            vec![1.0, 1.0, 10.0, 12.0, 12.0, 12.0, 12.0, 20.0, 25.0, 30.0]
        );
    }

    #[test]
    fn empty_series_is_baseline() {
        let aligner = SequenceAligner::new(ymd(2021, 3, 1), ymd(2021, 3, 3))
            .unwrap()
            .with_baseline(7.0)
            .with_daily_increment(100.0);
        assert_eq!(aligner.align(&[]).unwrap(), vec![7.0; 3]);
    }

    #[test]
    fn observations_outside_range() {
        let observations = vec![obs(1, 5.0), obs(5, 9.0), obs(20, 50.0)];
        let aligner = SequenceAligner::new(ymd(2021, 3, 3), ymd(2021, 3, 7))
            .unwrap()
            .with_daily_increment(2.0);

        // Mar 3-4 repeat the observation of Mar 1. Mar 6-7 lie before the one
        // on Mar 20, so they repeat Mar 5 instead of growing.
        let values = aligner.align(&observations).unwrap();
        assert_eq!(values, vec![5.0, 5.0, 9.0, 9.0, 9.0]);

        let all_before = SequenceAligner::new(ymd(2021, 3, 21), ymd(2021, 3, 22)).unwrap();
        let values = all_before.with_daily_increment(1.0).align(&observations).unwrap();
        assert_eq!(values, vec![51.0, 52.0]);
    }

    #[test]
    fn later_observation_keeps_gap_interior() {
        let observations = vec![obs(5, 9.0), obs(20, 50.0)];
        let aligner = SequenceAligner::new(ymd(2021, 3, 5), ymd(2021, 3, 7))
            .unwrap()
            .with_daily_increment(100.0);
        assert_eq!(aligner.align(&observations).unwrap(), vec![9.0; 3]);

        let tail = SequenceAligner::new(ymd(2021, 3, 19), ymd(2021, 3, 22))
            .unwrap()
            .with_daily_increment(100.0);
        assert_eq!(
            tail.align(&observations).unwrap(),
            vec![9.0, 50.0, 150.0, 250.0]
        );
    }

    #[test]
    fn invalid_inputs() {
        assert!(SequenceAligner::new(ymd(2021, 3, 2), ymd(2021, 3, 1)).is_err());
        let aligner = SequenceAligner::new(ymd(2021, 3, 1), ymd(2021, 3, 2)).unwrap();
        assert!(aligner.align(&[obs(2, 1.0), obs(1, 2.0)]).is_err());
    }

    #[test]
    fn gaps_are_filled() {
        let filled = fill_gaps(&[obs(1, 1.0), obs(4, 4.0)]).unwrap();
        let values: Vec<Real> = filled.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![1.0, 1.0, 1.0, 4.0]);
        assert_eq!(filled[2].date, ymd(2021, 3, 3));
        assert!(fill_gaps(&[]).unwrap().is_empty());
    }

    #[test]
    fn confirmed_after_start() {
        let observations = vec![obs(5, 1.0), obs(6, 2.0), obs(8, 4.0)];
        let aligned = align_confirmed(&observations, ymd(2021, 3, 1), ymd(2021, 3, 31)).unwrap();
        assert_eq!(aligned.first_date, ymd(2021, 3, 5));
        assert_eq!(aligned.lead_days, 3);
        assert_eq!(aligned.values, vec![1.0, 2.0, 2.0, 4.0]);
        assert_eq!(aligned.last_date(), Some(ymd(2021, 3, 8)));
    }

    #[test]
    fn confirmed_before_start() {
        let observations = vec![obs(1, 1.0), obs(2, 2.0), obs(3, 3.0), obs(4, 5.0)];
        let aligned = align_confirmed(&observations, ymd(2021, 3, 2), ymd(2021, 3, 3)).unwrap();
        assert_eq!(aligned.first_date, ymd(2021, 3, 3));
        assert_eq!(aligned.lead_days, 0);
        assert_eq!(aligned.values, vec![3.0]);

        let aligned = align_confirmed(&observations, ymd(2021, 3, 4), ymd(2021, 3, 9)).unwrap();
        assert!(aligned.values.is_empty());
        assert_eq!(aligned.last_date(), None);
    }
}
