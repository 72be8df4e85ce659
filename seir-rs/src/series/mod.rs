//! Date-indexed series of cumulative counts and their alignment to the
//! calendar of a simulation.
mod align;
mod dates;
mod io;

pub use align::*;
pub use dates::*;
pub use io::*;

use crate::{
    prelude::{Real, Result},
    Error,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A cumulative count observed at some date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Real,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Real) -> Self {
        Observation { date, value }
    }
}

impl From<(NaiveDate, Real)> for Observation {
    fn from((date, value): (NaiveDate, Real)) -> Self {
        Observation { date, value }
    }
}

/// Fail unless dates are strictly ascending.
pub fn check_ordered(observations: &[Observation]) -> Result<()> {
    match observations.windows(2).find(|w| w[0].date >= w[1].date) {
        Some(w) => Err(Error::UnorderedSeries { date: w[1].date }),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        let obs = vec![
            Observation::new(ymd(2021, 1, 1), 1.0),
            Observation::new(ymd(2021, 1, 2), 2.0),
            Observation::new(ymd(2021, 1, 2), 3.0),
        ];
        assert!(check_ordered(&obs[..2]).is_ok());
        assert!(check_ordered(&[]).is_ok());
        match check_ordered(&obs) {
            Err(Error::UnorderedSeries { date }) => assert_eq!(date, ymd(2021, 1, 2)),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
