use super::DailyInput;
use crate::{
    epidemic::CompartmentModel,
    prelude::{Real, Result, INF},
    utils::sqr,
    Error,
};
use getset::CopyGetters;
use serde::{Deserialize, Serialize};

const GRID_EPSILON: Real = 1e-9;

/// Best candidate of a grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub reproduction: Real,
    pub residual: Real,
}

/// Regular grid of R0 candidates, `min + k / resolution` for all k such that
/// the value stays below `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, CopyGetters)]
#[serde(default)]
#[getset(get_copy = "pub")]
pub struct Grid {
    min: Real,
    max: Real,
    resolution: u32,
}

impl Grid {
    pub fn new(min: Real, max: Real, resolution: u32) -> Result<Self> {
        let grid = Grid {
            min,
            max,
            resolution,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(Error::invalid("resolution", "must be at least 1"));
        }
        if !(self.min.is_finite() && self.min >= 0.0 && self.max.is_finite() && self.min < self.max)
        {
            return Err(Error::invalid(
                "grid",
                format!("expect 0 <= min < max, got [{}, {})", self.min, self.max),
            ));
        }
        Ok(())
    }

    /// Number of candidates. Rounding noise on a max that falls exactly on
    /// the grid does not add a candidate.
    pub fn len(&self) -> usize {
        let steps = (self.max - self.min) * self.resolution as Real;
        (steps - GRID_EPSILON).ceil().max(0.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates in increasing order.
    pub fn candidates(&self) -> impl Iterator<Item = Real> {
        let Grid {
            min, resolution, ..
        } = *self;
        (0..self.len()).map(move |k| min + k as Real / resolution as Real)
    }

    /// Return the candidate with the smallest residual. Ties go to the larger
    /// candidate.
    pub fn best_fit<F>(&self, mut residual: F) -> Fit
    where
        F: FnMut(Real) -> Real,
    {
        let mut best = Fit {
            reproduction: self.min,
            residual: INF,
        };
        for reproduction in self.candidates() {
            let r = residual(reproduction);
            if r <= best.residual {
                best = Fit {
                    reproduction,
                    residual: r,
                };
            }
        }
        best
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            min: 0.0,
            max: 10.0,
            resolution: 10,
        }
    }
}

/// Sum of squared differences between confirmed cases and the cases of a copy
/// of model simulated with the given R0.
///
/// The k-th confirmed value is compared to the model after k + 1 days, with
/// the daily input for `offset + k` applied before each day.
pub fn residual<M, I>(
    model: &M,
    reproduction: Real,
    confirmed: &[Real],
    input: &I,
    offset: usize,
) -> Real
where
    M: CompartmentModel,
    I: DailyInput<M>,
{
    let mut m = model.clone();
    m.set_reproduction(reproduction);
    let mut acc = 0.0;
    for (k, &value) in confirmed.iter().enumerate() {
        input.apply(&mut m, offset + k);
        m.advance();
        acc += sqr(value - m.cases() as Real);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::SEIR, params::SEIRParams};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn default_grid() {
        let grid = Grid::default();
        let candidates: Vec<Real> = grid.candidates().collect();
        assert_eq!(candidates.len(), 100);
        assert_eq!(candidates[0], 0.0);
        assert_eq!(candidates[3], 0.3);
        assert_eq!(candidates[25], 2.5);
        assert_eq!(candidates[99], 9.9);
    }

    #[test]
    fn candidates_stay_below_max() {
        let grid = Grid::new(0.0, 0.94, 10).unwrap();
        let candidates: Vec<Real> = grid.candidates().collect();
        assert_eq!(candidates.len(), 10);
        assert_eq!(candidates[9], 0.9);

        assert_eq!(Grid::new(0.0, 0.3, 10).unwrap().len(), 3);
        assert_eq!(Grid::new(1.0, 1.05, 10).unwrap().len(), 1);
        assert!(Grid::new(0.0, 0.3, 10).unwrap().candidates().all(|r| r < 0.3));
    }

    #[test]
    fn custom_grid() {
        let grid = Grid::new(0.5, 2.0, 4).unwrap();
        let candidates: Vec<Real> = grid.candidates().collect();
        assert_eq!(candidates, vec![0.5, 0.75, 1.0, 1.25, 1.5, 1.75]);
        assert!(Grid::new(1.0, 1.0, 10).is_err());
        assert!(Grid::new(0.0, 1.0, 0).is_err());
        assert!(Grid::new(-1.0, 1.0, 10).is_err());
    }

    #[test]
    fn ties_go_to_larger_candidate() {
        let grid = Grid::default();
        let fit = grid.best_fit(|_| 1.0);
        assert_eq!(fit.reproduction, 9.9);
        assert_eq!(fit.residual, 1.0);

        let fit = grid.best_fit(|r| sqr(r - 2.0).min(0.25));
        assert_eq!(fit.reproduction, 2.0);
        assert_eq!(fit.residual, 0.0);
    }

    #[test]
    fn residual_does_not_touch_model() {
        let model = SEIR::new(999.0, 1.0, SEIRParams::new(5.0, 2.0, 4.0));
        let r = residual(&model, 4.0, &[0.0], &(), 0);
        // Day 1 has 2 cases (E = 1.998, I = R = 0.5)
        assert_approx_eq!(r, 4.0);
        assert_eq!(model.day(), 0);
        assert_eq!(model.reproduction(), 4.0);
    }
}
