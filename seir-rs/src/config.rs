//! Run configuration read from TOML files.
//!
//! ```toml
//! [model]
//! population = 83019213
//! infectious = 1
//! reproduction = 3.4
//!
//! [solver]
//! mode = "interval"
//! interval_days = 7
//!
//! [run]
//! start = "2020-01-27"
//! end = "2020-12-31"
//! confirmed = "confirmed.csv"
//! ```
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    models::{SEIR, SEIRV},
    params::{check_non_negative, check_positive, constants as cte, SEIRParams, VaccineParams},
    prelude::{Real, Result, Time},
    solver::Grid,
    Error,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub verbose: bool,
    pub model: ModelConfig,
    pub vaccine: VaccineConfig,
    pub solver: SolverConfig,
    pub run: RunConfig,
}

/// Initial state and epidemiological parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    pub population: Real,
    pub infectious: Real,
    pub incubation_period: Real,
    pub infectious_period: Real,
    pub reproduction: Real,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VaccineConfig {
    pub effectiveness: Real,
    pub protection_delay: Time,
    /// Daily growth of the vaccinated count after the last observation.
    pub daily_increment: Real,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverMode {
    Rolling,
    Interval,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub mode: SolverMode,
    pub residual_window: usize,
    pub interval_days: usize,
    pub grid: Grid,
}

/// Calendar and files of a run. Paths are optional so that library users can
/// provide series directly.
///
/// Both dates default to 2020. A file that moves `start` past the default end
/// must also set `end`, otherwise validation fails with an invalid range.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub confirmed: Option<PathBuf>,
    pub vaccinated: Option<PathBuf>,
    pub estimates_output: Option<PathBuf>,
    pub epicurve_output: Option<PathBuf>,
}

impl Config {
    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Config::from_toml_str(&data)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Reject configurations that would make any computation meaningless.
    pub fn validate(&self) -> Result<()> {
        self.model.validate()?;
        self.vaccine.validate()?;
        self.solver.validate()?;
        self.run.validate()
    }

    /// Model at the start date.
    pub fn seir(&self) -> SEIR {
        self.model.seir()
    }

    /// Vaccinated model at the start date, with nobody vaccinated yet.
    pub fn seirv(&self) -> SEIRV {
        SEIRV::new(self.seir(), self.vaccine.params())
    }

    /// Residual window of the rolling solver or block size of the interval
    /// solver.
    pub fn window(&self) -> usize {
        self.solver.window()
    }
}

impl ModelConfig {
    pub fn params(&self) -> SEIRParams {
        SEIRParams::new(self.incubation_period, self.infectious_period, self.reproduction)
    }

    pub fn seir(&self) -> SEIR {
        SEIR::with_population(self.population, self.infectious, self.params())
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("population", self.population)?;
        check_non_negative("infectious", self.infectious)?;
        if self.infectious > self.population {
            return Err(Error::invalid(
                "infectious",
                format!("cannot exceed population ({})", self.population),
            ));
        }
        self.params().validate()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            population: cte::POPULATION,
            infectious: cte::INITIAL_INFECTIOUS,
            incubation_period: cte::INCUBATION_PERIOD,
            infectious_period: cte::INFECTIOUS_PERIOD,
            reproduction: cte::REPRODUCTION,
        }
    }
}

impl VaccineConfig {
    pub fn params(&self) -> VaccineParams {
        VaccineParams::new(self.effectiveness, self.protection_delay)
    }

    pub fn validate(&self) -> Result<()> {
        self.params().validate()?;
        check_non_negative("daily_increment", self.daily_increment)
    }
}

impl Default for VaccineConfig {
    fn default() -> Self {
        VaccineConfig {
            effectiveness: cte::VACCINE_EFFECTIVENESS,
            protection_delay: cte::PROTECTION_DELAY,
            daily_increment: 0.0,
        }
    }
}

impl SolverConfig {
    pub fn window(&self) -> usize {
        match self.mode {
            SolverMode::Rolling => self.residual_window,
            SolverMode::Interval => self.interval_days,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.residual_window == 0 {
            return Err(Error::invalid("residual_window", "must be at least one day"));
        }
        if self.interval_days == 0 {
            return Err(Error::invalid("interval_days", "must be at least one day"));
        }
        self.grid.validate()
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            mode: SolverMode::Rolling,
            residual_window: cte::RESIDUAL_WINDOW,
            interval_days: cte::INTERVAL_DAYS,
            grid: Grid::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(Error::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            start: NaiveDate::from_ymd_opt(2020, 1, 27).unwrap_or(NaiveDate::MIN),
            end: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap_or(NaiveDate::MAX),
            confirmed: None,
            vaccinated: None,
            estimates_output: None,
            epicurve_output: None,
        }
    }
}
