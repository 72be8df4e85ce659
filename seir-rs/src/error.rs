//! Error type shared by every fallible operation of the crate.
use chrono::NaiveDate;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Confirmed and vaccinated series must describe the same days.
    #[error(
        "confirmed series has {confirmed} elements but vaccinated series has {vaccinated}"
    )]
    LengthMismatch { confirmed: usize, vaccinated: usize },

    /// A model, solver or run parameter is out of its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Observations must be strictly ascending by date.
    #[error("observations are not strictly ordered by date at {date}")]
    UnorderedSeries { date: NaiveDate },

    #[error("empty date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot serialize configuration: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
