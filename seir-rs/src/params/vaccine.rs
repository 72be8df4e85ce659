use super::constants as cte;
use crate::{
    prelude::{Real, Result, Time},
    Error,
};
use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

/// Vaccine efficiency and the delay between the shot and full protection.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, CopyGetters, Setters)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct VaccineParams {
    /// Fraction of vaccinated individuals removed from the susceptible pool.
    effectiveness: Real,

    /// Days between vaccination and protection.
    protection_delay: Time,
}

impl VaccineParams {
    pub fn new(effectiveness: Real, protection_delay: Time) -> Self {
        VaccineParams {
            effectiveness,
            protection_delay,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if (0.0..=1.0).contains(&self.effectiveness) {
            Ok(())
        } else {
            Err(Error::invalid(
                "effectiveness",
                format!("must be in [0, 1], got {}", self.effectiveness),
            ))
        }
    }

    /// Number of protected individuals among `vaccinated`.
    #[inline]
    pub fn protected(&self, vaccinated: Real) -> Real {
        vaccinated * self.effectiveness
    }
}

impl Default for VaccineParams {
    fn default() -> Self {
        VaccineParams::new(cte::VACCINE_EFFECTIVENESS, cte::PROTECTION_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effectiveness_bounds() {
        assert!(VaccineParams::new(0.0, 0).validate().is_ok());
        assert!(VaccineParams::new(1.0, 21).validate().is_ok());
        assert!(VaccineParams::new(1.5, 14).validate().is_err());
        assert!(VaccineParams::new(-0.1, 14).validate().is_err());
        assert!(VaccineParams::new(Real::NAN, 14).validate().is_err());
    }

    #[test]
    fn protected_share() {
        let params = VaccineParams::default();
        assert_eq!(params.protection_delay(), 14);
        assert_eq!(params.protected(1000.0), 900.0);
    }
}
