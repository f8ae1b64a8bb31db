//! # Sidereal Time
//!
//! Local sidereal time converted to the right ascension of the MC (ARMC).
//! One sidereal hour is 15 degrees of right ascension.

use crate::HousesError;
use crate::primitives::{
    DEGREES_PER_HOUR, HOURS_PER_DAY, SECONDS_PER_UNIT, SEXAGESIMAL_BASE,
};

/// Validated local sidereal time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealTime {
    hours: f64,
    minutes: f64,
    seconds: f64,
}

impl SiderealTime {
    /// Hours in `[0, 24)`, minutes and seconds in `[0, 60)`.
    pub fn new(hours: f64, minutes: f64, seconds: f64) -> Result<Self, HousesError> {
        check_range("sideralTime.h", hours, HOURS_PER_DAY)?;
        check_range("sideralTime.m", minutes, SEXAGESIMAL_BASE)?;
        check_range("sideralTime.s", seconds, SEXAGESIMAL_BASE)?;
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// `h + m/60 + s/3600`
    #[must_use]
    pub fn decimal_hours(&self) -> f64 {
        self.hours + self.minutes / SEXAGESIMAL_BASE + self.seconds / SECONDS_PER_UNIT
    }

    /// Right ascension of the MC in degrees.
    #[must_use]
    pub fn armc(&self) -> f64 {
        self.decimal_hours() * DEGREES_PER_HOUR
    }
}

/// `value` must be finite and in `[0, upper)`.
pub(crate) fn check_range(field: &str, value: f64, upper: f64) -> Result<(), HousesError> {
    if !value.is_finite() {
        return Err(HousesError::InvalidInput(format!(
            "{} must be a finite number",
            field
        )));
    }
    if !(0.0..upper).contains(&value) {
        return Err(HousesError::InvalidInput(format!(
            "{} must be in [0, {}), got {}",
            field, upper, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midnight_is_zero() {
        let st = SiderealTime::new(0.0, 0.0, 0.0).expect("valid");
        assert!(st.armc().abs() < 1e-12);
    }

    #[test]
    fn noon_is_half_circle() {
        let st = SiderealTime::new(12.0, 0.0, 0.0).expect("valid");
        assert!((st.armc() - 180.0).abs() < 1e-12);
    }

    #[test]
    fn minutes_and_seconds_contribute() {
        let st = SiderealTime::new(18.0, 57.0, 16.0).expect("valid");
        assert!((st.decimal_hours() - 18.954_444).abs() < 1e-6);
        assert!((st.armc() - 284.316_667).abs() < 1e-5);
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            SiderealTime::new(24.0, 0.0, 0.0),
            Err(HousesError::InvalidInput(_))
        ));
        assert!(SiderealTime::new(1.0, 60.0, 0.0).is_err());
        assert!(SiderealTime::new(1.0, 0.0, -1.0).is_err());
        assert!(SiderealTime::new(f64::NAN, 0.0, 0.0).is_err());
    }
}
