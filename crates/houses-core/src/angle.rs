//! # Angle Utilities
//!
//! Sexagesimal to decimal conversion and normalization of ecliptic degrees.
//!
//! All functions here are total for finite input; range checks belong to
//! request validation in [`crate::types`].

use crate::HousesError;
use crate::primitives::{FULL_CIRCLE, SECONDS_PER_UNIT, SEXAGESIMAL_BASE};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// HEMISPHERE
// =============================================================================

/// Compass direction attached to a latitude or longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// South and West resolve to negative decimal degrees.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }

    /// North and South qualify a latitude.
    #[must_use]
    pub const fn is_latitude(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Single-letter form.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
            Self::East => 'E',
            Self::West => 'W',
        }
    }
}

impl FromStr for Hemisphere {
    type Err = HousesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "N" => Ok(Self::North),
            "S" => Ok(Self::South),
            "E" => Ok(Self::East),
            "W" => Ok(Self::West),
            other => Err(HousesError::InvalidInput(format!(
                "unknown hemisphere '{}', expected one of N, S, E, W",
                other
            ))),
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

// =============================================================================
// SEXAGESIMAL ANGLE
// =============================================================================

/// A degree/minute/second angle with an optional hemisphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexagesimalAngle {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
    pub hemisphere: Option<Hemisphere>,
}

impl SexagesimalAngle {
    #[must_use]
    pub const fn new(
        degrees: f64,
        minutes: f64,
        seconds: f64,
        hemisphere: Option<Hemisphere>,
    ) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
            hemisphere,
        }
    }

    /// Signed decimal degrees.
    #[must_use]
    pub fn to_decimal(&self) -> f64 {
        to_decimal_degrees(self.degrees, self.minutes, self.seconds, self.hemisphere)
    }
}

// =============================================================================
// CONVERSIONS
// =============================================================================

/// Convert degrees, minutes and seconds to signed decimal degrees.
///
/// The magnitude is always taken as absolute; the sign comes only from the
/// hemisphere, negative for South and West.
#[must_use]
pub fn to_decimal_degrees(
    degrees: f64,
    minutes: f64,
    seconds: f64,
    hemisphere: Option<Hemisphere>,
) -> f64 {
    let magnitude = (degrees + minutes / SEXAGESIMAL_BASE + seconds / SECONDS_PER_UNIT).abs();
    match hemisphere {
        Some(h) if h.is_negative() => -magnitude,
        _ => magnitude,
    }
}

/// Reduce any finite degree value into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(x: f64) -> f64 {
    let r = x % FULL_CIRCLE;
    if r >= 0.0 {
        return r;
    }
    let wrapped = r + FULL_CIRCLE;
    // -1e-17 lands on exactly 360.0 after the addition.
    if wrapped >= FULL_CIRCLE { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn south_latitude_is_negative() {
        let v = to_decimal_degrees(23.0, 33.0, 9.0, Some(Hemisphere::South));
        assert!((v - (-23.5525)).abs() < 1e-4);
    }

    #[test]
    fn north_or_absent_is_positive() {
        let n = to_decimal_degrees(23.0, 33.0, 9.0, Some(Hemisphere::North));
        let none = to_decimal_degrees(23.0, 33.0, 9.0, None);
        assert!((n - 23.5525).abs() < 1e-4);
        assert!((none - n).abs() < 1e-12);
    }

    #[test]
    fn west_longitude_is_negative() {
        let v = to_decimal_degrees(46.0, 38.0, 0.0, Some(Hemisphere::West));
        assert!(v < 0.0);
        assert!((v + 46.633_333).abs() < 1e-5);
    }

    #[test]
    fn negative_degrees_use_magnitude() {
        let v = to_decimal_degrees(-10.0, 0.0, 0.0, None);
        assert!((v - 10.0).abs() < 1e-12);
        let s = to_decimal_degrees(-10.0, 0.0, 0.0, Some(Hemisphere::South));
        assert!((s + 10.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert!((normalize_degrees(360.0) - 0.0).abs() < 1e-12);
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_degrees(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_degrees(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_full_circle() {
        let r = normalize_degrees(-1e-17);
        assert!((0.0..360.0).contains(&r));
    }

    #[test]
    fn hemisphere_parsing_is_case_insensitive() {
        assert_eq!("s".parse::<Hemisphere>().ok(), Some(Hemisphere::South));
        assert_eq!(" W ".parse::<Hemisphere>().ok(), Some(Hemisphere::West));
        assert!("X".parse::<Hemisphere>().is_err());
        assert!("".parse::<Hemisphere>().is_err());
    }
}
