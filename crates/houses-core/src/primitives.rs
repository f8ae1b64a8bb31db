//! # Fixed Constants
//!
//! Compiled-in constants of the angle domain. None of these are
//! configurable at runtime.

/// Degrees of right ascension per hour of sidereal time (24h = 360°).
pub const DEGREES_PER_HOUR: f64 = 15.0;

/// Full circle in degrees.
pub const FULL_CIRCLE: f64 = 360.0;

/// Width of one zodiac sign in degrees.
pub const SIGN_SPAN: f64 = 30.0;

/// Number of zodiac signs.
pub const SIGN_COUNT: usize = 12;

/// Number of houses in every chart.
pub const HOUSE_COUNT: usize = 12;

/// Length of an engine cusp sequence that carries a placeholder at index 0.
pub const PADDED_CUSP_COUNT: usize = HOUSE_COUNT + 1;

/// House whose cusp stands in for the Ascendant when no angle pair is given.
pub const ASCENDANT_HOUSE: usize = 1;

/// House whose cusp stands in for the Midheaven when no angle pair is given.
pub const MIDHEAVEN_HOUSE: usize = 10;

/// House system used when the caller does not name one (Placidus).
pub const DEFAULT_HOUSE_SYSTEM: char = 'P';

/// Largest accepted absolute latitude in decimal degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest accepted absolute longitude in decimal degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Sidereal hours per day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Minutes per hour / degree and seconds per minute.
pub const SEXAGESIMAL_BASE: f64 = 60.0;

/// Seconds per hour / degree.
pub const SECONDS_PER_UNIT: f64 = 3600.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_conversion_covers_full_circle() {
        assert!((HOURS_PER_DAY * DEGREES_PER_HOUR - FULL_CIRCLE).abs() < 1e-12);
    }

    #[test]
    fn signs_cover_full_circle() {
        assert!((SIGN_SPAN * SIGN_COUNT as f64 - FULL_CIRCLE).abs() < 1e-12);
    }

    #[test]
    fn padded_sequence_has_one_placeholder() {
        assert_eq!(PADDED_CUSP_COUNT, 13);
    }
}
