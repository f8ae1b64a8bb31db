//! # Core Type Definitions
//!
//! This module contains the request and result types of a cusp calculation:
//! - Caller input (`ChartRequest`, `SiderealTimeInput`, `AngleInput`)
//! - Output structures (`ChartAngles`, `CuspEntry`, `AngleOrigin`)
//! - Error types (`HousesError`)
//!
//! ## Input leniency
//!
//! Every input field is optional at the type level so that a missing field
//! is reported as [`HousesError::InvalidInput`] naming that field, instead of
//! a generic parse failure. Minutes and seconds default to zero.

use crate::angle::{Hemisphere, SexagesimalAngle};
use crate::engine::HouseQuery;
use crate::house_system::HouseSystemCode;
use crate::primitives::{MAX_LATITUDE, MAX_LONGITUDE, SEXAGESIMAL_BASE};
use crate::sidereal::{SiderealTime, check_range};
use crate::zodiac::ZodiacPlacement;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// REQUEST
// =============================================================================

/// Sidereal time as sent by callers: `{h, m, s}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SiderealTimeInput {
    pub h: Option<f64>,
    pub m: Option<f64>,
    pub s: Option<f64>,
}

impl SiderealTimeInput {
    #[must_use]
    pub const fn new(h: f64, m: f64, s: f64) -> Self {
        Self {
            h: Some(h),
            m: Some(m),
            s: Some(s),
        }
    }

    /// Validate into a [`SiderealTime`].
    pub fn to_sidereal(&self) -> Result<SiderealTime, HousesError> {
        let h = self
            .h
            .ok_or_else(|| missing("sideralTime.h"))?;
        SiderealTime::new(h, self.m.unwrap_or(0.0), self.s.unwrap_or(0.0))
    }
}

/// A latitude or longitude as sent by callers: `{deg, min, sec, dir}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleInput {
    pub deg: Option<f64>,
    pub min: Option<f64>,
    pub sec: Option<f64>,
    pub dir: Option<String>,
}

impl AngleInput {
    #[must_use]
    pub fn new(deg: f64, min: f64, sec: f64, dir: Option<&str>) -> Self {
        Self {
            deg: Some(deg),
            min: Some(min),
            sec: Some(sec),
            dir: dir.map(str::to_string),
        }
    }

    /// Validate as a latitude (N/S, at most 90°).
    pub fn to_latitude(&self) -> Result<SexagesimalAngle, HousesError> {
        self.to_angle("latitude", MAX_LATITUDE, true)
    }

    /// Validate as a longitude (E/W, at most 180°).
    pub fn to_longitude(&self) -> Result<SexagesimalAngle, HousesError> {
        self.to_angle("longitude", MAX_LONGITUDE, false)
    }

    fn to_angle(
        &self,
        field: &str,
        max: f64,
        latitude: bool,
    ) -> Result<SexagesimalAngle, HousesError> {
        let deg = self.deg.ok_or_else(|| missing(&format!("{}.deg", field)))?;
        check_range(&format!("{}.deg", field), deg, max + 1.0)?;
        let min = self.min.unwrap_or(0.0);
        let sec = self.sec.unwrap_or(0.0);
        check_range(&format!("{}.min", field), min, SEXAGESIMAL_BASE)?;
        check_range(&format!("{}.sec", field), sec, SEXAGESIMAL_BASE)?;

        let hemisphere = match self.dir.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => {
                let h: Hemisphere = s.parse()?;
                if h.is_latitude() != latitude {
                    return Err(HousesError::InvalidInput(format!(
                        "{}.dir '{}' is not a {} direction",
                        field, h, field
                    )));
                }
                Some(h)
            }
        };

        let angle = SexagesimalAngle::new(deg, min, sec, hemisphere);
        if angle.to_decimal().abs() > max {
            return Err(HousesError::InvalidInput(format!(
                "{} exceeds {} degrees",
                field, max
            )));
        }
        Ok(angle)
    }
}

/// Body of a cusp calculation request.
///
/// Field names follow the published wire contract (`sideralTime`,
/// `houseSystem`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    #[serde(rename = "sideralTime")]
    pub sidereal_time: Option<SiderealTimeInput>,
    pub latitude: Option<AngleInput>,
    /// Accepted and validated, but not used: it is already folded into the
    /// caller's sidereal time.
    pub longitude: Option<AngleInput>,
    /// Obliquity of the ecliptic in decimal degrees.
    pub obliquity: Option<f64>,
    #[serde(rename = "houseSystem")]
    pub house_system: Option<String>,
}

impl ChartRequest {
    /// Validate and convert to the arguments of one engine call.
    pub fn to_query(&self, default_system: HouseSystemCode) -> Result<HouseQuery, HousesError> {
        let sidereal = self
            .sidereal_time
            .as_ref()
            .ok_or_else(|| missing("sideralTime"))?
            .to_sidereal()?;
        let latitude = self
            .latitude
            .as_ref()
            .ok_or_else(|| missing("latitude"))?
            .to_latitude()?;
        if let Some(longitude) = &self.longitude {
            longitude.to_longitude()?;
        }
        let obliquity = self.obliquity.ok_or_else(|| missing("obliquity"))?;
        check_range("obliquity", obliquity, MAX_LATITUDE)?;
        let system = HouseSystemCode::resolve(self.house_system.as_deref(), default_system)?;

        Ok(HouseQuery {
            armc: sidereal.armc(),
            latitude: latitude.to_decimal(),
            obliquity,
            system,
        })
    }
}

fn missing(field: &str) -> HousesError {
    HousesError::InvalidInput(format!("missing required field '{}'", field))
}

// =============================================================================
// RESULT
// =============================================================================

/// Where the Ascendant and MC of a chart came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleOrigin {
    /// The engine supplied an explicit angle pair.
    Explicit,
    /// Cusp 1 and cusp 10 stand in for the Ascendant and MC. This is an
    /// approximation: it only holds for quadrant house systems.
    CuspFallback,
}

/// One house cusp.
#[derive(Debug, Clone, PartialEq)]
pub struct CuspEntry {
    /// House number, 1..=12.
    pub house: u8,
    /// Cusp longitude in `[0, 360)`.
    pub longitude: f64,
    pub placement: ZodiacPlacement,
}

/// Result of one cusp calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAngles {
    pub ascendant: ZodiacPlacement,
    pub midheaven: ZodiacPlacement,
    /// Always 12 entries, houses 1..=12 in order.
    pub houses: Vec<CuspEntry>,
    pub angle_origin: AngleOrigin,
    /// ARMC the engine was called with.
    pub armc: f64,
    pub system: HouseSystemCode,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the houses system.
///
/// - No silent failures
/// - Nothing is retried: the same input always yields the same error
#[derive(Debug, Error)]
pub enum HousesError {
    /// Missing or malformed caller input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The house engine could not be reached or invoked.
    #[error("House engine unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// The house engine answered, but not with usable cusp data.
    #[error("Calculation failed: {0}")]
    Calculation(String),

    /// A configuration source could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

impl HousesError {
    /// Whether the caller is at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ChartRequest {
        ChartRequest {
            sidereal_time: Some(SiderealTimeInput::new(18.0, 57.0, 16.0)),
            latitude: Some(AngleInput::new(23.0, 33.0, 9.0, Some("S"))),
            longitude: Some(AngleInput::new(46.0, 38.0, 0.0, Some("W"))),
            obliquity: Some(23.4365),
            house_system: Some("P".to_string()),
        }
    }

    #[test]
    fn valid_request_converts() {
        let query = valid_request()
            .to_query(HouseSystemCode::PLACIDUS)
            .expect("valid");
        assert!((query.armc - 284.316_667).abs() < 1e-5);
        assert!((query.latitude + 23.5525).abs() < 1e-4);
        assert_eq!(query.system.as_char(), 'P');
    }

    #[test]
    fn missing_sidereal_time_rejected() {
        let mut request = valid_request();
        request.sidereal_time = None;
        let err = request
            .to_query(HouseSystemCode::PLACIDUS)
            .expect_err("missing");
        assert!(err.is_client_error());
        assert!(err.to_string().contains("sideralTime"));
    }

    #[test]
    fn missing_latitude_rejected() {
        let mut request = valid_request();
        request.latitude = None;
        let err = request
            .to_query(HouseSystemCode::PLACIDUS)
            .expect_err("missing");
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn missing_hour_rejected_but_minutes_default() {
        let mut request = valid_request();
        request.sidereal_time = Some(SiderealTimeInput {
            h: None,
            m: Some(1.0),
            s: None,
        });
        assert!(request.to_query(HouseSystemCode::PLACIDUS).is_err());

        request.sidereal_time = Some(SiderealTimeInput {
            h: Some(12.0),
            m: None,
            s: None,
        });
        let query = request.to_query(HouseSystemCode::PLACIDUS).expect("valid");
        assert!((query.armc - 180.0).abs() < 1e-12);
    }

    #[test]
    fn latitude_rejects_east_west() {
        let mut request = valid_request();
        request.latitude = Some(AngleInput::new(10.0, 0.0, 0.0, Some("E")));
        assert!(matches!(
            request.to_query(HouseSystemCode::PLACIDUS),
            Err(HousesError::InvalidInput(_))
        ));
    }

    #[test]
    fn latitude_beyond_pole_rejected() {
        let mut request = valid_request();
        request.latitude = Some(AngleInput::new(90.0, 30.0, 0.0, Some("N")));
        assert!(request.to_query(HouseSystemCode::PLACIDUS).is_err());
    }

    #[test]
    fn longitude_is_validated_but_optional() {
        let mut request = valid_request();
        request.longitude = None;
        assert!(request.to_query(HouseSystemCode::PLACIDUS).is_ok());
        request.longitude = Some(AngleInput::new(46.0, 0.0, 0.0, Some("S")));
        assert!(request.to_query(HouseSystemCode::PLACIDUS).is_err());
    }

    #[test]
    fn missing_obliquity_rejected() {
        let mut request = valid_request();
        request.obliquity = None;
        let err = request
            .to_query(HouseSystemCode::PLACIDUS)
            .expect_err("missing");
        assert!(err.to_string().contains("obliquity"));
    }

    #[test]
    fn house_system_defaults() {
        let mut request = valid_request();
        request.house_system = None;
        let koch = HouseSystemCode::new('K').expect("code");
        let query = request.to_query(koch).expect("valid");
        assert_eq!(query.system, koch);
    }

    #[test]
    fn wire_names_deserialize() {
        let json = r#"{
            "sideralTime": {"h": 18, "m": 57, "s": 16},
            "latitude": {"deg": 23, "min": 33, "sec": 9, "dir": "S"},
            "obliquity": 23.4365,
            "houseSystem": "P"
        }"#;
        let request: ChartRequest = serde_json::from_str(json).expect("parse");
        assert_eq!(request.sidereal_time, Some(SiderealTimeInput::new(18.0, 57.0, 16.0)));
        assert_eq!(request.house_system.as_deref(), Some("P"));
        assert!(request.longitude.is_none());
    }

    #[test]
    fn error_classification() {
        assert!(HousesError::InvalidInput("x".into()).is_client_error());
        assert!(!HousesError::Calculation("x".into()).is_client_error());
        assert!(!HousesError::CollaboratorUnavailable("x".into()).is_client_error());
    }
}
