//! # houses-core
//!
//! The angle domain of the houses service - THE LOGIC.
//!
//! Turns sidereal time, latitude and obliquity into twelve house cusps plus
//! Ascendant and Midheaven, each placed in a zodiac sign with
//! degree/minute/second formatting.
//!
//! The spherical house computation itself is not done here: it is delegated
//! to a [`HouseEngine`] supplied by the caller. This crate only validates the
//! input, computes the ARMC, reconciles the engine's result shapes and maps
//! longitudes into signs.
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - No module-level mutable state; the sign table is a `const`
//! - Never panics; every failure is a [`HousesError`]
//!
//! ## Example
//!
//! ```
//! use houses_core::{
//!     AngleInput, ChartRequest, CuspCalculator, HouseEngine, HouseQuery, HousesError,
//!     RawHouseResult, SiderealTimeInput,
//! };
//!
//! struct Equal;
//!
//! impl HouseEngine for Equal {
//!     fn houses_armc(&self, q: &HouseQuery) -> Result<RawHouseResult, HousesError> {
//!         Ok(RawHouseResult::Flat((0..12).map(|i| q.armc + 30.0 * i as f64).collect()))
//!     }
//! }
//!
//! let request = ChartRequest {
//!     sidereal_time: Some(SiderealTimeInput::new(12.0, 0.0, 0.0)),
//!     latitude: Some(AngleInput::new(23.0, 33.0, 9.0, Some("S"))),
//!     obliquity: Some(23.4365),
//!     ..ChartRequest::default()
//! };
//! let chart = CuspCalculator::new(Equal).calculate_cusps(&request)?;
//! assert_eq!(chart.houses.len(), 12);
//! assert_eq!(chart.houses[0].placement.sign_name, "Libra");
//! # Ok::<(), HousesError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod angle;
pub mod calculator;
pub mod engine;
pub mod house_system;
pub mod primitives;
pub mod sidereal;
pub mod types;
pub mod zodiac;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AngleInput, AngleOrigin, ChartAngles, ChartRequest, CuspEntry, HousesError, SiderealTimeInput,
};

// =============================================================================
// RE-EXPORTS: Angle Domain
// =============================================================================

pub use angle::{Hemisphere, SexagesimalAngle, normalize_degrees, to_decimal_degrees};
pub use house_system::{HouseSystemCode, KNOWN_SYSTEMS};
pub use sidereal::SiderealTime;
pub use zodiac::{
    ALL_SIGNS, SecondsRounding, SignNames, ZodiacPlacement, ZodiacSign, placement_with,
    to_zodiac_placement,
};

// =============================================================================
// RE-EXPORTS: Calculation
// =============================================================================

pub use calculator::{AngleSource, CalculatorOptions, CuspCalculator};
pub use engine::{CuspShape, HouseEngine, HouseQuery, RawHouseResult};
