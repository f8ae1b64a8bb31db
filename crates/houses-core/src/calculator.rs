//! # Cusp Calculator
//!
//! Orchestrates one calculation:
//!
//! ```text
//! ChartRequest ─► validate ─► HouseQuery ─► HouseEngine ─► RawHouseResult
//!                                                               │
//!              ChartAngles ◄─ zodiac placement ◄─ CuspShape ◄───┘
//! ```
//!
//! The engine is injected at construction, so the calculator itself has no
//! I/O and can be driven by any [`HouseEngine`] implementation.

use crate::angle::normalize_degrees;
use crate::engine::{CuspShape, HouseEngine, HouseQuery};
use crate::house_system::HouseSystemCode;
use crate::primitives::{ASCENDANT_HOUSE, MIDHEAVEN_HOUSE};
use crate::types::{AngleOrigin, ChartAngles, ChartRequest, CuspEntry};
use crate::zodiac::{SecondsRounding, SignNames, ZodiacPlacement, placement_with};
use crate::HousesError;
use serde::{Deserialize, Serialize};

// =============================================================================
// OPTIONS
// =============================================================================

/// How the Ascendant and MC are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleSource {
    /// Use the engine's explicit pair when present, else cusp 1 / cusp 10.
    #[default]
    PreferExplicit,
    /// Always use cusp 1 / cusp 10.
    CuspsOnly,
}

/// Tunable behavior of a [`CuspCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorOptions {
    pub seconds_rounding: SecondsRounding,
    pub angle_source: AngleSource,
    pub sign_names: SignNames,
    /// Used when a request names no house system.
    pub default_house_system: HouseSystemCode,
}

// =============================================================================
// CALCULATOR
// =============================================================================

/// Computes [`ChartAngles`] through an injected house engine.
#[derive(Debug, Clone)]
pub struct CuspCalculator<E> {
    engine: E,
    options: CalculatorOptions,
}

impl<E: HouseEngine> CuspCalculator<E> {
    /// Calculator with default options.
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, CalculatorOptions::default())
    }

    pub fn with_options(engine: E, options: CalculatorOptions) -> Self {
        Self { engine, options }
    }

    /// Run one calculation.
    ///
    /// # Errors
    ///
    /// - [`HousesError::InvalidInput`] for missing or out-of-range fields
    /// - [`HousesError::Calculation`] when the engine result has no usable cusps
    /// - whatever the engine itself reports
    pub fn calculate_cusps(&self, request: &ChartRequest) -> Result<ChartAngles, HousesError> {
        let query = request.to_query(self.options.default_house_system)?;
        let raw = self.engine.houses_armc(&query)?;
        let shape = CuspShape::detect(raw)?;
        Ok(self.assemble(&query, &shape))
    }

    /// Build the chart from a detected shape.
    #[must_use]
    pub fn assemble(&self, query: &HouseQuery, shape: &CuspShape) -> ChartAngles {
        let cusps = shape.cusps();

        let houses = cusps
            .iter()
            .enumerate()
            .map(|(i, &longitude)| CuspEntry {
                house: (i + 1) as u8,
                longitude: normalize_degrees(longitude),
                placement: self.place(longitude),
            })
            .collect();

        let (ascendant, midheaven, angle_origin) =
            match (self.options.angle_source, shape.explicit_angles()) {
                (AngleSource::PreferExplicit, Some((asc, mc))) => (asc, mc, AngleOrigin::Explicit),
                _ => (
                    cusps[ASCENDANT_HOUSE - 1],
                    cusps[MIDHEAVEN_HOUSE - 1],
                    AngleOrigin::CuspFallback,
                ),
            };

        ChartAngles {
            ascendant: self.place(ascendant),
            midheaven: self.place(midheaven),
            houses,
            angle_origin,
            armc: query.armc,
            system: query.system,
        }
    }

    fn place(&self, longitude: f64) -> ZodiacPlacement {
        placement_with(
            longitude,
            self.options.seconds_rounding,
            self.options.sign_names,
        )
    }
}
