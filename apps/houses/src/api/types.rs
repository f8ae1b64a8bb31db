//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! The request body is [`houses_core::ChartRequest`] as-is. Responses keep the
//! published Portuguese field names (`ascendente`, `casas`, `grau`, ...).

use houses_core::{AngleOrigin, ChartAngles, CuspEntry, ZodiacPlacement};
use serde::{Deserialize, Serialize};

/// Error message for calculation and engine failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Erro interno no cálculo.";

/// Error message for an absent or unreadable request body.
pub const NO_DATA_MESSAGE: &str = "Nenhum dado enviado.";

/// Error message for a body that parsed but failed validation.
pub const INVALID_INPUT_MESSAGE: &str = "Entrada inválida.";

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// CHART RESPONSE
// =============================================================================

/// A zodiac placement on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementJson {
    /// Sign name in the configured language.
    pub sign: String,
    /// 0 = Aries .. 11 = Pisces.
    pub sign_index: u8,
    pub degrees: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub formatted: String,
    /// Ecliptic longitude in `[0, 360)`.
    pub grau_absoluto: f64,
}

impl From<&ZodiacPlacement> for PlacementJson {
    fn from(p: &ZodiacPlacement) -> Self {
        Self {
            sign: p.sign_name.to_string(),
            sign_index: p.sign.index() as u8,
            degrees: p.degrees,
            minutes: p.minutes,
            seconds: p.seconds,
            formatted: p.formatted.clone(),
            grau_absoluto: p.absolute_longitude,
        }
    }
}

/// One house cusp on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CasaJson {
    /// House number, 1..=12.
    pub casa: u8,
    /// Cusp longitude.
    pub grau: f64,
    pub signo: PlacementJson,
}

impl From<&CuspEntry> for CasaJson {
    fn from(entry: &CuspEntry) -> Self {
        Self {
            casa: entry.house,
            grau: entry.longitude,
            signo: PlacementJson::from(&entry.placement),
        }
    }
}

/// Successful `POST /calcular` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub ascendente: PlacementJson,
    pub mc: PlacementJson,
    pub casas: Vec<CasaJson>,
    pub armc: f64,
    /// House system code the engine was called with.
    pub sistema: String,
    pub fonte_angulos: AngleOrigin,
}

impl From<&ChartAngles> for ChartResponse {
    fn from(chart: &ChartAngles) -> Self {
        Self {
            ascendente: PlacementJson::from(&chart.ascendant),
            mc: PlacementJson::from(&chart.midheaven),
            casas: chart.houses.iter().map(CasaJson::from).collect(),
            armc: chart.armc,
            sistema: chart.system.to_string(),
            fonte_angulos: chart.angle_origin,
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error body for 4xx and 5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detalhes: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: &str, detalhes: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            detalhes: detalhes.into(),
        }
    }

    /// 500 body for a failed calculation.
    #[must_use]
    pub fn internal(detalhes: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR_MESSAGE, detalhes)
    }
}
