//! # House Engine Seam
//!
//! The spherical house computation lives outside this crate. A
//! [`HouseEngine`] receives ARMC, latitude, obliquity and a house-system
//! code and answers with whatever shape it produces. That answer is a
//! [`RawHouseResult`]; [`CuspShape::detect`] turns it into one of the three
//! accepted shapes or rejects it.
//!
//! ## Accepted shapes
//!
//! | Shape         | Source                                              |
//! |---------------|-----------------------------------------------------|
//! | `ObjectStyle` | `{ houses \| cusps, points \| ascmc }`, optionally under `data` |
//! | `Padded`      | flat sequence of 13, index 0 is a placeholder       |
//! | `Normalized`  | flat sequence of exactly 12                         |

use crate::house_system::HouseSystemCode;
use crate::primitives::{HOUSE_COUNT, PADDED_CUSP_COUNT};
use crate::HousesError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

// =============================================================================
// QUERY
// =============================================================================

/// Arguments of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseQuery {
    /// Right ascension of the MC, decimal degrees.
    pub armc: f64,
    /// Geographic latitude, decimal degrees (south negative).
    #[serde(rename = "geolat")]
    pub latitude: f64,
    /// Obliquity of the ecliptic, decimal degrees.
    #[serde(rename = "eps")]
    pub obliquity: f64,
    #[serde(rename = "hsys")]
    pub system: HouseSystemCode,
}

// =============================================================================
// ENGINE TRAIT
// =============================================================================

/// The house-computation capability.
///
/// Implementations are called once per calculation and never retried; a
/// failure is reported as-is.
pub trait HouseEngine {
    fn houses_armc(&self, query: &HouseQuery) -> Result<RawHouseResult, HousesError>;
}

impl<T: HouseEngine + ?Sized> HouseEngine for Arc<T> {
    fn houses_armc(&self, query: &HouseQuery) -> Result<RawHouseResult, HousesError> {
        (**self).houses_armc(query)
    }
}

impl<T: HouseEngine + ?Sized> HouseEngine for Box<T> {
    fn houses_armc(&self, query: &HouseQuery) -> Result<RawHouseResult, HousesError> {
        (**self).houses_armc(query)
    }
}

impl<T: HouseEngine + ?Sized> HouseEngine for &T {
    fn houses_armc(&self, query: &HouseQuery) -> Result<RawHouseResult, HousesError> {
        (**self).houses_armc(query)
    }
}

// =============================================================================
// RAW RESULT
// =============================================================================

/// Engine output before shape detection.
#[derive(Debug, Clone, PartialEq)]
pub enum RawHouseResult {
    /// Object carrying nested sequences. Any of them may be missing.
    Object {
        cusps: Option<Vec<f64>>,
        angles: Option<Vec<f64>>,
        error: Option<String>,
    },
    /// Bare numeric sequence.
    Flat(Vec<f64>),
    /// Nothing came back.
    Empty,
    /// Something came back that is none of the above.
    Unrecognized(String),
}

impl RawHouseResult {
    /// Sniff a JSON document produced by an engine.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Array(items) => match numbers(items) {
                Ok(values) => Self::Flat(values),
                Err(reason) => Self::Unrecognized(reason),
            },
            Value::Object(outer) => {
                let body = match outer.get("data") {
                    Some(Value::Object(inner)) => inner,
                    _ => outer,
                };
                let error = outer
                    .get("error")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);

                let cusps = match first_sequence(body, &["houses", "cusps"]) {
                    Ok(v) => v,
                    Err(reason) => return Self::Unrecognized(reason),
                };
                let angles = match first_sequence(body, &["points", "ascmc"]) {
                    Ok(v) => v,
                    Err(reason) => return Self::Unrecognized(reason),
                };

                Self::Object {
                    cusps,
                    angles,
                    error,
                }
            }
            Value::Bool(_) => Self::Unrecognized("boolean".to_string()),
            Value::Number(_) => Self::Unrecognized("single number".to_string()),
            Value::String(_) => Self::Unrecognized("string".to_string()),
        }
    }
}

/// First key present in `body` holding a numeric array.
fn first_sequence(body: &Map<String, Value>, keys: &[&str]) -> Result<Option<Vec<f64>>, String> {
    for key in keys {
        match body.get(*key) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                return numbers(items)
                    .map(Some)
                    .map_err(|reason| format!("'{}': {}", key, reason));
            }
            Some(_) => return Err(format!("'{}' is not a sequence", key)),
        }
    }
    Ok(None)
}

fn numbers(items: &[Value]) -> Result<Vec<f64>, String> {
    items
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_f64()
                .ok_or_else(|| format!("non-numeric element at index {}", i))
        })
        .collect()
}

// =============================================================================
// SHAPE DETECTION
// =============================================================================

/// A recognized engine result, reduced to twelve cusps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CuspShape {
    /// Object-style result; `angles` is `(Ascendant, MC)` when the engine
    /// supplied at least two angle values.
    ObjectStyle {
        cusps: [f64; HOUSE_COUNT],
        angles: Option<(f64, f64)>,
    },
    /// 13 values with the leading placeholder dropped.
    Padded([f64; HOUSE_COUNT]),
    /// Exactly 12 values.
    Normalized([f64; HOUSE_COUNT]),
}

impl CuspShape {
    /// Detect and validate the shape of a raw result.
    pub fn detect(raw: RawHouseResult) -> Result<Self, HousesError> {
        match raw {
            RawHouseResult::Empty => Err(HousesError::Calculation(
                "house engine returned an empty result".to_string(),
            )),
            RawHouseResult::Unrecognized(what) => Err(HousesError::Calculation(format!(
                "house engine returned an unrecognized result ({})",
                what
            ))),
            RawHouseResult::Object {
                cusps: None, error, ..
            } => Err(HousesError::Calculation(match error {
                Some(msg) => format!("house engine reported: {}", msg),
                None => "house engine result carries no cusp sequence".to_string(),
            })),
            RawHouseResult::Object {
                cusps: Some(cusps),
                angles,
                ..
            } => {
                let cusps = twelve(&cusps)?;
                let angles = match angles.as_deref() {
                    Some([asc, mc, ..]) => {
                        finite("Ascendant", *asc)?;
                        finite("Midheaven", *mc)?;
                        Some((*asc, *mc))
                    }
                    _ => None,
                };
                Ok(Self::ObjectStyle { cusps, angles })
            }
            RawHouseResult::Flat(values) => match values.len() {
                PADDED_CUSP_COUNT => Ok(Self::Padded(twelve(&values)?)),
                HOUSE_COUNT => Ok(Self::Normalized(twelve(&values)?)),
                n => Err(wrong_length(n)),
            },
        }
    }

    /// Cusp longitudes; index 0 is house 1.
    #[must_use]
    pub const fn cusps(&self) -> &[f64; HOUSE_COUNT] {
        match self {
            Self::ObjectStyle { cusps, .. } | Self::Padded(cusps) | Self::Normalized(cusps) => {
                cusps
            }
        }
    }

    /// Explicit `(Ascendant, MC)` pair, if the engine sent one.
    #[must_use]
    pub const fn explicit_angles(&self) -> Option<(f64, f64)> {
        match self {
            Self::ObjectStyle { angles, .. } => *angles,
            Self::Padded(_) | Self::Normalized(_) => None,
        }
    }
}

/// Reduce a 12- or 13-long sequence to twelve finite cusps.
fn twelve(values: &[f64]) -> Result<[f64; HOUSE_COUNT], HousesError> {
    let slice = match values.len() {
        PADDED_CUSP_COUNT => &values[1..],
        HOUSE_COUNT => values,
        n => return Err(wrong_length(n)),
    };
    let mut cusps = [0.0; HOUSE_COUNT];
    for (house, (slot, value)) in cusps.iter_mut().zip(slice).enumerate() {
        if !value.is_finite() {
            return Err(HousesError::Calculation(format!(
                "house engine returned a non-finite cusp {}",
                house + 1
            )));
        }
        *slot = *value;
    }
    Ok(cusps)
}

fn finite(label: &str, value: f64) -> Result<(), HousesError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HousesError::Calculation(format!(
            "house engine returned a non-finite {}",
            label
        )))
    }
}

fn wrong_length(n: usize) -> HousesError {
    HousesError::Calculation(format!(
        "house engine returned {} cusp values, expected {} or {}",
        n, HOUSE_COUNT, PADDED_CUSP_COUNT
    ))
}
