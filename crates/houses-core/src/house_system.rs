//! # House System Codes
//!
//! A house system is selected by a single ASCII character and handed to the
//! engine untouched. The table below only names the well-known codes; an
//! unlisted code is still valid and reaches the engine as-is.

use crate::HousesError;
use crate::primitives::DEFAULT_HOUSE_SYSTEM;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Well-known codes and their names.
pub const KNOWN_SYSTEMS: &[(char, &str)] = &[
    ('P', "Placidus"),
    ('K', "Koch"),
    ('O', "Porphyry"),
    ('R', "Regiomontanus"),
    ('C', "Campanus"),
    ('A', "Equal (Ascendant)"),
    ('E', "Equal"),
    ('D', "Equal (MC)"),
    ('W', "Whole Sign"),
    ('B', "Alcabitius"),
    ('M', "Morinus"),
    ('T', "Polich/Page (Topocentric)"),
    ('X', "Axial Rotation (Meridian)"),
    ('V', "Vehlow Equal"),
    ('U', "Krusinski-Pisa-Goelzer"),
    ('H', "Horizontal (Azimuthal)"),
    ('S', "Sripati"),
    ('G', "Gauquelin Sectors"),
];

/// Single-character house-system selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HouseSystemCode(char);

impl HouseSystemCode {
    /// Placidus.
    pub const PLACIDUS: Self = Self(DEFAULT_HOUSE_SYSTEM);

    /// Accept a single ASCII alphanumeric character.
    pub fn new(code: char) -> Result<Self, HousesError> {
        if code.is_ascii_alphanumeric() {
            Ok(Self(code))
        } else {
            Err(HousesError::InvalidInput(format!(
                "house system code must be an ASCII letter or digit, got {:?}",
                code
            )))
        }
    }

    /// Resolve a caller string: its first character, or `default` when the
    /// string is absent or blank.
    pub fn resolve(value: Option<&str>, default: Self) -> Result<Self, HousesError> {
        match value.map(str::trim).and_then(|s| s.chars().next()) {
            Some(c) => Self::new(c),
            None => Ok(default),
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Descriptive name for well-known codes.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        KNOWN_SYSTEMS
            .iter()
            .find(|(c, _)| *c == self.0)
            .map(|(_, name)| *name)
    }
}

impl Default for HouseSystemCode {
    fn default() -> Self {
        Self::PLACIDUS
    }
}

impl fmt::Display for HouseSystemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for HouseSystemCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HouseSystemCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(c).map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom(format!(
                "house system code must be exactly one character, got {:?}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_placidus() {
        assert_eq!(HouseSystemCode::default().as_char(), 'P');
        assert_eq!(HouseSystemCode::default().name(), Some("Placidus"));
    }

    #[test]
    fn resolve_takes_first_character() {
        let code = HouseSystemCode::resolve(Some("Koch"), HouseSystemCode::PLACIDUS).expect("ok");
        assert_eq!(code.as_char(), 'K');
    }

    #[test]
    fn resolve_blank_uses_default() {
        let default = HouseSystemCode::new('W').expect("ok");
        assert_eq!(HouseSystemCode::resolve(None, default).expect("ok"), default);
        assert_eq!(HouseSystemCode::resolve(Some("  "), default).expect("ok"), default);
    }

    #[test]
    fn unknown_code_passes_through() {
        let code = HouseSystemCode::new('Z').expect("ok");
        assert_eq!(code.name(), None);
    }

    #[test]
    fn non_alphanumeric_rejected() {
        assert!(matches!(
            HouseSystemCode::new('#'),
            Err(HousesError::InvalidInput(_))
        ));
        assert!(HouseSystemCode::resolve(Some("é"), HouseSystemCode::PLACIDUS).is_err());
    }

    #[test]
    fn serde_uses_single_character() {
        let code: HouseSystemCode = serde_json::from_str("\"K\"").expect("parse");
        assert_eq!(code.as_char(), 'K');
        assert_eq!(serde_json::to_string(&code).expect("ser"), "\"K\"");
        assert!(serde_json::from_str::<HouseSystemCode>("\"KP\"").is_err());
    }
}
