//! # Zodiac Placement
//!
//! The ecliptic is divided into 12 signs of 30 degrees each, starting from
//! Aries at 0 degrees. A longitude is expressed as a sign plus whole
//! degrees, arc-minutes and rounded arc-seconds within that sign.
//!
//! | Index | Range       | Sign        |
//! |-------|-------------|-------------|
//! | 0     | 0°–30°      | Aries       |
//! | 1     | 30°–60°     | Taurus      |
//! | ...   | ...         | ...         |
//! | 11    | 330°–360°   | Pisces      |
//!
//! ## Seconds rounding
//!
//! Seconds are rounded to the nearest whole arc-second, which can produce
//! 60. [`SecondsRounding`] decides what happens then.

use crate::angle::normalize_degrees;
use crate::primitives::{SECONDS_PER_UNIT, SEXAGESIMAL_BASE, SIGN_COUNT, SIGN_SPAN};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SIGN TABLE
// =============================================================================

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in ecliptic order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; SIGN_COUNT] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign at a 0-based index; wraps past Pisces.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        ALL_SIGNS[index % SIGN_COUNT]
    }

    /// 0-based index (Aries = 0 .. Pisces = 11).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// English name.
    #[must_use]
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Portuguese name, as published on the wire by default.
    #[must_use]
    pub const fn portuguese_name(self) -> &'static str {
        match self {
            Self::Aries => "Áries",
            Self::Taurus => "Touro",
            Self::Gemini => "Gêmeos",
            Self::Cancer => "Câncer",
            Self::Leo => "Leão",
            Self::Virgo => "Virgem",
            Self::Libra => "Libra",
            Self::Scorpio => "Escorpião",
            Self::Sagittarius => "Sagitário",
            Self::Capricorn => "Capricórnio",
            Self::Aquarius => "Aquário",
            Self::Pisces => "Peixes",
        }
    }

    /// Name in the requested language.
    #[must_use]
    pub const fn name(self, names: SignNames) -> &'static str {
        match names {
            SignNames::Portuguese => self.portuguese_name(),
            SignNames::English => self.english_name(),
        }
    }

    /// Sign containing an ecliptic longitude (any finite value).
    #[must_use]
    pub fn containing(longitude: f64) -> Self {
        let index = (normalize_degrees(longitude) / SIGN_SPAN).floor() as usize;
        Self::from_index(index.min(SIGN_COUNT - 1))
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Language of sign names in placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignNames {
    #[default]
    Portuguese,
    English,
}

/// What to do when arc-seconds round up to 60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondsRounding {
    /// Carry into minutes, then degrees. A carry that would reach the next
    /// sign stops at 29°59'59" instead.
    #[default]
    Carry,
    /// Cap seconds at 59.
    Clamp,
    /// Leave 60 in place.
    Legacy,
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// A longitude expressed as sign + degrees/minutes/seconds within the sign.
#[derive(Debug, Clone, PartialEq)]
pub struct ZodiacPlacement {
    pub sign: ZodiacSign,
    pub sign_name: &'static str,
    /// Whole degrees within the sign, 0..=29.
    pub degrees: u8,
    /// Arc-minutes, 0..=59.
    pub minutes: u8,
    /// Rounded arc-seconds; 0..=59 unless [`SecondsRounding::Legacy`].
    pub seconds: u8,
    /// `"<sign> <d>° <m>' <s>\""`
    pub formatted: String,
    /// Source longitude normalized to `[0, 360)`.
    pub absolute_longitude: f64,
}

impl fmt::Display for ZodiacPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted)
    }
}

/// Placement with the default rounding ([`SecondsRounding::Carry`]) and
/// Portuguese names.
#[must_use]
pub fn to_zodiac_placement(longitude: f64) -> ZodiacPlacement {
    placement_with(longitude, SecondsRounding::default(), SignNames::default())
}

/// Split a longitude into sign, degrees, minutes and seconds.
#[must_use]
pub fn placement_with(longitude: f64, rounding: SecondsRounding, names: SignNames) -> ZodiacPlacement {
    let normalized = normalize_degrees(longitude);
    let sign = ZodiacSign::containing(normalized);
    let in_sign = (normalized - sign.index() as f64 * SIGN_SPAN).max(0.0);

    let mut degrees = in_sign.floor();
    let fraction = in_sign - degrees;
    let mut minutes = (fraction * SEXAGESIMAL_BASE).floor();
    let mut seconds = (fraction * SECONDS_PER_UNIT - minutes * SEXAGESIMAL_BASE)
        .round()
        .max(0.0);

    match rounding {
        SecondsRounding::Legacy => {}
        SecondsRounding::Clamp => {
            seconds = seconds.min(SEXAGESIMAL_BASE - 1.0);
        }
        SecondsRounding::Carry => {
            if seconds >= SEXAGESIMAL_BASE {
                seconds -= SEXAGESIMAL_BASE;
                minutes += 1.0;
            }
            if minutes >= SEXAGESIMAL_BASE {
                minutes -= SEXAGESIMAL_BASE;
                degrees += 1.0;
            }
            // The sign never changes: the last second of a sign reads 29°59'59".
            if degrees >= SIGN_SPAN {
                degrees = SIGN_SPAN - 1.0;
                minutes = SEXAGESIMAL_BASE - 1.0;
                seconds = SEXAGESIMAL_BASE - 1.0;
            }
        }
    }

    let sign_name = sign.name(names);
    let (degrees, minutes, seconds) = (degrees as u8, minutes as u8, seconds as u8);

    ZodiacPlacement {
        sign,
        sign_name,
        degrees,
        minutes,
        seconds,
        formatted: format!("{} {}° {}' {}\"", sign_name, degrees, minutes, seconds),
        absolute_longitude: normalized,
    }
}
