//! # Property-Based Tests
//!
//! Invariants of the angle domain, checked with proptest.

use houses_core::{
    CuspShape, Hemisphere, RawHouseResult, SecondsRounding, SiderealTime, SignNames,
    ZodiacPlacement, normalize_degrees, placement_with, to_decimal_degrees, to_zodiac_placement,
};
use proptest::collection::vec;
use proptest::prelude::*;

const ONE_ARC_SECOND: f64 = 1.0 / 3600.0;

/// Smallest separation between two longitudes, in [0, 180].
fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

/// Longitude rebuilt from a placement's sign and d/m/s parts.
fn rebuilt_longitude(p: &ZodiacPlacement) -> f64 {
    let in_sign =
        f64::from(p.degrees) + f64::from(p.minutes) / 60.0 + f64::from(p.seconds) / 3600.0;
    normalize_degrees(p.sign.index() as f64 * 30.0 + in_sign)
}

fn rounding() -> impl Strategy<Value = SecondsRounding> {
    prop_oneof![
        Just(SecondsRounding::Carry),
        Just(SecondsRounding::Clamp),
        Just(SecondsRounding::Legacy),
    ]
}

fn hemisphere() -> impl Strategy<Value = Option<Hemisphere>> {
    prop_oneof![
        Just(None),
        Just(Some(Hemisphere::North)),
        Just(Some(Hemisphere::South)),
        Just(Some(Hemisphere::East)),
        Just(Some(Hemisphere::West)),
    ]
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// Normalization lands in [0, 360) and is idempotent.
    #[test]
    fn normalize_is_idempotent(x in -1.0e6f64..1.0e6f64) {
        let once = normalize_degrees(x);
        prop_assert!((0.0..360.0).contains(&once));
        prop_assert!((normalize_degrees(once) - once).abs() < 1e-9);
    }

    /// Sign index is always 0..=11 and the split parts rebuild the longitude
    /// to within one arc-second.
    #[test]
    fn placement_rebuilds_longitude(x in -720.0f64..720.0f64, mode in rounding()) {
        let p = placement_with(x, mode, SignNames::English);
        prop_assert!(p.sign.index() <= 11);
        prop_assert!(p.degrees < 30);
        prop_assert!(p.minutes < 60);
        prop_assert!(angular_distance(rebuilt_longitude(&p), x) <= ONE_ARC_SECOND + 1e-9);
    }

    /// Under carry and clamp, seconds never read 60.
    #[test]
    fn seconds_stay_below_sixty(x in 0.0f64..360.0f64) {
        for mode in [SecondsRounding::Carry, SecondsRounding::Clamp] {
            let p = placement_with(x, mode, SignNames::Portuguese);
            prop_assert!(p.seconds < 60);
        }
    }

    /// Under every rounding policy the sign is the one containing the longitude.
    #[test]
    fn sign_matches_thirty_degree_table(x in 0.0f64..360.0f64, mode in rounding()) {
        let p = placement_with(x, mode, SignNames::English);
        prop_assert_eq!(p.sign.index(), (x / 30.0).floor() as usize);
    }

    /// The last arc-second of every sign stays in that sign by default.
    #[test]
    fn sign_end_stays_in_sign(sign in 0usize..12, tail in 0.5f64..0.999f64) {
        let x = sign as f64 * 30.0 + 29.0 + 59.0 / 60.0 + (59.0 + tail) / 3600.0;
        let p = to_zodiac_placement(x);
        prop_assert_eq!(p.sign.index(), sign);
        prop_assert_eq!((p.degrees, p.minutes, p.seconds), (29, 59, 59));
    }

    /// Valid sidereal time always maps into [0, 360).
    #[test]
    fn armc_stays_in_circle(h in 0u8..24, m in 0u8..60, s in 0.0f64..60.0f64) {
        let st = SiderealTime::new(h as f64, m as f64, s).expect("valid");
        prop_assert!((0.0..360.0).contains(&st.armc()));
    }

    /// The hemisphere alone decides the sign of the decimal value.
    #[test]
    fn hemisphere_decides_sign(
        deg in 0u8..=90,
        min in 0u8..60,
        sec in 0.0f64..60.0f64,
        h in hemisphere()
    ) {
        let v = to_decimal_degrees(deg as f64, min as f64, sec, h);
        let magnitude = to_decimal_degrees(deg as f64, min as f64, sec, None);
        prop_assert!((v.abs() - magnitude).abs() < 1e-12);
        match h {
            Some(Hemisphere::South) | Some(Hemisphere::West) => prop_assert!(v <= 0.0),
            _ => prop_assert!(v >= 0.0),
        }
    }

    /// A padded 13-value sequence always yields its last twelve values in order.
    #[test]
    fn padded_sequence_keeps_order(
        placeholder in -1.0e3f64..1.0e3f64,
        cusps in vec(0.0f64..360.0f64, 12)
    ) {
        let mut raw = vec![placeholder];
        raw.extend(cusps.iter().copied());
        let shape = CuspShape::detect(RawHouseResult::Flat(raw)).expect("shape");
        prop_assert_eq!(shape.cusps().to_vec(), cusps);
    }

    /// Any flat length other than 12 or 13 is rejected.
    #[test]
    fn wrong_lengths_rejected(len in 0usize..40) {
        prop_assume!(len != 12 && len != 13);
        let result = CuspShape::detect(RawHouseResult::Flat(vec![1.0; len]));
        prop_assert!(result.is_err());
    }
}
