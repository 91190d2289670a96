//! Property-based tests for color mapping and the orbit model using proptest.

use proptest::prelude::*;

use crate::color::{map_magnitudes_to_colors, tier_for_magnitude};
use crate::orbit::compute_orbit;
use crate::palette::PaletteTable;

fn expected_tier(m: f32) -> usize {
    if m > 5.5 {
        0
    } else if m > 4.5 {
        1
    } else if m > 3.5 {
        2
    } else if m > 2.5 {
        3
    } else if m > 1.5 {
        4
    } else {
        5
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every magnitude lands in the tier given by the threshold table.
    #[test]
    fn prop_single_star_tier(m in -30.0f32..30.0) {
        let table = PaletteTable::builtin();
        let scheme = table.select_scheme(PaletteTable::BASIC).unwrap();
        let buffer = map_magnitudes_to_colors(&[m], scheme);
        prop_assert_eq!(tier_for_magnitude(m), expected_tier(m));
        prop_assert_eq!(buffer.colors()[0], scheme.tiers[expected_tier(m)]);
    }

    /// Output has one color per input magnitude, in order.
    #[test]
    fn prop_length_and_alignment(magnitudes in proptest::collection::vec(-5.0f32..10.0, 0..200)) {
        let table = PaletteTable::builtin();
        let scheme = table.select_scheme(PaletteTable::CATPPUCCIN_MOCHA).unwrap();
        let buffer = map_magnitudes_to_colors(&magnitudes, scheme);
        prop_assert_eq!(buffer.len(), magnitudes.len());
        for (color, &m) in buffer.colors().iter().zip(&magnitudes) {
            prop_assert_eq!(*color, scheme.tiers[tier_for_magnitude(m)]);
        }
    }

    /// A brighter star never gets a dimmer tier.
    #[test]
    fn prop_tier_monotonic(a in -10.0f32..10.0, b in -10.0f32..10.0) {
        let (bright, faint) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tier_for_magnitude(bright) >= tier_for_magnitude(faint));
    }

    /// Identical inputs give identical orbits.
    #[test]
    fn prop_orbit_deterministic(t in -1.0e6f64..1.0e6, rate in -1.0f64..1.0) {
        prop_assert_eq!(compute_orbit(t, rate), compute_orbit(t, rate));
    }

    /// Spin angle grows with time for a positive rate.
    #[test]
    fn prop_spin_monotonic(t in 0.0f64..1.0e5, dt in 1.0e-3f64..1.0e3, rate in 1.0e-4f64..1.0) {
        let earlier = compute_orbit(t, rate);
        let later = compute_orbit(t + dt, rate);
        prop_assert!(later.spin_angle > earlier.spin_angle);
    }

    /// Look-at repeats every 4π / rate seconds.
    #[test]
    fn prop_look_at_periodic(t in 0.0f64..1.0e3, rate in 1.0e-3f64..1.0) {
        let period = 4.0 * std::f64::consts::PI / rate;
        let start = compute_orbit(t, rate).look_at;
        let next = compute_orbit(t + period, rate).look_at;
        prop_assert!(
            (start - next).length() < 1e-6,
            "look_at drifted over one period: {start} vs {next}"
        );
    }

    /// y and z components always match.
    #[test]
    fn prop_look_at_y_equals_z(t in -1.0e4f64..1.0e4, rate in -1.0f64..1.0) {
        let look_at = compute_orbit(t, rate).look_at;
        prop_assert_eq!(look_at.y, look_at.z);
    }
}
