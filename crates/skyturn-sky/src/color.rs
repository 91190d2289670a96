//! Magnitude-to-color mapping.

use crate::palette::{ColorScheme, Rgb, TIER_COUNT};

/// Tier thresholds, dimmest first. A magnitude strictly greater than
/// `MAGNITUDE_THRESHOLDS[i]` (and not greater than any earlier entry) selects
/// tier `i`; anything at or below the last threshold selects the brightest tier.
pub const MAGNITUDE_THRESHOLDS: [f32; TIER_COUNT - 1] = [5.5, 4.5, 3.5, 2.5, 1.5];

/// Tier index for a magnitude. `0` is the dimmest tier.
///
/// Ties go to the dimmer tier. NaN compares false against every threshold and
/// lands in the brightest tier.
pub fn tier_for_magnitude(magnitude: f32) -> usize {
    MAGNITUDE_THRESHOLDS
        .iter()
        .position(|&threshold| magnitude > threshold)
        .unwrap_or(TIER_COUNT - 1)
}

/// Per-star colors, index-aligned with the catalog they were computed from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorBuffer {
    colors: Vec<Rgb>,
}

impl ColorBuffer {
    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors in catalog order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Flattened `r, g, b` floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Raw bytes for a vertex color buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

/// Color every star by its magnitude tier in `scheme`.
///
/// The output has one entry per input magnitude, in the same order.
pub fn map_magnitudes_to_colors(magnitudes: &[f32], scheme: &ColorScheme) -> ColorBuffer {
    let colors = magnitudes
        .iter()
        .map(|&m| scheme.tiers[tier_for_magnitude(m)])
        .collect();
    ColorBuffer { colors }
}
