//! Named color schemes: a background color plus six brightness-tier colors.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::SkyError;

/// Number of brightness tiers in every color scheme.
pub const TIER_COUNT: usize = 6;

/// Linear RGB color with channels in `[0.0, 1.0]`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Create a color from channel values.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode a packed `0xRRGGBB` value. Bits above the low 24 are ignored.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Channels as an array.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// A background color and six tier colors.
///
/// Tiers are stored dimmest first: `tiers[0]` colors the faintest stars and
/// `tiers[TIER_COUNT - 1]` the brightest.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScheme {
    /// Scene clear color.
    pub background: Rgb,
    /// Tier colors, dimmest to brightest.
    pub tiers: [Rgb; TIER_COUNT],
}

impl ColorScheme {
    /// Build a scheme from packed `0xRRGGBB` values.
    pub fn from_hex(background: u32, tiers: [u32; TIER_COUNT]) -> Self {
        Self {
            background: Rgb::from_hex(background),
            tiers: tiers.map(Rgb::from_hex),
        }
    }
}

/// Immutable mapping from scheme name to [`ColorScheme`].
#[derive(Clone, Debug, Default)]
pub struct PaletteTable {
    schemes: HashMap<String, ColorScheme>,
}

impl PaletteTable {
    /// Grayscale ramp on a near-black background.
    pub const BASIC: &'static str = "Basic";
    /// Catppuccin Mocha overlay/subtext/text ramp on the Mocha base.
    pub const CATPPUCCIN_MOCHA: &'static str = "Catppuccin Mocha";

    /// The palettes shipped with the application.
    pub fn builtin() -> Self {
        [
            (
                Self::BASIC,
                ColorScheme::from_hex(
                    0x111111,
                    [0x494949, 0x6d6d6d, 0x929292, 0xb6b6b6, 0xdbdbdb, 0xffffff],
                ),
            ),
            (
                Self::CATPPUCCIN_MOCHA,
                ColorScheme::from_hex(
                    0x1e1e2e,
                    [0x6c7086, 0x7f849c, 0x9399b2, 0xa6adc8, 0xbac2de, 0xcdd6f4],
                ),
            ),
        ]
        .into_iter()
        .map(|(name, scheme)| (name.to_string(), scheme))
        .collect()
    }

    /// Look up a scheme by name.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError::UnknownScheme`] if no scheme has that name.
    pub fn select_scheme(&self, name: &str) -> Result<&ColorScheme, SkyError> {
        self.schemes
            .get(name)
            .ok_or_else(|| SkyError::UnknownScheme(name.to_string()))
    }

    /// Whether a scheme with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.schemes.contains_key(name)
    }

    /// Scheme names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of schemes.
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

/// Later entries with a repeated name replace earlier ones.
impl FromIterator<(String, ColorScheme)> for PaletteTable {
    fn from_iter<I: IntoIterator<Item = (String, ColorScheme)>>(iter: I) -> Self {
        Self {
            schemes: iter.into_iter().collect(),
        }
    }
}
