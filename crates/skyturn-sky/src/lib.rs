//! Starfield core: star catalog, brightness palettes, color mapping, and the
//! orbit model that turns elapsed time into camera and point-cloud motion.
//!
//! Rendering is delegated to a [`SceneHost`] supplied by the caller. The core
//! never owns an event loop; the host calls [`FrameDriver::frame`] once per
//! frame with a monotonically increasing timestamp.

pub mod catalog;
pub mod color;
mod error;
pub mod frame;
pub mod generator;
pub mod orbit;
pub mod palette;
pub mod projection;

#[cfg(test)]
mod proptest_sky;

pub use catalog::{CatalogFile, Star, StarCatalog};
pub use color::{ColorBuffer, MAGNITUDE_THRESHOLDS, map_magnitudes_to_colors, tier_for_magnitude};
pub use error::SkyError;
pub use frame::{
    ActiveProperties, DEFAULT_POINT_SIZE, FrameDriver, RenderCommand, SceneHost, Starfield,
};
pub use generator::CatalogGenerator;
pub use orbit::{Orbit, compute_orbit, look_at_period};
pub use palette::{ColorScheme, PaletteTable, Rgb, TIER_COUNT};
pub use projection::{CameraPose, Projection};
