//! Frame driver: per-frame orbit step and the boundary to the rendering host.

use glam::{Mat4, Vec3};

use crate::color::{ColorBuffer, map_magnitudes_to_colors};
use crate::orbit::compute_orbit;
use crate::palette::{ColorScheme, PaletteTable, Rgb};
use crate::projection::{CameraPose, Projection};
use crate::{SkyError, StarCatalog};

/// Star point size in pixels when none is configured.
pub const DEFAULT_POINT_SIZE: f32 = 3.0;

/// Settings read whenever colors are recomputed or a frame is stepped.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveProperties {
    /// Apparent sky rotation in radians per second.
    pub rotation_rate: f64,
    /// Name of the active scheme in the [`PaletteTable`].
    pub color_scheme: String,
}

impl Default for ActiveProperties {
    fn default() -> Self {
        Self {
            rotation_rate: 0.5_f64.to_radians(),
            color_scheme: PaletteTable::CATPPUCCIN_MOCHA.to_string(),
        }
    }
}

/// Everything the host needs to orient one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    /// Host timestamp this command was computed for.
    pub timestamp_ms: f64,
    /// Camera look-at direction from the origin.
    pub look_at: Vec3,
    /// Star geometry rotation about +Y, in radians.
    pub spin_angle: f32,
}

impl RenderCommand {
    /// Pure frame step: orient the camera and geometry for `timestamp_ms`.
    pub fn step(timestamp_ms: f64, properties: &ActiveProperties) -> Self {
        let orbit = compute_orbit(timestamp_ms * 0.001, properties.rotation_rate);
        Self {
            timestamp_ms,
            look_at: orbit.look_at.as_vec3(),
            spin_angle: orbit.spin_angle as f32,
        }
    }

    /// Camera orientation implied by [`look_at`](Self::look_at).
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::looking_at(self.look_at)
    }

    /// View matrix for the camera at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        self.camera_pose().view_matrix()
    }

    /// Model matrix spinning the star geometry about +Y.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.spin_angle)
    }
}

/// The rendering engine as seen from the starfield.
///
/// Implementations own the scene graph, buffers, and window. Positions and
/// colors are always index-aligned.
pub trait SceneHost {
    /// Set the scene clear color.
    fn set_background(&mut self, color: Rgb);
    /// Replace the star position attribute.
    fn set_positions(&mut self, positions: &[[f32; 3]]);
    /// Replace the star color attribute.
    fn set_colors(&mut self, colors: &ColorBuffer);
    /// Set the on-screen star size in pixels, independent of distance.
    fn set_point_size(&mut self, size: f32);
    /// Apply projection parameters after creation or resize.
    fn set_projection(&mut self, projection: &Projection);
    /// Set the camera orientation outright.
    fn set_camera_pose(&mut self, pose: CameraPose);
    /// Point the camera along `direction`.
    fn set_look_at(&mut self, direction: Vec3);
    /// Rotate the star geometry about its vertical axis.
    fn set_spin_angle(&mut self, angle: f32);
    /// Draw the frame.
    fn draw(&mut self);
}

/// Catalog, palette, and the colors derived from them.
pub struct Starfield {
    catalog: StarCatalog,
    palettes: PaletteTable,
    properties: ActiveProperties,
    scheme: ColorScheme,
    colors: ColorBuffer,
}

impl Starfield {
    /// Select the configured scheme and color the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SkyError::UnknownScheme`] if the scheme is not in `palettes`.
    pub fn new(
        catalog: StarCatalog,
        palettes: PaletteTable,
        properties: ActiveProperties,
    ) -> Result<Self, SkyError> {
        let scheme = palettes.select_scheme(&properties.color_scheme)?.clone();
        let colors = map_magnitudes_to_colors(catalog.magnitudes(), &scheme);
        log::info!(
            "Starfield ready: {} stars, scheme {:?}",
            catalog.len(),
            properties.color_scheme
        );
        Ok(Self {
            catalog,
            palettes,
            properties,
            scheme,
            colors,
        })
    }

    /// Replace the active properties.
    ///
    /// Returns `true` when the scheme changed and colors were recomputed. On
    /// error nothing is modified.
    pub fn apply_properties(&mut self, properties: ActiveProperties) -> Result<bool, SkyError> {
        let recolor = properties.color_scheme != self.properties.color_scheme;
        if recolor {
            let scheme = self.palettes.select_scheme(&properties.color_scheme)?.clone();
            self.colors = map_magnitudes_to_colors(self.catalog.magnitudes(), &scheme);
            self.scheme = scheme;
            log::info!("Color scheme changed to {:?}", properties.color_scheme);
        }
        if properties.rotation_rate != self.properties.rotation_rate {
            log::info!(
                "Rotation rate changed to {:.4} rad/s",
                properties.rotation_rate
            );
        }
        self.properties = properties;
        Ok(recolor)
    }

    /// Swap in a new catalog and recolor it with the current scheme.
    pub fn replace_catalog(&mut self, catalog: StarCatalog) {
        self.colors = map_magnitudes_to_colors(catalog.magnitudes(), &self.scheme);
        self.catalog = catalog;
        log::info!("Catalog replaced: {} stars", self.catalog.len());
    }

    /// The catalog being drawn.
    pub fn catalog(&self) -> &StarCatalog {
        &self.catalog
    }

    /// Properties applied most recently.
    pub fn properties(&self) -> &ActiveProperties {
        &self.properties
    }

    /// The selected color scheme.
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Per-star colors, index-aligned with the catalog.
    pub fn colors(&self) -> &ColorBuffer {
        &self.colors
    }
}

/// Pushes starfield state into a [`SceneHost`] and steps it each frame.
pub struct FrameDriver {
    starfield: Starfield,
    projection: Projection,
    tilt: f32,
    point_size: f32,
    frames: u64,
}

impl FrameDriver {
    /// Wrap a starfield with its projection and initial camera roll in radians.
    pub fn new(starfield: Starfield, projection: Projection, tilt: f32) -> Self {
        Self {
            starfield,
            projection,
            tilt,
            point_size: DEFAULT_POINT_SIZE,
            frames: 0,
        }
    }

    /// Use `size` pixels for star points instead of [`DEFAULT_POINT_SIZE`].
    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    /// Upload geometry, colors, background, point size, projection, and the
    /// initial pose.
    pub fn attach(&self, host: &mut impl SceneHost) {
        host.set_background(self.starfield.scheme().background);
        host.set_positions(self.starfield.catalog().positions());
        host.set_colors(self.starfield.colors());
        host.set_point_size(self.point_size);
        host.set_projection(&self.projection);
        host.set_camera_pose(CameraPose::tilted(self.tilt));
    }

    /// Orient camera and geometry for `timestamp_ms`, then draw.
    pub fn frame(&mut self, host: &mut impl SceneHost, timestamp_ms: f64) -> RenderCommand {
        let command = RenderCommand::step(timestamp_ms, self.starfield.properties());
        host.set_look_at(command.look_at);
        host.set_spin_angle(command.spin_angle);
        host.draw();
        self.frames += 1;
        command
    }

    /// Recompute projection for a new viewport and hand it to the host.
    pub fn resize(&mut self, host: &mut impl SceneHost, width: u32, height: u32) {
        self.projection.resize(width, height);
        host.set_projection(&self.projection);
    }

    /// Replace the projection outright, e.g. after a field of view change.
    pub fn set_projection(&mut self, host: &mut impl SceneHost, projection: Projection) {
        self.projection = projection;
        host.set_projection(&self.projection);
    }

    /// Change the star point size.
    pub fn set_point_size(&mut self, host: &mut impl SceneHost, size: f32) {
        self.point_size = size;
        host.set_point_size(size);
    }

    /// Swap the catalog, re-uploading positions and colors together.
    pub fn replace_catalog(&mut self, host: &mut impl SceneHost, catalog: StarCatalog) {
        self.starfield.replace_catalog(catalog);
        host.set_positions(self.starfield.catalog().positions());
        host.set_colors(self.starfield.colors());
    }

    /// Apply new properties, re-uploading background and colors if the scheme
    /// changed. Returns whether it did.
    pub fn apply_properties(
        &mut self,
        host: &mut impl SceneHost,
        properties: ActiveProperties,
    ) -> Result<bool, SkyError> {
        let recolored = self.starfield.apply_properties(properties)?;
        if recolored {
            host.set_background(self.starfield.scheme().background);
            host.set_colors(self.starfield.colors());
        }
        Ok(recolored)
    }

    /// The starfield being driven.
    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Current projection.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Star point size in pixels.
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Frames drawn so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
