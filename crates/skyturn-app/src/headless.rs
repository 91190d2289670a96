//! A [`SceneHost`] without a GPU: keeps the latest scene state and traces
//! every call. Used for dry runs and tests.

use glam::{Mat4, Vec3};
use skyturn_sky::{CameraPose, ColorBuffer, Projection, Rgb, SceneHost};
use tracing::{debug, trace, warn};

/// Scene state as the host last saw it.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    background: Rgb,
    positions: Vec<[f32; 3]>,
    colors: Vec<Rgb>,
    point_size: f32,
    projection: Option<Projection>,
    camera: Option<CameraPose>,
    spin_angle: f32,
    draws: u64,
    misaligned_draws: u64,
}

impl HeadlessHost {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last clear color set.
    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Number of uploaded star positions.
    pub fn star_count(&self) -> usize {
        self.positions.len()
    }

    /// Uploaded star colors.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Star point size in pixels.
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Last projection set, if any.
    pub fn projection(&self) -> Option<&Projection> {
        self.projection.as_ref()
    }

    /// Current camera pose, if any.
    pub fn camera(&self) -> Option<CameraPose> {
        self.camera
    }

    /// Current geometry spin in radians.
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Frames drawn.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Frames drawn while positions and colors had different lengths.
    pub fn misaligned_draws(&self) -> u64 {
        self.misaligned_draws
    }

    /// Model-view-projection matrix for the current state, once a projection
    /// and camera have been set.
    pub fn view_projection(&self) -> Option<Mat4> {
        let projection = self.projection.as_ref()?;
        let camera = self.camera?;
        Some(projection.matrix() * camera.view_matrix() * Mat4::from_rotation_y(self.spin_angle))
    }
}

impl SceneHost for HeadlessHost {
    fn set_background(&mut self, color: Rgb) {
        debug!(?color, "background");
        self.background = color;
    }

    fn set_positions(&mut self, positions: &[[f32; 3]]) {
        debug!(stars = positions.len(), "positions uploaded");
        self.positions = positions.to_vec();
    }

    fn set_colors(&mut self, colors: &ColorBuffer) {
        debug!(stars = colors.len(), "colors uploaded");
        self.colors = colors.colors().to_vec();
    }

    fn set_point_size(&mut self, size: f32) {
        debug!(size, "point size");
        self.point_size = size;
    }

    fn set_projection(&mut self, projection: &Projection) {
        debug!(
            aspect = projection.aspect_ratio,
            fov_y_deg = projection.fov_y_deg,
            "projection"
        );
        self.projection = Some(projection.clone());
    }

    fn set_camera_pose(&mut self, pose: CameraPose) {
        self.camera = Some(pose);
    }

    fn set_look_at(&mut self, direction: Vec3) {
        self.camera = Some(CameraPose::looking_at(direction));
    }

    fn set_spin_angle(&mut self, angle: f32) {
        self.spin_angle = angle;
    }

    fn draw(&mut self) {
        if self.positions.len() != self.colors.len() {
            warn!(
                positions = self.positions.len(),
                colors = self.colors.len(),
                "drawing with misaligned attributes"
            );
            self.misaligned_draws += 1;
        }
        self.draws += 1;
        trace!(
            frame = self.draws,
            spin = self.spin_angle,
            forward = ?self.camera.map(|c| c.forward()),
            view_projection = ?self.view_projection(),
            "draw"
        );
    }
}
