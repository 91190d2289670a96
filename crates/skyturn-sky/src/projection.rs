//! Camera projection and orientation for viewing the starfield from the origin.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Widest vertical field of view handed to the projection matrix.
pub const MAX_FOV_Y_DEG: f32 = 170.0;

/// Perspective projection whose field of view widens with the aspect ratio.
///
/// The vertical field of view is `horizontal_fov_deg * aspect`, so a wider
/// window shows more sky instead of cropping it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Base field of view in degrees, scaled by aspect.
    pub horizontal_fov_deg: f32,
    /// Vertical field of view in degrees actually used for projection.
    pub fov_y_deg: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

impl Projection {
    /// Build a projection for a viewport. A zero height is treated as one pixel.
    pub fn from_viewport(
        width: u32,
        height: u32,
        horizontal_fov_deg: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut projection = Self {
            horizontal_fov_deg,
            fov_y_deg: horizontal_fov_deg,
            aspect_ratio: 1.0,
            near,
            far,
        };
        projection.resize(width, height);
        projection
    }

    /// Recompute aspect ratio and field of view for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect_ratio = width as f32 / height.max(1) as f32;
        self.fov_y_deg = self.horizontal_fov_deg * self.aspect_ratio;
        log::debug!(
            "Projection resized to {width}x{height}: aspect {:.3}, fov {:.1}°",
            self.aspect_ratio,
            self.fov_y_deg
        );
    }

    /// Right-handed perspective matrix with a `[0, 1]` depth range.
    ///
    /// Very wide viewports are clamped to [`MAX_FOV_Y_DEG`].
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_deg.min(MAX_FOV_Y_DEG).to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }
}

/// Camera orientation. The camera sits at the origin inside the star sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Rotation from camera space (looking down -Z, up +Y) to scene space.
    pub rotation: Quat,
}

impl CameraPose {
    /// Initial pose: looking down -Z, rolled by `tilt` radians about the view axis.
    pub fn tilted(tilt: f32) -> Self {
        Self {
            rotation: Quat::from_rotation_z(tilt),
        }
    }

    /// Pose looking along `direction` with +Y as up. Replaces any roll.
    pub fn looking_at(direction: Vec3) -> Self {
        let forward = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        Self {
            rotation: Quat::from_mat3(&Mat3::from_cols(right, up, -forward)),
        }
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// View matrix for a camera at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation).inverse()
    }
}
