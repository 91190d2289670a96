//! Orbit model: elapsed time to camera look-at direction and point-cloud spin.

use glam::DVec3;

/// Camera and geometry orientation at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Direction the camera looks toward, from the origin.
    ///
    /// Not normalized: `(cos t, sin t, sin t)` has length `sqrt(1 + sin² t)`.
    /// Look-at only uses the direction.
    pub look_at: DVec3,
    /// Rotation of the star geometry about the vertical (Y) axis, in radians.
    pub spin_angle: f64,
}

/// Compute the orbit for `elapsed_seconds` at `rotation_rate` radians per second.
///
/// The rate is halved because the point cloud spins against the apparent sky
/// motion; camera and spin share the same phase `t`.
pub fn compute_orbit(elapsed_seconds: f64, rotation_rate: f64) -> Orbit {
    let t = 0.5 * rotation_rate * elapsed_seconds;
    let (sin_t, cos_t) = t.sin_cos();
    Orbit {
        look_at: DVec3::new(cos_t, sin_t, sin_t),
        spin_angle: t,
    }
}

/// Period in seconds after which [`Orbit::look_at`] repeats, `4π / rate`.
///
/// Returns `None` for a zero rate, where the camera never moves.
pub fn look_at_period(rotation_rate: f64) -> Option<f64> {
    (rotation_rate != 0.0).then(|| 4.0 * std::f64::consts::PI / rotation_rate.abs())
}
