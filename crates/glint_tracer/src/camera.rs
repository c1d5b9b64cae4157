//! Camera for primary ray generation.
//!
//! Axis convention: z vertically upwards, y forward from the camera,
//! x sideways to the right.

use glint_math::{Ray, Vec3};

/// Distance from the camera origin to the viewport plane.
const VIEWPORT_DIST: f64 = 1.0;

/// Camera generating rays into the scene.
///
/// The viewport is centered one unit forward of the origin along +y.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub origin: Vec3,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Camera {
    /// Create a camera from an aspect ratio and viewport height.
    pub fn new(origin: Vec3, aspect_ratio: f64, viewport_height: f64) -> Self {
        Self {
            origin,
            viewport_width: viewport_height * aspect_ratio,
            viewport_height,
        }
    }

    /// Generate the ray through viewport coordinates (u, v).
    ///
    /// `u` runs rightward and `v` upward, both nominally in [0, 1] with
    /// (0.5, 0.5) at the viewport center. The returned direction is left
    /// unnormalized.
    pub fn ray(&self, u: f64, v: f64) -> Ray {
        let direction = Vec3::new(
            self.viewport_width * (u - 0.5),
            VIEWPORT_DIST,
            self.viewport_height * (v - 0.5),
        );
        Ray::new(self.origin, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 16.0 / 9.0, 2.0)
    }
}
