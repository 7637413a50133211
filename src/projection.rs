//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the
//! perspective parameters (FOV, near/far planes). The viewport aspect ratio is
//! supplied when the matrix is built, so the matrix can be regenerated every
//! time the viewport changes shape.

use crate::math::mat4::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    fov_degrees: f32,
    /// Near plane distance.
    z_near: f32,
    /// Far plane distance.
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(90.0, 0.1, 1000.0)
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `z_near` - Near plane distance
    /// * `z_far` - Far plane distance (`z_near == z_far` produces non-finite output)
    pub fn new(fov_degrees: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_degrees,
            z_near,
            z_far,
        }
    }

    /// Returns the vertical field of view in degrees.
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Returns the near plane distance.
    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    /// Returns the far plane distance.
    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Aspect ratio used by the projection: height divided by width.
    pub fn aspect_ratio(width: u32, height: u32) -> f32 {
        height as f32 / width as f32
    }

    /// Generates the perspective projection matrix for a viewport.
    pub fn matrix(&self, width: u32, height: u32) -> Mat4 {
        Mat4::perspective(
            self.fov_degrees,
            Self::aspect_ratio(width, height),
            self.z_near,
            self.z_far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn aspect_is_height_over_width() {
        assert_relative_eq!(Projection::aspect_ratio(800, 600), 0.75);
    }

    #[test]
    fn wide_viewport_squeezes_x() {
        let proj = Projection::default();
        let m = proj.matrix(200, 100);
        assert_relative_eq!(m.get(0, 0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(m.get(1, 1), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn narrower_fov_magnifies() {
        let wide = Projection::new(90.0, 0.1, 100.0).matrix(100, 100);
        let narrow = Projection::new(45.0, 0.1, 100.0).matrix(100, 100);
        assert!(narrow.get(1, 1) > wide.get(1, 1));
    }
}
