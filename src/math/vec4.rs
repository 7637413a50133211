//! 4D vector for homogeneous coordinates.

use super::vec3::Vec3;

/// Homogeneous 4-vector produced by matrix multiplication.
///
/// `w` carries the perspective divisor after a projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (w=1) from a Vec3.
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    /// Convert to Vec3, discarding w.
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Divide x, y and z by w.
    ///
    /// A w of exactly zero is replaced by one so the divide never produces
    /// infinities for points on the camera plane.
    pub fn perspective_divide(self) -> Vec3 {
        let w = if self.w == 0.0 { 1.0 } else { self.w };
        Vec3::new(self.x / w, self.y / w, self.z / w)
    }
}

impl From<Vec3> for Vec4 {
    /// Convert Vec3 to Vec4 as a point (w=1).
    fn from(v: Vec3) -> Self {
        Self::point(v)
    }
}
