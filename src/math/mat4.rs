//! 4x4 transformation matrix using the row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `v * M`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! Matrices are only built through the named constructors below; callers
//! never poke individual elements.
//!
//! # Example
//! ```ignore
//! let model = Mat4::rotation_z(theta).then(&Mat4::rotation_x(theta / 2.0));
//! let moved = model.transform_point(vertex).perspective_divide();
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub(crate) const fn from_rows(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix. Translation lives in the last row.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis.
    ///
    /// The (y, z) block is `[cos, sin; -sin, cos]`.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    ///
    /// Note the sign flip relative to X and Z: the (x, z) block is
    /// `[cos, -sin; sin, cos]`.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::from_rows([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis.
    ///
    /// The (x, y) block is `[cos, sin; -sin, cos]`.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::from_rows([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a perspective projection matrix.
    ///
    /// # Arguments
    ///
    /// * `fov_degrees` - Vertical field of view in degrees.
    /// * `aspect_ratio` - Viewport height divided by width.
    /// * `near` - Near plane distance.
    /// * `far` - Far plane distance.
    ///
    /// The input z lands in the result's `w`, so the caller's perspective
    /// divide is by view-space depth. `near == far` yields infinities; no
    /// guard is applied here.
    pub fn perspective(fov_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let fov_factor = 1.0 / (fov_degrees.to_radians() * 0.5).tan();
        let q = far / (far - near);
        Mat4::from_rows([
            [aspect_ratio * fov_factor, 0.0, 0.0, 0.0],
            [0.0, fov_factor, 0.0, 0.0],
            [0.0, 0.0, q, 1.0],
            [0.0, 0.0, -far * near / (far - near), 0.0],
        ])
    }

    /// Creates the matrix that places an object at `eye` facing `target`.
    ///
    /// Rows are the orthonormal basis (right, up, forward) followed by the
    /// eye position.
    pub fn point_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let (right, up, forward) = Self::basis(eye, target, up);
        Mat4::from_rows([
            [right.x, right.y, right.z, 0.0],
            [up.x, up.y, up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [eye.x, eye.y, eye.z, 1.0],
        ])
    }

    /// Creates the inverse of [`Mat4::point_at`]: transforms world-space
    /// points into the eye's basis with the translation folded in.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the viewer.
    /// * `target` - The point the viewer is looking at.
    /// * `up` - Approximate up direction; re-orthogonalized against forward.
    pub fn look_at_inverse(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let (right, up, forward) = Self::basis(eye, target, up);
        Mat4::from_rows([
            [right.x, up.x, forward.x, 0.0],
            [right.y, up.y, forward.y, 0.0],
            [right.z, up.z, forward.z, 0.0],
            [-eye.dot(right), -eye.dot(up), -eye.dot(forward), 1.0],
        ])
    }

    fn basis(eye: Vec3, target: Vec3, up: Vec3) -> (Vec3, Vec3, Vec3) {
        let forward = (target - eye).normalize();
        let up = (up - forward * up.dot(forward)).normalize();
        let right = up.cross(forward);
        (right, up, forward)
    }

    /// Row-vector product `v * self`. The caller performs any perspective
    /// divide on the result.
    pub fn multiply_vector(&self, v: Vec4) -> Vec4 {
        let m = &self.data;
        Vec4::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        )
    }

    /// Transforms a point (w=1) without dividing by the resulting w.
    pub fn transform_point(&self, p: Vec3) -> Vec4 {
        self.multiply_vector(Vec4::point(p))
    }

    /// Returns the matrix that applies `self` first, then `next`.
    pub fn then(&self, next: &Mat4) -> Mat4 {
        *self * *next
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix product. Under the row-vector convention `v * (A * B)` applies A
/// first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::from_rows(result)
    }
}

/// Transform a row vector: `v * M`.
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        m.multiply_vector(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-5);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-5);
        assert_abs_diff_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn rotation_then_inverse_rotation_is_identity() {
        let v = Vec3::new(0.3, -1.7, 2.2);
        for theta in [0.0f32, 0.4, 1.3, 3.0, -2.5, 10.0] {
            for (forward, back) in [
                (Mat4::rotation_x(theta), Mat4::rotation_x(-theta)),
                (Mat4::rotation_y(theta), Mat4::rotation_y(-theta)),
                (Mat4::rotation_z(theta), Mat4::rotation_z(-theta)),
            ] {
                let rotated = forward.transform_point(v).to_vec3();
                let restored = back.transform_point(rotated).to_vec3();
                assert_vec3_eq(restored, v);
            }
        }
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let rotated = Mat4::rotation_z(0.7)
            .then(&Mat4::rotation_x(0.35))
            .transform_point(v)
            .to_vec3();
        assert_abs_diff_eq!(rotated.length(), v.length(), epsilon = 1e-5);
    }

    #[test]
    fn rotation_x_sign_convention() {
        // (y, z) block [cos, sin; -sin, cos] under v * M maps +y to +z.
        let v = Mat4::rotation_x(FRAC_PI_2)
            .transform_point(Vec3::UP)
            .to_vec3();
        assert_vec3_eq(v, Vec3::FORWARD);
    }

    #[test]
    fn rotation_z_sign_convention() {
        let v = Mat4::rotation_z(FRAC_PI_2)
            .transform_point(Vec3::RIGHT)
            .to_vec3();
        assert_vec3_eq(v, Vec3::UP);
    }

    #[test]
    fn translation_lives_in_last_row() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn then_applies_left_matrix_first() {
        let rotate = Mat4::rotation_z(FRAC_PI_2);
        let shift = Mat4::translation(5.0, 0.0, 0.0);
        let p = rotate.then(&shift).transform_point(Vec3::RIGHT).to_vec3();
        assert_vec3_eq(p, Vec3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn perspective_layout() {
        let m = Mat4::perspective(90.0, 0.5, 0.1, 1000.0);
        assert_abs_diff_eq!(m.get(0, 0), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(m.get(1, 1), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.get(2, 2), 1000.0 / 999.9, epsilon = 1e-6);
        assert_eq!(m.get(2, 3), 1.0);
        assert_abs_diff_eq!(m.get(3, 2), -100.0 / 999.9, epsilon = 1e-6);
        assert_eq!(m.get(3, 3), 0.0);
    }

    #[test]
    fn projecting_optical_axis_lands_at_ndc_origin() {
        let (near, far) = (0.1, 1000.0);
        let m = Mat4::perspective(90.0, 0.75, near, far);
        let ndc = m
            .transform_point(Vec3::new(0.0, 0.0, (near + far) / 2.0))
            .perspective_divide();
        assert_abs_diff_eq!(ndc.x, 0.0);
        assert_abs_diff_eq!(ndc.y, 0.0);
    }

    #[test]
    fn degenerate_planes_propagate_non_finite_values() {
        let m = Mat4::perspective(90.0, 1.0, 1.0, 1.0);
        assert!(!m.get(2, 2).is_finite());
    }

    #[test]
    fn look_at_inverse_maps_eye_to_origin_and_target_onto_forward_axis() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let target = Vec3::new(1.0, 2.0, 8.0);
        let view = Mat4::look_at_inverse(eye, target, Vec3::UP);

        assert_vec3_eq(view.transform_point(eye).to_vec3(), Vec3::ZERO);
        assert_vec3_eq(
            view.transform_point(target).to_vec3(),
            Vec3::new(0.0, 0.0, 5.0),
        );
    }

    #[test]
    fn look_at_inverse_undoes_point_at() {
        let eye = Vec3::new(-2.0, 0.5, 1.0);
        let target = Vec3::new(3.0, 1.0, -4.0);
        let p = Vec3::new(0.25, -3.0, 7.5);
        let round_trip = Mat4::point_at(eye, target, Vec3::UP)
            .then(&Mat4::look_at_inverse(eye, target, Vec3::UP))
            .transform_point(p)
            .to_vec3();
        assert_vec3_eq(round_trip, p);
    }

    #[test]
    fn row_vector_operator_matches_multiply_vector() {
        let m = Mat4::rotation_y(0.3).then(&Mat4::translation(1.0, -1.0, 2.0));
        let v = Vec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(v * m, m.multiply_vector(v));
    }
}
