use crate::colors::Color;
use crate::math::vec3::Vec3;

/// Three ordered vertices. Winding order determines the normal direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub const fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self {
            vertices: [v1, v2, v3],
        }
    }

    /// Un-normalized face normal `(v2 - v1) x (v3 - v1)`.
    ///
    /// Always derived from the current vertices, never cached.
    pub fn normal(&self) -> Vec3 {
        let [v1, v2, v3] = self.vertices;
        (v2 - v1).cross(v3 - v1)
    }

    /// Unit face normal. NaN for zero-area triangles.
    pub fn unit_normal(&self) -> Vec3 {
        self.normal().normalize()
    }

    /// Sum of the three vertices' z coordinates, the painter's sort key.
    pub fn depth_key(&self) -> f32 {
        self.vertices.iter().map(|v| v.z).sum()
    }

    /// Apply `f` to every vertex, keeping the winding order.
    pub fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        let [v1, v2, v3] = self.vertices;
        Self::new(f(v1), f(v2), f(v3))
    }

    /// Same vertices with the winding order reversed.
    pub fn flipped(&self) -> Self {
        let [v1, v2, v3] = self.vertices;
        Self::new(v1, v3, v2)
    }
}

/// A triangle with its intrinsic color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub triangle: Triangle,
    pub color: Color,
}

impl Surface {
    pub const fn new(triangle: Triangle, color: Color) -> Self {
        Self { triangle, color }
    }

    /// Transform the vertices into a new surface, carrying the color through.
    pub fn map(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self::new(self.triangle.map(f), self.color)
    }
}

impl From<Triangle> for Surface {
    /// Surfaces default to opaque white.
    fn from(triangle: Triangle) -> Self {
        Self::new(triangle, Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn normal_follows_winding() {
        assert_eq!(unit().normal(), Vec3::FORWARD);
        assert_eq!(unit().flipped().normal(), -Vec3::FORWARD);
    }

    #[test]
    fn normal_is_recomputed_after_transform() {
        let moved = unit().map(|v| Vec3::new(v.x, v.z, v.y));
        assert_eq!(moved.normal(), -Vec3::UP);
    }

    #[test]
    fn depth_key_sums_z() {
        let t = unit().map(|v| v + Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(t.depth_key(), 6.0);
    }

    #[test]
    fn surfaces_default_to_white_and_keep_color_through_map() {
        let surface = Surface::from(unit());
        assert_eq!(surface.color, Color::WHITE);

        let red = Surface::new(unit(), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(red.map(|v| v * 2.0).color, red.color);
    }
}
