//! Ordered collections of surfaces and the per-vertex transform stages.
//!
//! Meshes are built once and never mutated in place: every transform stage
//! derives a new [`Mesh`] from its input.

use crate::colors::Color;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::triangle::{Surface, Triangle};

/// An ordered sequence of surfaces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    surfaces: Vec<Surface>,
}

// Unit cube corners, indexed by (x, y, z) bits.
const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

// Winding is chosen so (v2 - v1) x (v3 - v1) points into the cube: a face
// passes the visibility test when that normal points away from the viewer.
const CUBE_FACES: [[usize; 3]; 12] = [
    // south (z = 0)
    [0, 3, 2],
    [0, 1, 3],
    // east (x = 1)
    [1, 7, 3],
    [1, 5, 7],
    // north (z = 1)
    [5, 6, 7],
    [5, 4, 6],
    // west (x = 0)
    [4, 2, 6],
    [4, 0, 2],
    // top (y = 1)
    [2, 7, 6],
    [2, 3, 7],
    // bottom (y = 0)
    [5, 0, 4],
    [5, 1, 0],
];

impl Mesh {
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }

    /// Builds a mesh of white surfaces from bare triangles.
    pub fn from_triangles(triangles: impl IntoIterator<Item = Triangle>) -> Self {
        Self::new(triangles.into_iter().map(Surface::from).collect())
    }

    /// The 12-triangle unit cube spanning `[0, 1]` on every axis.
    pub fn unit_cube() -> Self {
        Self::from_triangles(CUBE_FACES.iter().map(|&[a, b, c]| {
            Triangle::new(CUBE_VERTICES[a], CUBE_VERTICES[b], CUBE_VERTICES[c])
        }))
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Surface> {
        self.surfaces.iter()
    }

    /// Derive a new mesh by applying `f` to every vertex, preserving order
    /// and surface colors.
    pub fn map_vertices(&self, f: impl Fn(Vec3) -> Vec3) -> Mesh {
        Mesh::new(self.surfaces.iter().map(|s| s.map(&f)).collect())
    }

    /// Derive a new mesh with every vertex multiplied through `matrix`
    /// (including the divide by the resulting w).
    pub fn transformed(&self, matrix: &Mat4) -> Mesh {
        self.map_vertices(|v| matrix.transform_point(v).perspective_divide())
    }

    /// Derive a new mesh translated by `offset`.
    pub fn translated(&self, offset: Vec3) -> Mesh {
        self.map_vertices(|v| v + offset)
    }

    /// Derive a new mesh with every surface recolored.
    pub fn with_color(&self, color: Color) -> Mesh {
        Mesh::new(
            self.surfaces
                .iter()
                .map(|s| Surface::new(s.triangle, color))
                .collect(),
        )
    }
}

impl FromIterator<Surface> for Mesh {
    fn from_iter<I: IntoIterator<Item = Surface>>(iter: I) -> Self {
        Mesh::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Surface;
    type IntoIter = std::slice::Iter<'a, Surface>;

    fn into_iter(self) -> Self::IntoIter {
        self.surfaces.iter()
    }
}
