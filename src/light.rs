//! Light sources for flat per-surface shading.

use crate::colors::Color;
use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
    pub color: Color,
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3, color: Color) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
            color,
        }
    }

    /// Lambert factor in `[0, 1]`: `max(0, -direction . normal)`.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        // Negate direction: light pointing at surface = positive dot product
        (-self.direction).dot(normal).max(0.0)
    }
}

/// Every kind of light the pipeline can accumulate.
///
/// New kinds of light are added as variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightSource {
    Directional(DirectionalLight),
}

impl LightSource {
    /// Position that surface points are made relative to before
    /// [`LightSource::compute_color`]. Directional lights sit at the origin.
    pub fn location(&self) -> Vec3 {
        match self {
            LightSource::Directional(_) => Vec3::ZERO,
        }
    }

    /// Color emitted onto a surface point (relative to [`LightSource::location`])
    /// with the given unit normal.
    pub fn compute_color(&self, _relative_point: Vec3, normal: Vec3) -> Color {
        match self {
            LightSource::Directional(light) => light.color.scale_rgb(light.intensity(normal)),
        }
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

/// Accumulate every light's contribution onto a surface point, starting from
/// opaque black.
pub fn accumulate(lights: &[LightSource], point: Vec3, normal: Vec3) -> Color {
    lights.iter().fold(Color::BLACK, |acc, light| {
        acc.plus(light.compute_color(point - light.location(), normal))
    })
}
