//! Core rendering engine.
//!
//! The [`Engine`] struct is the render context threaded through every frame.
//! It owns the immutable base mesh, the camera, the light sources and the
//! little state carried between frames (accumulated angle, previous viewport,
//! cached projection matrix).
//!
//! Each frame runs strictly in order:
//!
//! 1. clear the viewport and rebuild the projection if the viewport changed
//! 2. model transforms: rotate about Z by θ, about X by θ/2, push forward
//! 3. back-face culling in world space
//! 4. painter's sort, farthest first
//! 5. flat lighting per surface
//! 6. camera translation, perspective projection, NDC to screen mapping
//! 7. one filled + stroked triangle per surface, in sorted order
//!
//! The stages are exposed as free functions so they can be tested on their own.

use std::fmt;

use log::{debug, trace};

use crate::camera::{Camera, CameraController};
use crate::colors::Color;
use crate::display::DrawingSurface;
use crate::input::InputState;
use crate::light::{self, DirectionalLight, LightSource};
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::triangle::Surface;

/// Tunable parameters for the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Translation applied after the model rotations.
    pub model_offset: Vec3,
    /// Color the viewport is cleared to at the start of every frame.
    pub background: Color,
    /// When set, every surface of the base mesh is recolored to this.
    /// Otherwise surfaces keep the colors they were built with.
    pub surface_color: Option<Color>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            z_near: 0.1,
            z_far: 1000.0,
            model_offset: Vec3::new(0.0, 0.0, 3.0),
            background: Color::BLACK,
            surface_color: None,
        }
    }
}

impl RenderConfig {
    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    pub fn with_planes(mut self, z_near: f32, z_far: f32) -> Self {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn with_model_offset(mut self, offset: Vec3) -> Self {
        self.model_offset = offset;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_surface_color(mut self, color: Color) -> Self {
        self.surface_color = Some(color);
        self
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.fov_degrees, self.z_near, self.z_far)
    }
}

/// Errors reported by [`Engine::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The drawing surface reported a zero width or height.
    DegenerateViewport { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::DegenerateViewport { width, height } => {
                write!(f, "viewport {}x{} has no area", width, height)
            }
        }
    }
}

impl std::error::Error for RenderError {}

/// Surface counts for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub surfaces_in: usize,
    pub surfaces_culled: usize,
    pub surfaces_drawn: usize,
}

/// Rotate about Z by `theta`, then about X by `theta / 2`, then translate by
/// `offset`. Every stage derives a new mesh.
pub fn model_transform(mesh: &Mesh, theta: f32, offset: Vec3) -> Mesh {
    mesh.transformed(&Mat4::rotation_z(theta))
        .transformed(&Mat4::rotation_x(theta * 0.5))
        .translated(offset)
}

/// Whether a surface faces the camera: `normal . (v1 - camera) > 0`, using
/// the un-normalized normal.
pub fn is_visible(surface: &Surface, camera_location: Vec3) -> bool {
    let triangle = &surface.triangle;
    triangle.normal().dot(triangle.vertices[0] - camera_location) > 0.0
}

/// Keep only the surfaces that face the camera, preserving order.
pub fn cull(surfaces: &[Surface], camera_location: Vec3) -> Vec<Surface> {
    surfaces
        .iter()
        .filter(|s| is_visible(s, camera_location))
        .copied()
        .collect()
}

/// Stable sort by descending sum of vertex z, so the farthest surface is
/// drawn first.
pub fn depth_sort(surfaces: &mut [Surface]) {
    surfaces.sort_by(|a, b| b.triangle.depth_key().total_cmp(&a.triangle.depth_key()));
}

/// Accumulated light color for a surface, sampled at its first vertex with
/// the unit normal.
pub fn light_surface(surface: &Surface, lights: &[LightSource]) -> Color {
    let triangle = &surface.triangle;
    light::accumulate(lights, triangle.vertices[0], triangle.unit_normal())
}

/// Camera-relative vertex through the projection matrix, divided by w.
pub fn project_vertex(vertex: Vec3, projection: &Mat4) -> Vec3 {
    projection.transform_point(vertex).perspective_divide()
}

/// Map normalized device coordinates onto the viewport. No y flip.
pub fn ndc_to_screen(ndc: Vec3, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (ndc.y + 1.0) * 0.5 * height as f32,
    )
}

pub struct Engine {
    config: RenderConfig,
    base_mesh: Mesh,
    camera: Camera,
    controller: CameraController,
    lights: Vec<LightSource>,
    theta: f32,
    viewport: Option<(u32, u32)>,
    projection_matrix: Mat4,
}

impl Engine {
    /// Build a render context around a base mesh. The mesh is recolored only
    /// when `config.surface_color` is set, and never modified afterwards.
    ///
    /// Starts with a camera at the origin facing +Z and a single white
    /// directional light shining along -Z.
    pub fn new(mesh: Mesh, config: RenderConfig) -> Self {
        let base_mesh = match config.surface_color {
            Some(color) => mesh.with_color(color),
            None => mesh,
        };
        Self {
            base_mesh,
            config,
            camera: Camera::default(),
            controller: CameraController::default(),
            lights: vec![DirectionalLight::new(Vec3::new(0.0, 0.0, -1.0), Color::WHITE).into()],
            theta: 0.0,
            viewport: None,
            projection_matrix: Mat4::identity(),
        }
    }

    pub fn with_lights(mut self, lights: Vec<LightSource>) -> Self {
        self.lights = lights;
        self
    }

    pub fn with_controller(mut self, controller: CameraController) -> Self {
        self.controller = controller;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn mesh(&self) -> &Mesh {
        &self.base_mesh
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn add_light(&mut self, light: impl Into<LightSource>) {
        self.lights.push(light.into());
    }

    /// Accumulated rotation angle in radians.
    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Reset the per-run state: angle back to zero, projection rebuilt on the
    /// next frame.
    pub fn init(&mut self) {
        self.theta = 0.0;
        self.viewport = None;
    }

    /// Render one frame onto `surface`.
    ///
    /// `delta` is the elapsed time in seconds since the previous frame; it
    /// advances the rotation angle and drives camera movement from `input`.
    pub fn update(
        &mut self,
        delta: f32,
        input: &InputState,
        surface: &mut dyn DrawingSurface,
    ) -> Result<FrameStats, RenderError> {
        let (width, height) = surface.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::DegenerateViewport { width, height });
        }

        surface.fill(
            Vec2::ZERO,
            Vec2::new(width as f32, height as f32),
            self.config.background,
        );

        if self.viewport != Some((width, height)) {
            debug!("Rebuilding projection matrix for {}x{} viewport", width, height);
            self.projection_matrix = self.config.projection().matrix(width, height);
            self.viewport = Some((width, height));
        }

        self.controller.update(&mut self.camera, input, delta);
        self.theta += delta;

        let world = model_transform(&self.base_mesh, self.theta, self.config.model_offset);
        let camera_location = self.camera.location;

        let mut visible = cull(world.surfaces(), camera_location);
        depth_sort(&mut visible);

        for s in &visible {
            let lit = light_surface(s, &self.lights).apply_to(s.color);
            let points = s.triangle.vertices.map(|v| {
                let ndc = project_vertex(v - camera_location, &self.projection_matrix);
                ndc_to_screen(ndc, width, height)
            });
            surface.draw_triangle(points, lit);
        }

        let stats = FrameStats {
            surfaces_in: world.len(),
            surfaces_culled: world.len() - visible.len(),
            surfaces_drawn: visible.len(),
        };
        trace!(
            "Frame: {} surfaces, {} culled, {} drawn",
            stats.surfaces_in,
            stats.surfaces_culled,
            stats.surfaces_drawn
        );
        Ok(stats)
    }
}
