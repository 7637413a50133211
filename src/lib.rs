//! A CPU-based software 3D rendering pipeline.
//!
//! Meshes are transformed, back-face culled, depth sorted with the painter's
//! algorithm, flat shaded with directional lights, projected, and finally
//! emitted as filled triangles onto any [`DrawingSurface`](display::DrawingSurface).
//! All rendering is done on the CPU; SDL2 is only used (behind the `window`
//! feature) for window management and display.
//!
//! # Quick Start
//!
//! ```no_run
//! use painter3d::prelude::*;
//!
//! let mut engine = Engine::new(Mesh::unit_cube(), RenderConfig::default());
//! let mut canvas = Canvas::new(800, 600);
//! HeadlessDriver::new(60, 1.0 / 60.0).run(&mut engine, &mut canvas)?;
//! canvas.save_png("cube.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod display;
pub mod driver;
pub mod engine;
pub mod input;
pub mod light;
pub mod loader;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod triangle;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, FrameStats, RenderConfig, RenderError};
pub use loader::{load_mesh_file, parse_mesh, LoadError};
pub use mesh::Mesh;
pub use projection::Projection;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use painter3d::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{Angles, Camera, CameraController};

    // Color & lights
    pub use crate::colors::Color;
    pub use crate::light::{DirectionalLight, LightSource};

    // Engine
    pub use crate::driver::{Application, HeadlessDriver};
    pub use crate::engine::{Engine, FrameStats, RenderConfig, RenderError};

    // Geometry
    pub use crate::loader::{load_mesh_file, parse_mesh, LoadError};
    pub use crate::mesh::Mesh;
    pub use crate::triangle::{Surface, Triangle};

    // Projection
    pub use crate::projection::Projection;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Drawing
    pub use crate::display::{DrawCommand, DrawingSurface, RecordingSurface};
    pub use crate::render::Canvas;

    // Input
    pub use crate::input::{InputState, Key};

    // Window
    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}
