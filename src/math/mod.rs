//! Linear algebra primitives: vectors and the 4x4 transform matrix.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;
