//! Software drawing surface.
//!
//! Provides [`Canvas`], a [`DrawingSurface`](crate::display::DrawingSurface)
//! backed by an ARGB8888 pixel buffer, plus the line and triangle
//! rasterizers it is built on.

mod canvas;
mod framebuffer;
mod rasterizer;

pub use canvas::Canvas;
pub use framebuffer::FrameBuffer;
pub use rasterizer::{draw_line, fill_rect, fill_triangle};
