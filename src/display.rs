//! The drawing-surface capability the render pipeline emits into.
//!
//! Coordinates are screen-space pixels with the origin at the top-left.
//! Surfaces must honor call order: later calls paint over earlier ones.

use crate::colors::Color;
use crate::math::vec2::Vec2;

/// Something that can be drawn on.
pub trait DrawingSurface {
    /// Viewport `(width, height)` in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Fill the axis-aligned rectangle spanned by two corners.
    fn fill(&mut self, top_left: Vec2, bottom_right: Vec2, color: Color);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color);

    /// Outline a triangle. Defaults to three [`DrawingSurface::stroke_line`] calls.
    fn stroke_triangle(&mut self, points: [Vec2; 3], color: Color) {
        stroke_triangle_outline(self, points, color);
    }

    /// Fill a triangle, then stroke its outline in the same color.
    fn draw_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.fill_triangle(points, color);
        self.stroke_triangle(points, color);
    }
}

/// Closed outline built from three line strokes.
pub fn stroke_triangle_outline<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    points: [Vec2; 3],
    color: Color,
) {
    let [p1, p2, p3] = points;
    surface.stroke_line(p1, p2, color);
    surface.stroke_line(p2, p3, color);
    surface.stroke_line(p1, p3, color);
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        top_left: Vec2,
        bottom_right: Vec2,
        color: Color,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    FillTriangle {
        points: [Vec2; 3],
        color: Color,
    },
    DrawTriangle {
        points: [Vec2; 3],
        color: Color,
    },
}

/// Drawing surface that records every call instead of rasterizing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded `draw_triangle` calls, in call order.
    pub fn triangles(&self) -> impl Iterator<Item = (&[Vec2; 3], &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::DrawTriangle { points, color } => Some((points, color)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawingSurface for RecordingSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, top_left: Vec2, bottom_right: Vec2, color: Color) {
        self.commands.push(DrawCommand::Fill {
            top_left,
            bottom_right,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands
            .push(DrawCommand::StrokeLine { from, to, color });
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.commands
            .push(DrawCommand::FillTriangle { points, color });
    }

    fn draw_triangle(&mut self, points: [Vec2; 3], color: Color) {
        self.commands
            .push(DrawCommand::DrawTriangle { points, color });
    }
}
