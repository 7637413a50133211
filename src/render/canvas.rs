use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};

use super::framebuffer::{pixel_count, FrameBuffer};
use super::rasterizer;
use crate::colors::{unpack_color, Color};
use crate::display::DrawingSurface;
use crate::math::vec2::Vec2;

/// Owned ARGB8888 pixel buffer that the pipeline can draw into.
pub struct Canvas {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create a canvas cleared to opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); pixel_count(width, height)],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new size. Previous contents are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK.to_argb(); pixel_count(width, height)];
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Packed ARGB value at (x, y), or None if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel data in native byte order, the layout an ARGB8888 streaming
    /// texture expects.
    pub fn to_argb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_ne_bytes()).collect()
    }

    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.pixels[y as usize * self.width as usize + x as usize];
            Rgba([
                (argb >> 16) as u8,
                (argb >> 8) as u8,
                argb as u8,
                (argb >> 24) as u8,
            ])
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)
    }

    /// Normalized color at (x, y).
    pub fn color_at(&self, x: u32, y: u32) -> Option<Color> {
        self.pixel(x, y).map(|argb| {
            let (r, g, b, a) = unpack_color(argb);
            Color::new(r, g, b, a)
        })
    }

    fn frame_buffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(&mut self.pixels, self.width, self.height)
    }
}

impl DrawingSurface for Canvas {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, top_left: Vec2, bottom_right: Vec2, color: Color) {
        rasterizer::fill_rect(&mut self.frame_buffer(), top_left, bottom_right, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        rasterizer::draw_line(&mut self.frame_buffer(), from, to, color);
    }

    fn fill_triangle(&mut self, points: [Vec2; 3], color: Color) {
        rasterizer::fill_triangle(&mut self.frame_buffer(), points, color);
    }
}
