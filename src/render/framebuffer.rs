//! Frame buffer abstraction for 2D pixel access.

use crate::colors::{pack_color, unpack_color, Color};

/// Number of pixels in a `width` x `height` buffer, computed in `usize`.
#[inline]
pub fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// A view into an ARGB8888 color buffer.
///
/// Wraps a 1D slice with width/height metadata to enable safe 2D pixel access.
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when you need to pass the buffer + dimensions together.
///
/// There is no depth buffer: occlusion comes from call order alone.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from a buffer slice and dimensions.
    pub fn new(color_buffer: &'a mut [u32], width: u32, height: u32) -> Self {
        debug_assert_eq!(
            color_buffer.len(),
            pixel_count(width, height),
            "Color buffer size doesn't match dimensions"
        );
        Self {
            color_buffer,
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

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Paint a pixel, blending translucent colors over what is already there.
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some(idx) = self.index(x, y) else {
            return;
        };

        self.color_buffer[idx] = if color.a >= 1.0 {
            color.to_argb()
        } else {
            let (r, g, b, a) = unpack_color(self.color_buffer[idx]);
            let alpha = color.a.max(0.0);
            let keep = 1.0 - alpha;
            pack_color(
                color.r * alpha + r * keep,
                color.g * alpha + g * keep,
                color.b * alpha + b * keep,
                alpha + a * keep,
            )
        };
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut pixels = vec![0u32; 4];
        let mut fb = FrameBuffer::new(&mut pixels, 2, 2);
        fb.set_pixel(-1, 0, Color::WHITE);
        fb.set_pixel(2, 1, Color::WHITE);
        assert_eq!(fb.get_pixel(5, 5), None);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn translucent_pixels_blend_over_existing_color() {
        let mut pixels = vec![Color::BLACK.to_argb(); 1];
        let mut fb = FrameBuffer::new(&mut pixels, 1, 1);
        fb.set_pixel(0, 0, Color::new(1.0, 1.0, 1.0, 0.5));

        let (r, _, _, a) = unpack_color(fb.get_pixel(0, 0).unwrap());
        assert!((r - 0.5).abs() < 0.01);
        assert_eq!(a, 1.0);
    }
}
