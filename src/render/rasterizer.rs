//! Rectangle, line and triangle rasterization.
//!
//! Triangles use the edge function algorithm: every pixel center in the
//! bounding box is tested against the three edges, and the pixel is inside
//! when all edge functions share the sign of the triangle's signed area.
//! Lines use Bresenham's integer algorithm.

use super::framebuffer::FrameBuffer;
use crate::colors::Color;
use crate::math::vec2::Vec2;

/// Fill the pixels whose centers fall inside the rectangle spanned by two
/// corners (in either order).
pub fn fill_rect(buffer: &mut FrameBuffer, a: Vec2, b: Vec2, color: Color) {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));

    let x0 = (min_x - 0.5).ceil().max(0.0) as i32;
    let x1 = ((max_x - 0.5).ceil() as i32).min(buffer.width() as i32);
    let y0 = (min_y - 0.5).ceil().max(0.0) as i32;
    let y1 = ((max_y - 0.5).ceil() as i32).min(buffer.height() as i32);

    for y in y0..y1 {
        for x in x0..x1 {
            buffer.set_pixel(x, y, color);
        }
    }
}

/// Computes the edge function value for point P relative to edge (A -> B).
///
/// ```text
/// E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
/// ```
///
/// Positive on one side of the edge, negative on the other, zero on it.
#[inline]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// Fill a triangle with a flat color. Works for either winding order;
/// degenerate and non-finite triangles draw nothing.
pub fn fill_triangle(buffer: &mut FrameBuffer, points: [Vec2; 3], color: Color) {
    let [v0, v1, v2] = points;
    if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return;
    }

    let area = edge_function(v0, v1, v2);
    if area.abs() < f32::EPSILON {
        return;
    }

    // Bounding box, clipped to the buffer
    let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
    let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
    let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
    let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Sample at pixel center
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);

            let w0 = edge_function(v1, v2, p);
            let w1 = edge_function(v2, v0, p);
            let w2 = edge_function(v0, v1, p);

            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };

            if inside {
                buffer.set_pixel(x, y, color);
            }
        }
    }
}

/// Liang-Barsky clip of the segment against the buffer rectangle grown by
/// one pixel on every side. Returns `None` when nothing of it is left.
///
/// Runs in f64 and clamps the result, so the endpoints handed to the integer
/// stepper are always within the grown rectangle.
fn clip_line(from: Vec2, to: Vec2, width: u32, height: u32) -> Option<(Vec2, Vec2)> {
    let (min_x, max_x) = (-1.0f64, width as f64 + 1.0);
    let (min_y, max_y) = (-1.0f64, height as f64 + 1.0);
    let (x0, y0) = (from.x as f64, from.y as f64);
    let dx = to.x as f64 - x0;
    let dy = to.y as f64 - y0;

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
    }

    if t0 > t1 {
        return None;
    }

    let at = |t: f64| {
        Vec2::new(
            (x0 + t * dx).clamp(min_x, max_x) as f32,
            (y0 + t * dy).clamp(min_y, max_y) as f32,
        )
    };
    Some((at(t0), at(t1)))
}

/// Draws a line between two points using Bresenham's line algorithm.
///
/// For each step along the major axis, an accumulated error term decides
/// whether to also step along the minor axis.
pub fn draw_line(buffer: &mut FrameBuffer, from: Vec2, to: Vec2, color: Color) {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return;
    }

    // Endpoints may lie arbitrarily far off screen; clip before going to
    // integers so the error terms stay small.
    let Some((from, to)) = clip_line(from, to, buffer.width(), buffer.height())
    else {
        return;
    };

    let (x0, y0) = (from.x.floor() as i32, from.y.floor() as i32);
    let (x1, y1) = (to.x.floor() as i32, to.y.floor() as i32);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let x_step = if x0 < x1 { 1 } else { -1 };
    let y_step = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        buffer.set_pixel(x, y, color);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += x_step;
        }
        if e2 < dx {
            err += dx;
            y += y_step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(pixels: &[u32], color: Color) -> usize {
        pixels.iter().filter(|&&p| p == color.to_argb()).count()
    }

    #[test]
    fn fill_rect_covers_exact_pixels() {
        let mut pixels = vec![0u32; 16];
        let mut fb = FrameBuffer::new(&mut pixels, 4, 4);
        fill_rect(&mut fb, Vec2::new(1.0, 1.0), Vec2::new(3.0, 4.0), Color::WHITE);
        assert_eq!(count(&pixels, Color::WHITE), 6);
    }

    #[test]
    fn both_windings_fill_the_same_pixels() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(9.0, 1.0);
        let c = Vec2::new(1.0, 9.0);

        let mut cw = vec![0u32; 100];
        fill_triangle(&mut FrameBuffer::new(&mut cw, 10, 10), [a, b, c], red);
        let mut ccw = vec![0u32; 100];
        fill_triangle(&mut FrameBuffer::new(&mut ccw, 10, 10), [a, c, b], red);

        assert!(count(&cw, red) > 0);
        assert_eq!(cw, ccw);
    }

    #[test]
    fn degenerate_and_nan_triangles_draw_nothing() {
        let mut pixels = vec![0u32; 100];
        let mut fb = FrameBuffer::new(&mut pixels, 10, 10);
        let line = [Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0), Vec2::new(9.0, 9.0)];
        fill_triangle(&mut fb, line, Color::WHITE);
        let nan = [Vec2::new(f32::NAN, 0.0), Vec2::new(5.0, 5.0), Vec2::new(0.0, 9.0)];
        fill_triangle(&mut fb, nan, Color::WHITE);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn diagonal_line_hits_every_step() {
        let mut pixels = vec![0u32; 25];
        let mut fb = FrameBuffer::new(&mut pixels, 5, 5);
        draw_line(&mut fb, Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0), Color::WHITE);
        for i in 0..5 {
            assert_eq!(fb.get_pixel(i, i), Some(Color::WHITE.to_argb()));
        }
        assert_eq!(count(&pixels, Color::WHITE), 5);
    }

    #[test]
    fn far_away_endpoints_are_clipped_before_stepping() {
        let mut pixels = vec![0u32; 25];
        let mut fb = FrameBuffer::new(&mut pixels, 5, 5);
        draw_line(&mut fb, Vec2::new(-3.0e9, 2.0), Vec2::new(3.0e9, 2.0), Color::WHITE);
        draw_line(&mut fb, Vec2::new(2.0, 4.0e9), Vec2::new(2.0, -4.0e9), Color::WHITE);
        draw_line(&mut fb, Vec2::new(-1.0e9, -1.0e9), Vec2::new(1.0e9, 1.0e9), Color::WHITE);

        for i in 0..5 {
            assert_eq!(fb.get_pixel(i, 2), Some(Color::WHITE.to_argb()));
            assert_eq!(fb.get_pixel(2, i), Some(Color::WHITE.to_argb()));
            assert_eq!(fb.get_pixel(i, i), Some(Color::WHITE.to_argb()));
        }
    }

    #[test]
    fn line_entirely_outside_draws_nothing() {
        let mut pixels = vec![0u32; 25];
        let mut fb = FrameBuffer::new(&mut pixels, 5, 5);
        draw_line(&mut fb, Vec2::new(-1.0e9, -50.0), Vec2::new(1.0e9, -50.0), Color::WHITE);
        draw_line(&mut fb, Vec2::new(10.0, 10.0), Vec2::new(20.0, 30.0), Color::WHITE);
        assert!(pixels.iter().all(|&p| p == 0));
    }

    #[test]
    fn huge_triangle_fills_the_buffer() {
        let mut pixels = vec![0u32; 16];
        let mut fb = FrameBuffer::new(&mut pixels, 4, 4);
        let points = [
            Vec2::new(-1.0e9, -1.0e9),
            Vec2::new(3.0e9, -1.0e9),
            Vec2::new(-1.0e9, 3.0e9),
        ];
        fill_triangle(&mut fb, points, Color::WHITE);
        assert_eq!(count(&pixels, Color::WHITE), 16);
    }

    #[test]
    fn line_off_screen_is_clipped_per_pixel() {
        let mut pixels = vec![0u32; 25];
        let mut fb = FrameBuffer::new(&mut pixels, 5, 5);
        draw_line(&mut fb, Vec2::new(-10.0, 2.0), Vec2::new(10.0, 2.0), Color::WHITE);
        assert_eq!(count(&pixels, Color::WHITE), 5);
    }
}
