//! Normalized RGBA color and the light-accumulation operators.
//!
//! Channels are conceptually in `[0, 1]` but are not clamped on construction;
//! only [`Color::plus`] clamps its result.

use std::fmt;

/// RGBA color with `f32` channels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color; alpha defaults to 1.0.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse a `RRGGBB` hex triplet (an optional leading `#` is accepted).
    pub fn from_hex(hex: &str, alpha: Option<f32>) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::InvalidLength(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|value| value as f32 / 255.0)
                .map_err(|_| ColorParseError::InvalidDigit(hex.to_string()))
        };

        Ok(Self::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            alpha.unwrap_or(1.0),
        ))
    }

    /// Accumulate two light contributions.
    ///
    /// Each operand is pre-multiplied by its own alpha, the results are summed
    /// and every channel (alpha included) is clamped to at most 1.0.
    pub fn plus(&self, other: Color) -> Color {
        Color::new(
            (self.r * self.a + other.r * other.a).min(1.0),
            (self.g * self.a + other.g * other.a).min(1.0),
            (self.b * self.a + other.b * other.a).min(1.0),
            (self.a + other.a).min(1.0),
        )
    }

    /// Apply an accumulated light color to a surface color.
    ///
    /// Light alpha scales the intensity; the result keeps the surface's alpha.
    pub fn apply_to(&self, surface: Color) -> Color {
        Color::new(
            self.r * surface.r * self.a,
            self.g * surface.g * self.a,
            self.b * surface.b * self.a,
            surface.a,
        )
    }

    /// Scale the color channels, leaving alpha untouched.
    pub fn scale_rgb(&self, factor: f32) -> Color {
        Color::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Pack into an ARGB8888 pixel.
    pub fn to_argb(&self) -> u32 {
        pack_color(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Convert a normalized channel to a byte, truncating like `value * 255.9`.
#[inline]
fn to_byte(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.9) as u32
}

/// Pack normalized channels into ARGB8888.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpack ARGB8888 into normalized `(r, g, b, a)`.
#[inline]
pub fn unpack_color(argb: u32) -> (f32, f32, f32, f32) {
    let a = ((argb >> 24) & 0xFF) as f32 / 255.0;
    let r = ((argb >> 16) & 0xFF) as f32 / 255.0;
    let g = ((argb >> 8) & 0xFF) as f32 / 255.0;
    let b = (argb & 0xFF) as f32 / 255.0;
    (r, g, b, a)
}

/// Error returned by [`Color::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    InvalidLength(String),
    InvalidDigit(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::InvalidLength(s) => {
                write!(f, "expected six hex digits, got {s:?}")
            }
            ColorParseError::InvalidDigit(s) => write!(f, "invalid hex digit in {s:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plus_clamps_each_channel() {
        let c = Color::rgb(0.9, 0.0, 0.0).plus(Color::rgb(0.9, 0.0, 0.0));
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn plus_is_commutative() {
        let a = Color::new(0.2, 0.4, 0.1, 0.5);
        let b = Color::new(0.7, 0.3, 0.9, 0.8);
        assert_eq!(a.plus(b), b.plus(a));
    }

    #[test]
    fn plus_premultiplies_alpha() {
        let c = Color::BLACK.plus(Color::new(0.8, 0.4, 0.2, 0.5));
        assert_relative_eq!(c.r, 0.4);
        assert_relative_eq!(c.g, 0.2);
        assert_relative_eq!(c.b, 0.1);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn apply_to_keeps_surface_alpha() {
        let light = Color::new(0.5, 1.0, 0.25, 0.5);
        let surface = Color::new(1.0, 0.5, 1.0, 0.3);
        let lit = light.apply_to(surface);
        assert_relative_eq!(lit.r, 0.25);
        assert_relative_eq!(lit.g, 0.25);
        assert_relative_eq!(lit.b, 0.125);
        assert_eq!(lit.a, 0.3);
    }

    #[test]
    fn from_hex_decodes_each_channel() {
        let c = Color::from_hex("#FF8000", None).unwrap();
        assert_eq!(c.r, 1.0);
        assert_relative_eq!(c.g, 128.0 / 255.0);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);

        let translucent = Color::from_hex("000000", Some(0.25)).unwrap();
        assert_eq!(translucent.a, 0.25);
    }

    #[test]
    fn from_hex_rejects_malformed_input() {
        assert_eq!(
            Color::from_hex("FFF", None),
            Err(ColorParseError::InvalidLength("FFF".to_string()))
        );
        assert_eq!(
            Color::from_hex("GG0000", None),
            Err(ColorParseError::InvalidDigit("GG0000".to_string()))
        );
    }

    #[test]
    fn pack_round_trips_through_unpack() {
        let packed = Color::new(1.0, 0.0, 1.0, 1.0).to_argb();
        assert_eq!(packed, 0xFFFF00FF);
        assert_eq!(unpack_color(packed), (1.0, 0.0, 1.0, 1.0));
    }
}
