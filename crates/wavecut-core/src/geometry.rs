//! Numeric and drawing primitives shared by the selection model and renderer
//!
//! Everything here is total: no function panics or returns an error for any
//! finite input.

use serde::{Deserialize, Serialize};

/// Clamp `value` into `[min, max]`
///
/// Unlike `f32::clamp` this never panics. When `min > max` (a viewport too
/// narrow for the configured selector metrics) the upper bound wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// A point in viewport pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle given by its edges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical midline the two lobes are drawn around
    pub fn midline(&self) -> f32 {
        self.height / 2.0
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const GRAY: Rgba = Rgba::rgb(136, 136, 136);
    pub const DARK_GRAY: Rgba = Rgba::rgb(68, 68, 68);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with its alpha component replaced
    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Alpha as a 0.0-1.0 fraction
    pub fn alpha_f32(&self) -> f32 {
        self.a as f32 / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_bounds_prefers_max() {
        // Narrow viewports produce min > max; must not panic
        assert_eq!(clamp(5.0, 10.0, 2.0), 2.0);
        assert_eq!(clamp(-5.0, 10.0, 2.0), 2.0);
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let c = Rgba::WHITE.with_alpha(170);
        assert_eq!((c.r, c.g, c.b, c.a), (255, 255, 255, 170));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(10.0, 0.0, 10.0, 50.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
