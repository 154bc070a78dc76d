//! Colors for the editor widget

use iced::Color;
use wavecut_core::Rgba;

/// Background shown before a series is loaded
pub const EMPTY_BACKGROUND: Color = Color::from_rgb(0.16, 0.16, 0.18);

/// Midline hint drawn on the empty editor
pub const EMPTY_MIDLINE: Color = Color::from_rgba(0.6, 0.6, 0.6, 0.4);

/// Convert a core color to an iced color
pub fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.alpha_f32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color_keeps_channels() {
        let c = to_color(Rgba::WHITE.with_alpha(170));
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 1.0);
        assert!((c.a - 170.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_to_color_opaque() {
        assert_eq!(to_color(Rgba::rgb(0, 0, 0)), Color::BLACK);
    }
}
