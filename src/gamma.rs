//! Perceptual dimming for trail and cursor pixels.

use crate::color::Rgb;

/// Gamma used by the RGB mix trails
pub const DEFAULT_GAMMA: f32 = 0.5;

/// Gamma used by the hue mix pixels
pub const HUE_GAMMA: f32 = 0.8;

/// Apply a gamma dimming curve to an 8-bit value.
///
/// Returns 0 for 0, otherwise `round(255 * (value / 255) ^ (1 / gamma))`,
/// never below 1 so a lit pixel stays visibly lit.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn dim_curve(value: u8, gamma: f32) -> u8 {
    if value == 0 {
        return 0;
    }
    let gamma = gamma.max(f32::EPSILON);
    let normalized = f32::from(value) / 255.0;
    let adjusted = libm::roundf(libm::powf(normalized, 1.0 / gamma) * 255.0);
    (adjusted as u8).max(1)
}

/// Apply [`dim_curve`] to every channel of a color
pub fn dim_color(color: Rgb, gamma: f32) -> Rgb {
    Rgb {
        r: dim_curve(color.r, gamma),
        g: dim_curve(color.g, gamma),
        b: dim_curve(color.b, gamma),
    }
}
