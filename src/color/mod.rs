mod hsv;
mod named;
mod utils;

use smart_leds::RGB8;

pub use hsv::{hsv_to_rgb, hue_to_rgb};
pub use named::{
    ColorLabel, ColorName, NAMED_COLORS, NamedColor, closest_named_color, is_light_color,
};
pub use utils::{Primary, average_colors, rgb_from_u32, rgb_to_u32, scale_color};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// All channels at full
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
