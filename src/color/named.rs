//! Nearest named color lookup for the on-screen color label.

use core::fmt::Write;

use heapless::String;

use crate::color::{BLACK, Rgb, WHITE};

/// Capacity of a color label ("<name> with <name>")
pub const COLOR_NAME_CAPACITY: usize = 40;

/// Second-nearest distance within this fraction of the nearest blends names
const BLEND_THRESHOLD_PERCENT: u32 = 25;

pub type ColorName = String<COLOR_NAME_CAPACITY>;

/// A color with a human readable name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Rgb,
}

const fn named(name: &'static str, r: u8, g: u8, b: u8) -> NamedColor {
    NamedColor {
        name,
        color: Rgb { r, g, b },
    }
}

pub const NAMED_COLORS: [NamedColor; 41] = [
    named("black", 0, 0, 0),
    named("white", 255, 255, 255),
    named("red", 255, 0, 0),
    named("lime", 0, 255, 0),
    named("blue", 0, 0, 255),
    named("yellow", 255, 255, 0),
    named("cyan", 0, 255, 255),
    named("magenta", 255, 0, 255),
    named("silver", 192, 192, 192),
    named("gray", 128, 128, 128),
    named("maroon", 128, 0, 0),
    named("olive", 128, 128, 0),
    named("green", 0, 128, 0),
    named("purple", 128, 0, 128),
    named("teal", 0, 128, 128),
    named("navy", 0, 0, 128),
    named("orange", 255, 165, 0),
    named("pink", 255, 192, 203),
    named("brown", 165, 42, 42),
    named("gold", 255, 215, 0),
    named("orchid", 218, 112, 214),
    named("salmon", 250, 128, 114),
    named("khaki", 240, 230, 140),
    named("indigo", 75, 0, 130),
    named("violet", 238, 130, 238),
    named("turquoise", 64, 224, 208),
    named("plum", 221, 160, 221),
    named("crimson", 220, 20, 60),
    named("skyblue", 135, 206, 235),
    named("chartreuse", 127, 255, 0),
    named("coral", 255, 127, 80),
    named("beige", 245, 245, 220),
    named("darkgray", 169, 169, 169),
    named("lightgray", 211, 211, 211),
    named("lavender", 230, 230, 250),
    named("darkred", 139, 0, 0),
    named("darkgreen", 0, 100, 0),
    named("darkblue", 0, 0, 139),
    named("darkcyan", 0, 139, 139),
    named("darkmagenta", 139, 0, 139),
    named("darkyellow", 128, 128, 0),
];

fn distance(a: Rgb, b: Rgb) -> u32 {
    let dr = i32::from(a.r) - i32::from(b.r);
    let dg = i32::from(a.g) - i32::from(b.g);
    let db = i32::from(a.b) - i32::from(b.b);
    (dr * dr + dg * dg + db * db).unsigned_abs()
}

/// Name of the closest entry in [`NAMED_COLORS`].
///
/// Entries are ranked by squared RGB distance, ties broken by name. When the
/// runner-up is within 25% of the best distance the two names are joined,
/// e.g. `"orange with gold"`. An exact match always returns a single name.
pub fn closest_named_color(color: Rgb) -> ColorName {
    let mut best: Option<(u32, &'static str)> = None;
    let mut second: Option<(u32, &'static str)> = None;

    for entry in &NAMED_COLORS {
        let candidate = (distance(color, entry.color), entry.name);
        if best.is_none_or(|b| candidate < b) {
            second = best;
            best = Some(candidate);
        } else if second.is_none_or(|s| candidate < s) {
            second = Some(candidate);
        }
    }

    let mut name = ColorName::new();
    let Some((best_distance, best_name)) = best else {
        let _ = name.push_str("unknown");
        return name;
    };

    let blend = second.filter(|&(second_distance, _)| {
        best_distance != 0
            && second_distance * 100 < best_distance * (100 + BLEND_THRESHOLD_PERCENT)
    });
    match blend {
        Some((_, second_name)) => {
            let _ = write!(name, "{} with {}", best_name, second_name);
        }
        None => {
            let _ = name.push_str(best_name);
        }
    }
    name
}

/// Whether a color reads as light (luma above mid-gray)
pub fn is_light_color(color: Rgb) -> bool {
    let luma = 299 * u32::from(color.r) + 587 * u32::from(color.g) + 114 * u32::from(color.b);
    luma > 128_000
}

/// Everything needed to draw the color-name label over a preview swatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorLabel {
    pub text: ColorName,
    /// Black over light colors, white over dark ones
    pub text_color: Rgb,
    pub scale: u8,
}

impl ColorLabel {
    /// Build a label for `color`; names longer than `long_name` drop to scale 1.
    pub fn for_color(color: Rgb, long_name: usize) -> Self {
        let text = closest_named_color(color);
        let scale = if text.len() > long_name { 1 } else { 2 };
        Self {
            text,
            text_color: if is_light_color(color) { BLACK } else { WHITE },
            scale,
        }
    }
}
