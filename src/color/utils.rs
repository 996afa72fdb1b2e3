use crate::color::Rgb;

/// One of the three additive primaries a channel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primary {
    Red,
    Green,
    Blue,
}

impl Primary {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Primary for a channel position (0 = red, 1 = green, 2 = blue)
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            2 => Some(Self::Blue),
            _ => None,
        }
    }

    /// Color with only this primary lit at `value`
    pub const fn tint(self, value: u8) -> Rgb {
        match self {
            Self::Red => Rgb { r: value, g: 0, b: 0 },
            Self::Green => Rgb { r: 0, g: value, b: 0 },
            Self::Blue => Rgb { r: 0, g: 0, b: value },
        }
    }

    /// Read this primary's component out of a color
    pub const fn component(self, color: Rgb) -> u8 {
        match self {
            Self::Red => color.r,
            Self::Green => color.g,
            Self::Blue => color.b,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
#[allow(clippy::cast_lossless)]
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Scale every channel by `scale` (0-255 = 0.0-1.0)
#[inline]
pub fn scale_color(color: Rgb, scale: u8) -> Rgb {
    Rgb {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Integer mean of a set of colors, per channel
#[allow(clippy::cast_possible_truncation)]
pub fn average_colors(colors: &[Rgb]) -> Rgb {
    if colors.is_empty() {
        return Rgb::default();
    }
    let (r, g, b) = colors.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
        (r + u32::from(c.r), g + u32::from(c.g), b + u32::from(c.b))
    });
    let count = colors.len() as u32;
    Rgb {
        r: (r / count) as u8,
        g: (g / count) as u8,
        b: (b / count) as u8,
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}
