use crate::color::Rgb;

/// Convert HSV to RGB using the six-sector algorithm.
///
/// `h`, `s` and `v` are expected in `[0, 1)`; the hue wraps, so `h == 1.0`
/// lands back in sector 0. Output channels are in `[0, 1]`.
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s <= 0.0 {
        return (v, v, v);
    }

    let scaled = h * 6.0;
    let whole = libm::floorf(scaled);
    let f = scaled - whole;
    let sector = (whole as i32).rem_euclid(6);

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// Map a knob value (0-255) onto the hue circle at full saturation and value.
pub fn hue_to_rgb(value: u8) -> Rgb {
    let (r, g, b) = hsv_to_rgb(f32::from(value) / 255.0, 1.0, 1.0);
    Rgb {
        r: unit_to_u8(r),
        g: unit_to_u8(g),
        b: unit_to_u8(b),
    }
}

/// Truncating conversion from `[0, 1]` to `0..=255`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_u8(channel: f32) -> u8 {
    (channel * 255.0) as u8
}
