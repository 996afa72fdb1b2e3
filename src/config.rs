//! Static board configuration, loaded once and passed into constructors.

use embassy_time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::encoder::EncoderConfig;
use crate::gamma::{DEFAULT_GAMMA, HUE_GAMMA};
use crate::pixel_bus::{PinId, PixelOrder, StripConfig};
use crate::quantizer::QuantizerConfig;
use crate::switcher::DEFAULT_STEP_THRESHOLD;
use crate::trail::TRAIL_LEN;

/// Channels per menu, one per primary or hue
pub const CHANNEL_COUNT: usize = 3;

pub const DEFAULT_TRAIL_DELAY: Duration = Duration::from_millis(10);
pub const DEFAULT_KNOB_SENSITIVITY: i32 = 3;
/// How long a menu shows its title after activation
pub const DEFAULT_TITLE_DURATION: Duration = Duration::from_millis(2000);

/// Per-channel hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelConfig {
    pub encoder: EncoderConfig,
    pub trail: StripConfig,
    /// Pixel on the shared cursor strip owned by this channel
    pub cursor_pixel: u16,
    /// Value when nothing was saved
    pub initial_value: u8,
    /// Indicator pixel brightness (0-255 = 0.0-1.0)
    pub brightness: u8,
    /// Overrides the menu knob sensitivity for this channel
    pub sensitivity: Option<i32>,
}

/// TFT geometry used for the bar graph layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: u16,
    pub height: u16,
    /// Share of the height used by the bars, in percent
    pub bar_area_percent: u8,
    pub title_duration: Duration,
}

impl ScreenConfig {
    #[allow(clippy::cast_possible_truncation)]
    pub const fn bar_width(&self) -> u16 {
        self.width / CHANNEL_COUNT as u16
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn bar_area_height(&self) -> u16 {
        (self.height as u32 * self.bar_area_percent as u32 / 100) as u16
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 172,
            bar_area_percent: 60,
            title_duration: DEFAULT_TITLE_DURATION,
        }
    }
}

/// Menu values used when the saved state does not have them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuDefaults {
    pub trail_delay: Duration,
    pub knob_sensitivity: i32,
}

impl Default for MenuDefaults {
    fn default() -> Self {
        Self {
            trail_delay: DEFAULT_TRAIL_DELAY,
            knob_sensitivity: DEFAULT_KNOB_SENSITIVITY,
        }
    }
}

/// Whole-device configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub channels: [ChannelConfig; CHANNEL_COUNT],
    pub cursor_strip: StripConfig,
    pub menu_encoder: EncoderConfig,
    pub screen: ScreenConfig,
    pub quantizer: QuantizerConfig,
    pub debounce: Duration,
    /// Menu encoder ticks per menu step
    pub menu_step_threshold: i32,
    pub defaults: MenuDefaults,
    /// Dimming curve for RGB mix trails, `None` for linear
    pub rgb_trail_gamma: Option<f32>,
    /// Dimming curve for hue mix pixels
    pub hue_gamma: f32,
}

impl Settings {
    /// Every strip the device drives, cursor strip first
    pub fn strips(&self) -> impl Iterator<Item = &StripConfig> {
        core::iter::once(&self.cursor_strip).chain(self.channels.iter().map(|c| &c.trail))
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn channel(index: u8, trail_pin: u8) -> ChannelConfig {
    ChannelConfig {
        encoder: EncoderConfig::new(0x36 + index),
        trail: StripConfig {
            pin: PinId(trail_pin),
            count: TRAIL_LEN as u16,
            brightness: 102,
            order: PixelOrder::Rgb,
        },
        cursor_pixel: index as u16,
        initial_value: 0,
        brightness: 102,
        sensitivity: None,
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            channels: [channel(0, 10), channel(1, 11), channel(2, 12)],
            cursor_strip: StripConfig {
                pin: PinId(13),
                count: CHANNEL_COUNT as u16,
                brightness: 255,
                order: PixelOrder::Rgb,
            },
            menu_encoder: EncoderConfig {
                indicator_pin: None,
                ..EncoderConfig::new(0x39)
            },
            screen: ScreenConfig::default(),
            quantizer: QuantizerConfig::default(),
            debounce: DEFAULT_DEBOUNCE,
            menu_step_threshold: DEFAULT_STEP_THRESHOLD,
            defaults: MenuDefaults::default(),
            rgb_trail_gamma: Some(DEFAULT_GAMMA),
            hue_gamma: HUE_GAMMA,
        }
    }
}
