//! Menu system with a closed set of variants.
//!
//! Every menu drives the same three channels and renders a combined color.
//! Menus are stored in [`MenuSlot`] so switching needs no heap.

mod hue_mix;
mod rgb_mix;

use embassy_time::Instant;
pub use hue_mix::HueMixMenu;
pub use rgb_mix::RgbMixMenu;

use crate::PixelSink;
use crate::channel::{Channel, ChannelInit, ChannelOutputs, ChannelPalette};
use crate::color::Rgb;
use crate::config::{CHANNEL_COUNT, Settings};
use crate::encoder::{EncoderProbe, RotaryEncoder};
use crate::error::BusError;
use crate::pixel_bus::PixelBusManager;
use crate::screen::Screen;
use crate::state::MenuState;

const MENU_NAME_RGB_MIX: &str = "RGB Mix";
const MENU_NAME_HUE_MIX: &str = "Color Mix";

const MENU_ID_RGB_MIX: u8 = 0;
const MENU_ID_HUE_MIX: u8 = 1;

/// Number of selectable menus
pub const MENU_COUNT: usize = 2;

/// Channels toggled during one encoder pass, by channel index
pub type ChannelToggles = [Option<bool>; CHANNEL_COUNT];

pub trait Menu {
    /// Scroll trails whose delay has elapsed
    fn update_trails<S: PixelSink, const N: usize>(
        &mut self,
        bus: &mut PixelBusManager<S, N>,
        now: Instant,
    );

    /// Poll every channel encoder; does nothing unless `enabled`
    fn update_encoders(&mut self, enabled: bool, sensitivity: i32, now: Instant) -> ChannelToggles;

    /// Redraw the summary on screen and commit pending values
    fn update_screen<D: Screen>(&mut self, screen: &mut D, now: Instant);

    /// Draw the title and labels again after the screen was cleared and
    /// forget what was drawn before
    fn reset_screen<D: Screen>(&mut self, screen: &mut D, now: Instant);

    fn export_state(&self) -> MenuState;

    /// Color shown on the preview swatch
    fn combined_color(&self) -> Rgb;

    fn knob_sensitivity(&self) -> i32;
}

/// Known menus, in menu encoder order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum MenuId {
    RgbMix = MENU_ID_RGB_MIX,
    HueMix = MENU_ID_HUE_MIX,
}

impl MenuId {
    pub const ALL: [Self; MENU_COUNT] = [Self::RgbMix, Self::HueMix];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MENU_ID_RGB_MIX => Self::RgbMix,
            MENU_ID_HUE_MIX => Self::HueMix,
            _ => return None,
        })
    }

    /// Menu at a switcher index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RgbMix => MENU_NAME_RGB_MIX,
            Self::HueMix => MENU_NAME_HUE_MIX,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MENU_NAME_RGB_MIX => Some(Self::RgbMix),
            MENU_NAME_HUE_MIX => Some(Self::HueMix),
            _ => None,
        }
    }
}

/// Menu slot - enum containing all possible menus
pub enum MenuSlot<E> {
    RgbMix(RgbMixMenu<E>),
    HueMix(HueMixMenu<E>),
}

impl<E: RotaryEncoder> MenuSlot<E> {
    /// Build a menu, seeding it from `state`
    pub fn build<P, S, D, const N: usize>(
        id: MenuId,
        settings: &Settings,
        state: &MenuState,
        probe: &mut P,
        bus: &PixelBusManager<S, N>,
        screen: &mut D,
        now: Instant,
    ) -> Result<Self, BusError>
    where
        P: EncoderProbe<Encoder = E>,
        S: PixelSink,
        D: Screen,
    {
        Ok(match id {
            MenuId::RgbMix => {
                Self::RgbMix(RgbMixMenu::new(settings, state, probe, bus, screen, now)?)
            }
            MenuId::HueMix => {
                Self::HueMix(HueMixMenu::new(settings, state, probe, bus, screen, now)?)
            }
        })
    }

    pub const fn id(&self) -> MenuId {
        match self {
            Self::RgbMix(_) => MenuId::RgbMix,
            Self::HueMix(_) => MenuId::HueMix,
        }
    }

    pub fn channels(&self) -> &[Channel<E>; CHANNEL_COUNT] {
        match self {
            Self::RgbMix(menu) => menu.channels(),
            Self::HueMix(menu) => menu.channels(),
        }
    }

    pub fn update_trails<S: PixelSink, const N: usize>(
        &mut self,
        bus: &mut PixelBusManager<S, N>,
        now: Instant,
    ) {
        match self {
            Self::RgbMix(menu) => menu.update_trails(bus, now),
            Self::HueMix(menu) => menu.update_trails(bus, now),
        }
    }

    pub fn update_encoders(
        &mut self,
        enabled: bool,
        sensitivity: i32,
        now: Instant,
    ) -> ChannelToggles {
        match self {
            Self::RgbMix(menu) => menu.update_encoders(enabled, sensitivity, now),
            Self::HueMix(menu) => menu.update_encoders(enabled, sensitivity, now),
        }
    }

    pub fn update_screen<D: Screen>(&mut self, screen: &mut D, now: Instant) {
        match self {
            Self::RgbMix(menu) => menu.update_screen(screen, now),
            Self::HueMix(menu) => menu.update_screen(screen, now),
        }
    }

    pub fn reset_screen<D: Screen>(&mut self, screen: &mut D, now: Instant) {
        match self {
            Self::RgbMix(menu) => menu.reset_screen(screen, now),
            Self::HueMix(menu) => menu.reset_screen(screen, now),
        }
    }

    pub fn export_state(&self) -> MenuState {
        match self {
            Self::RgbMix(menu) => menu.export_state(),
            Self::HueMix(menu) => menu.export_state(),
        }
    }

    pub fn combined_color(&self) -> Rgb {
        match self {
            Self::RgbMix(menu) => menu.combined_color(),
            Self::HueMix(menu) => menu.combined_color(),
        }
    }

    pub fn knob_sensitivity(&self) -> i32 {
        match self {
            Self::RgbMix(menu) => menu.knob_sensitivity(),
            Self::HueMix(menu) => menu.knob_sensitivity(),
        }
    }
}

/// Probe and build the three channels of a menu
fn build_channels<P, S, const N: usize>(
    settings: &Settings,
    state: &MenuState,
    probe: &mut P,
    bus: &PixelBusManager<S, N>,
    palette: impl Fn(usize) -> ChannelPalette,
    sensitivity: i32,
    now: Instant,
) -> Result<[Channel<P::Encoder>; CHANNEL_COUNT], BusError>
where
    P: EncoderProbe,
    S: PixelSink,
{
    let cursor = bus.require(settings.cursor_strip.pin)?;
    let mut build = |index: usize| -> Result<Channel<P::Encoder>, BusError> {
        let config = &settings.channels[index];
        let init = ChannelInit {
            index,
            config,
            quantizer: settings.quantizer,
            debounce: settings.debounce,
            palette: palette(index),
            outputs: ChannelOutputs {
                trail: bus.require(config.trail.pin)?,
                cursor,
                cursor_pixel: config.cursor_pixel,
            },
            saved: state.channel(index),
            sensitivity,
        };
        Ok(Channel::new(init, probe.probe(&config.encoder), now))
    };
    Ok([build(0)?, build(1)?, build(2)?])
}

/// Write channel names under the bars
fn label_channels<D: Screen>(screen: &mut D, names: [&str; CHANNEL_COUNT]) {
    for (index, name) in names.into_iter().enumerate() {
        screen.set_channel_label(index, name);
    }
}
