//! RGB mix menu
//!
//! Each channel drives one primary directly. The preview is the three
//! channel values taken as an RGB tuple, with disabled channels at 0.

use embassy_time::{Duration, Instant};

use super::{ChannelToggles, Menu, MenuId, build_channels, label_channels};
use crate::PixelSink;
use crate::channel::{Channel, ChannelPalette};
use crate::color::{ColorLabel, Primary, Rgb};
use crate::config::{CHANNEL_COUNT, Settings};
use crate::encoder::{EncoderProbe, RotaryEncoder};
use crate::error::BusError;
use crate::gamma::dim_curve;
use crate::pixel_bus::PixelBusManager;
use crate::screen::{BarGraph, BarStyle, LabelCache, Screen, TitleOverlay};
use crate::state::MenuState;

/// Names longer than this are drawn at scale 1
const LONG_NAME: usize = 30;

/// Disabled bars use the primary at this level
const DISABLED_LEVEL: u8 = 0x40;

pub struct RgbMixMenu<E> {
    channels: [Channel<E>; CHANNEL_COUNT],
    trail_delay: Duration,
    knob_sensitivity: i32,
    trail_gamma: Option<f32>,

    bars: [BarGraph; CHANNEL_COUNT],
    bar_styles: [Option<BarStyle>; CHANNEL_COUNT],
    value_labels: [LabelCache; CHANNEL_COUNT],
    title: TitleOverlay,
    title_duration: Duration,
}

impl<E: RotaryEncoder> RgbMixMenu<E> {
    pub fn new<P, S, D, const N: usize>(
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
        let knob_sensitivity = state
            .knob_sensitivity
            .unwrap_or(settings.defaults.knob_sensitivity);
        let channels = build_channels(
            settings,
            state,
            probe,
            bus,
            |index| ChannelPalette::Primary(primary_of(index)),
            knob_sensitivity,
            now,
        )?;

        let title = TitleOverlay::show(
            screen,
            MenuId::RgbMix.as_str(),
            settings.screen.title_duration,
            now,
        );
        label_channels(screen, Primary::ALL.map(Primary::as_str));

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let max_value = settings.quantizer.max_value.clamp(0, 255) as u16;
        let bar = BarGraph::new(settings.screen.bar_area_height(), max_value);

        Ok(Self {
            channels,
            trail_delay: state.trail_delay.unwrap_or(settings.defaults.trail_delay),
            knob_sensitivity,
            trail_gamma: settings.rgb_trail_gamma,
            bars: [bar; CHANNEL_COUNT],
            bar_styles: [None; CHANNEL_COUNT],
            value_labels: Default::default(),
            title,
            title_duration: settings.screen.title_duration,
        })
    }

    pub const fn channels(&self) -> &[Channel<E>; CHANNEL_COUNT] {
        &self.channels
    }
}

impl<E: RotaryEncoder> Menu for RgbMixMenu<E> {
    fn update_trails<S: PixelSink, const N: usize>(
        &mut self,
        bus: &mut PixelBusManager<S, N>,
        now: Instant,
    ) {
        let gamma = self.trail_gamma;
        for channel in &mut self.channels {
            let primary = primary_of(channel.index());
            channel.update_trail(bus, self.trail_delay, now, |value| {
                primary.tint(gamma.map_or(value, |gamma| dim_curve(value, gamma)))
            });
        }
    }

    fn update_encoders(&mut self, enabled: bool, sensitivity: i32, now: Instant) -> ChannelToggles {
        let mut toggles = [None; CHANNEL_COUNT];
        if !enabled {
            return toggles;
        }
        for (toggle, channel) in toggles.iter_mut().zip(self.channels.iter_mut()) {
            *toggle = channel.update_encoder(sensitivity, now);
        }
        toggles
    }

    fn update_screen<D: Screen>(&mut self, screen: &mut D, now: Instant) {
        self.title.poll(screen, now);

        let color = self.combined_color();
        let label = ColorLabel::for_color(color, LONG_NAME);
        screen.set_preview(color);
        screen.set_color_name(&label.text, label.text_color, label.scale);

        for channel in &mut self.channels {
            let index = channel.index();
            let primary = primary_of(index);
            let value = channel.pending_value();

            if let Some(delta) = self.bars[index].update(u16::from(value)) {
                screen.fill_bar_rows(index, delta.rows, delta.filled);
            }

            let style = if channel.is_enabled() {
                BarStyle::Filled(primary.tint(u8::MAX))
            } else {
                BarStyle::Outline(primary.tint(DISABLED_LEVEL))
            };
            if self.bar_styles[index] != Some(style) {
                screen.set_bar_style(index, style);
                self.bar_styles[index] = Some(style);
            }

            if let Some(text) = self.value_labels[index].update(value) {
                screen.set_value_label(index, &text);
            }

            channel.commit();
        }
    }

    fn reset_screen<D: Screen>(&mut self, screen: &mut D, now: Instant) {
        self.title = TitleOverlay::show(
            screen,
            MenuId::RgbMix.as_str(),
            self.title_duration,
            now,
        );
        label_channels(screen, Primary::ALL.map(Primary::as_str));
        for bar in &mut self.bars {
            bar.reset();
        }
        self.bar_styles = [None; CHANNEL_COUNT];
        self.value_labels = Default::default();
    }

    fn export_state(&self) -> MenuState {
        MenuState {
            trail_delay: Some(self.trail_delay),
            knob_sensitivity: Some(self.knob_sensitivity),
            channels: self.channels.each_ref().map(Channel::export_state),
        }
    }

    fn combined_color(&self) -> Rgb {
        let [r, g, b] = self.channels.each_ref().map(Channel::output_value);
        Rgb { r, g, b }
    }

    fn knob_sensitivity(&self) -> i32 {
        self.knob_sensitivity
    }
}

fn primary_of(index: usize) -> Primary {
    Primary::from_index(index).unwrap_or(Primary::Red)
}
