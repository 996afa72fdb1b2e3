//! Hue mix menu
//!
//! Each channel picks a hue on the color wheel. Every channel shows its own
//! hue on its trail, cursor and indicator pixels; the preview is the average
//! of the three hues.

use embassy_time::{Duration, Instant};

use super::{ChannelToggles, Menu, MenuId, build_channels, label_channels};
use crate::PixelSink;
use crate::channel::{Channel, ChannelPalette};
use crate::color::{BLACK, ColorLabel, Rgb, average_colors, hue_to_rgb};
use crate::config::{CHANNEL_COUNT, Settings};
use crate::encoder::{EncoderProbe, RotaryEncoder};
use crate::error::BusError;
use crate::gamma::dim_color;
use crate::pixel_bus::PixelBusManager;
use crate::screen::{Screen, TitleOverlay};
use crate::state::MenuState;
use crate::trail::{TrailBuffer, TrailGate};

/// Names longer than this are drawn at scale 1
const LONG_NAME: usize = 26;

const CHANNEL_NAMES: [&str; CHANNEL_COUNT] = ["Hue1", "Hue2", "Hue3"];

pub struct HueMixMenu<E> {
    channels: [Channel<E>; CHANNEL_COUNT],
    trail_delay: Duration,
    knob_sensitivity: i32,
    gamma: f32,

    trails: [TrailBuffer<Rgb>; CHANNEL_COUNT],
    trail_gate: TrailGate,
    title: TitleOverlay,
    title_duration: Duration,
}

impl<E: RotaryEncoder> HueMixMenu<E> {
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
        let gamma = settings.hue_gamma;
        let knob_sensitivity = state
            .knob_sensitivity
            .unwrap_or(settings.defaults.knob_sensitivity);
        let channels = build_channels(
            settings,
            state,
            probe,
            bus,
            |_| ChannelPalette::Hue { gamma },
            knob_sensitivity,
            now,
        )?;

        let title = TitleOverlay::show(
            screen,
            MenuId::HueMix.as_str(),
            settings.screen.title_duration,
            now,
        );
        label_channels(screen, CHANNEL_NAMES);

        Ok(Self {
            channels,
            trail_delay: state.trail_delay.unwrap_or(settings.defaults.trail_delay),
            knob_sensitivity,
            gamma,
            trails: Default::default(),
            trail_gate: TrailGate::new(now),
            title,
            title_duration: settings.screen.title_duration,
        })
    }

    pub const fn channels(&self) -> &[Channel<E>; CHANNEL_COUNT] {
        &self.channels
    }

    /// Colors currently on a channel's trail, newest first
    pub fn trail(&self, index: usize) -> Option<&TrailBuffer<Rgb>> {
        self.trails.get(index)
    }

    /// Dimmed hue of a channel, black while disabled
    fn pixel_color(&self, channel: &Channel<E>) -> Rgb {
        if channel.is_enabled() {
            dim_color(hue_to_rgb(channel.pending_value()), self.gamma)
        } else {
            BLACK
        }
    }
}

impl<E: RotaryEncoder> Menu for HueMixMenu<E> {
    fn update_trails<S: PixelSink, const N: usize>(
        &mut self,
        bus: &mut PixelBusManager<S, N>,
        now: Instant,
    ) {
        if !self.trail_gate.poll(now, self.trail_delay) {
            return;
        }
        let colors = self.channels.each_ref().map(|channel| self.pixel_color(channel));
        for ((channel, trail), color) in self.channels.iter().zip(&mut self.trails).zip(colors) {
            let outputs = channel.outputs();
            trail.push(color);
            bus.render(outputs.trail, trail.iter().copied());
            bus.set_and_flush(outputs.cursor, usize::from(outputs.cursor_pixel), trail.tail());
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
            channel.commit();
        }
    }

    fn reset_screen<D: Screen>(&mut self, screen: &mut D, now: Instant) {
        self.title = TitleOverlay::show(
            screen,
            MenuId::HueMix.as_str(),
            self.title_duration,
            now,
        );
        label_channels(screen, CHANNEL_NAMES);
    }

    fn export_state(&self) -> MenuState {
        MenuState {
            trail_delay: Some(self.trail_delay),
            knob_sensitivity: Some(self.knob_sensitivity),
            channels: self.channels.each_ref().map(Channel::export_state),
        }
    }

    fn combined_color(&self) -> Rgb {
        let hues = self
            .channels
            .each_ref()
            .map(|channel| hue_to_rgb(channel.pending_value()));
        average_colors(&hues)
    }

    fn knob_sensitivity(&self) -> i32 {
        self.knob_sensitivity
    }
}
