//! One knob-driven color channel.
//!
//! A channel turns encoder ticks into a sanitized `pending_value`, toggles
//! itself on a debounced button press and feeds its trail strip, its cursor
//! pixel and its encoder indicator from that value.

use core::fmt::Debug;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelSink;
use crate::color::{BLACK, Primary, Rgb, hue_to_rgb, scale_color};
use crate::config::ChannelConfig;
use crate::debounce::ButtonDebouncer;
use crate::encoder::{PositionSource, RotaryEncoder};
use crate::gamma::dim_color;
use crate::pixel_bus::{PixelBusManager, StripHandle};
use crate::quantizer::{QuantizerConfig, write_back_position};
use crate::state::ChannelState;
use crate::trail::{TrailBuffer, TrailGate};

/// What the encoder indicator shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelPalette {
    /// Single primary at the channel value; left untouched while disabled
    Primary(Primary),
    /// Hue of the channel value, dimmed; off while disabled
    Hue { gamma: f32 },
}

impl ChannelPalette {
    /// Indicator color, `None` to leave the pixel as it is
    pub fn indicator(&self, value: u8, enabled: bool) -> Option<Rgb> {
        match *self {
            Self::Primary(primary) => enabled.then(|| primary.tint(value)),
            Self::Hue { gamma } => Some(if enabled {
                dim_color(hue_to_rgb(value), gamma)
            } else {
                BLACK
            }),
        }
    }
}

/// Strips a channel draws on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOutputs {
    pub trail: StripHandle,
    pub cursor: StripHandle,
    pub cursor_pixel: u16,
}

/// Everything needed to build a [`Channel`] besides its encoder
#[derive(Debug, Clone, Copy)]
pub struct ChannelInit<'a> {
    pub index: usize,
    pub config: &'a ChannelConfig,
    pub quantizer: QuantizerConfig,
    pub debounce: Duration,
    pub palette: ChannelPalette,
    pub outputs: ChannelOutputs,
    pub saved: ChannelState,
    /// Menu knob sensitivity at construction time
    pub sensitivity: i32,
}

pub struct Channel<E> {
    index: usize,
    address: u8,
    palette: ChannelPalette,
    outputs: ChannelOutputs,
    source: PositionSource<E>,
    quantizer: QuantizerConfig,
    sensitivity_override: Option<i32>,
    has_indicator: bool,
    brightness: u8,

    value: u8,
    pending_value: u8,
    last_position: i32,
    enabled: bool,
    button: ButtonDebouncer,
    trail_buffer: TrailBuffer<u8>,
    trail_gate: TrailGate,
}

impl<E: RotaryEncoder> Channel<E> {
    /// Create a channel from saved state and the probe result for its encoder.
    ///
    /// The trail starts all dark. A failed probe leaves the channel on a
    /// simulated encoder frozen at the saved position.
    pub fn new<P: Debug>(init: ChannelInit<'_>, probe: Result<E, P>, now: Instant) -> Self {
        let config = init.config;
        let max_value = clamp_to_u8(init.quantizer.max_value);
        let value = init
            .saved
            .value
            .unwrap_or(config.initial_value)
            .min(max_value);
        // A position outside the value range would make every reading a glitch
        let last_position = init
            .saved
            .encoder_position
            .filter(|position| (0..=init.quantizer.max_value).contains(position))
            .unwrap_or(i32::from(value));
        let sensitivity = config.sensitivity.unwrap_or(init.sensitivity).max(1);
        let source = PositionSource::from_probe(
            probe,
            write_back_position(last_position, sensitivity),
            config.encoder.address,
        );

        Self {
            index: init.index,
            address: config.encoder.address,
            palette: init.palette,
            outputs: init.outputs,
            source,
            quantizer: init.quantizer,
            sensitivity_override: config.sensitivity,
            has_indicator: config.encoder.indicator_pin.is_some(),
            brightness: config.brightness,
            value,
            pending_value: value,
            last_position,
            enabled: init.saved.enabled.unwrap_or(true),
            button: ButtonDebouncer::new(init.debounce, now),
            trail_buffer: TrailBuffer::new(),
            trail_gate: TrailGate::new(now),
        }
    }

    /// Poll the button and the encoder.
    ///
    /// The knob is tracked even while the channel is disabled, so it resumes
    /// at the right value. Returns the new enabled flag if the button toggled
    /// it.
    pub fn update_encoder(&mut self, sensitivity: i32, now: Instant) -> Option<bool> {
        let pressed = self.source.button_pressed();
        let toggled = self.button.update(pressed, now).then(|| {
            self.enabled = !self.enabled;
            #[cfg(feature = "esp32-log")]
            println!(
                "[Channel.update_encoder] encoder {:#04x} toggled to {}",
                self.address,
                if self.enabled { "enabled" } else { "disabled" }
            );
            self.enabled
        });

        let sensitivity = self.sensitivity_override.unwrap_or(sensitivity).max(1);
        if let Some(position) = self.source.position() {
            let accepted = self
                .quantizer
                .sanitize(position.saturating_neg(), self.last_position, sensitivity);
            self.pending_value = clamp_to_u8(accepted);
            self.last_position = accepted;
            self.source
                .set_position(write_back_position(accepted, sensitivity));
        }

        if !self.has_indicator {
            return toggled;
        }
        if let Some(color) = self.palette.indicator(self.pending_value, self.enabled) {
            self.source
                .set_indicator(scale_color(color, self.brightness));
        }

        toggled
    }

    /// Scroll the trail if `trail_delay` has passed since the last scroll.
    ///
    /// Pushes the pending value (0 while disabled), redraws the trail strip
    /// through `render` and puts the oldest entry on the cursor pixel.
    /// Returns `true` if the strips were written.
    pub fn update_trail<S, F, const N: usize>(
        &mut self,
        bus: &mut PixelBusManager<S, N>,
        trail_delay: Duration,
        now: Instant,
        render: F,
    ) -> bool
    where
        S: PixelSink,
        F: Fn(u8) -> Rgb,
    {
        if !self.trail_gate.poll(now, trail_delay) {
            return false;
        }

        self.trail_buffer.push(self.output_value());
        bus.render(
            self.outputs.trail,
            self.trail_buffer.iter().map(|&value| render(value)),
        );
        bus.set_and_flush(
            self.outputs.cursor,
            usize::from(self.outputs.cursor_pixel),
            render(self.trail_buffer.tail()),
        );
        true
    }

    /// Make the pending value the committed one
    pub fn commit(&mut self) {
        self.value = self.pending_value;
    }

    pub fn export_state(&self) -> ChannelState {
        ChannelState {
            value: Some(self.value),
            encoder_position: Some(self.last_position),
            enabled: Some(self.enabled),
        }
    }

    /// Value the visual outputs should show: pending while enabled, else 0
    pub const fn output_value(&self) -> u8 {
        if self.enabled { self.pending_value } else { 0 }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub const fn value(&self) -> u8 {
        self.value
    }

    pub const fn pending_value(&self) -> u8 {
        self.pending_value
    }

    pub const fn last_position(&self) -> i32 {
        self.last_position
    }

    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub const fn is_simulated(&self) -> bool {
        self.source.is_simulated()
    }

    pub const fn outputs(&self) -> ChannelOutputs {
        self.outputs
    }

    pub const fn palette(&self) -> ChannelPalette {
        self.palette
    }

    pub const fn trail(&self) -> &TrailBuffer<u8> {
        &self.trail_buffer
    }

    pub const fn last_button_event(&self) -> Instant {
        self.button.last_event()
    }

    pub const fn last_trail_update(&self) -> Instant {
        self.trail_gate.last_update()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_to_u8(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}
