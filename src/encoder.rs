//! Rotary encoder access and the simulated fallback.
//!
//! An encoder is probed once per channel construction. If the probe fails
//! the channel keeps running on a [`SimulatedEncoder`] frozen at its last
//! known position.

use core::fmt::Debug;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;

/// Seesaw rotary breakout defaults
pub const DEFAULT_BUTTON_PIN: u8 = 24;
pub const DEFAULT_INDICATOR_PIN: u8 = 6;

/// A rotary encoder with a push button and an optional indicator pixel.
///
/// `position` is the cumulative tick count; the button is reported as
/// "pressed" regardless of the line's electrical polarity.
pub trait RotaryEncoder {
    type Error: Debug;

    fn position(&mut self) -> Result<i32, Self::Error>;

    fn set_position(&mut self, position: i32) -> Result<(), Self::Error>;

    fn button_pressed(&mut self) -> Result<bool, Self::Error>;

    /// Set the indicator pixel; encoders without one ignore it
    fn set_indicator(&mut self, _color: Rgb) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Opens encoders by their bus configuration
pub trait EncoderProbe {
    type Encoder: RotaryEncoder;
    type Error: Debug;

    fn probe(&mut self, config: &EncoderConfig) -> Result<Self::Encoder, Self::Error>;
}

/// Where an encoder lives on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    /// I2C address
    pub address: u8,
    pub button_pin: u8,
    /// Pin of the onboard pixel, `None` if there is none
    pub indicator_pin: Option<u8>,
}

impl EncoderConfig {
    pub const fn new(address: u8) -> Self {
        Self {
            address,
            button_pin: DEFAULT_BUTTON_PIN,
            indicator_pin: Some(DEFAULT_INDICATOR_PIN),
        }
    }
}

/// Stand-in for an encoder that did not answer the probe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulatedEncoder {
    position: i32,
}

impl SimulatedEncoder {
    pub const fn new(position: i32) -> Self {
        Self { position }
    }

    pub const fn position(&self) -> i32 {
        self.position
    }

    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

/// Where a channel reads its position from
#[derive(Debug)]
pub enum PositionSource<E> {
    Hardware(E),
    Simulated(SimulatedEncoder),
}

impl<E: RotaryEncoder> PositionSource<E> {
    /// Pick the source from a probe result.
    ///
    /// On success the encoder is moved to `initial_position`. A failed probe,
    /// or a failed first write, falls back to a simulated encoder holding
    /// `initial_position`.
    #[cfg_attr(not(feature = "esp32-log"), allow(unused_variables))]
    pub fn from_probe<P: Debug>(probe: Result<E, P>, initial_position: i32, address: u8) -> Self {
        match probe {
            Ok(mut encoder) => match encoder.set_position(initial_position) {
                Ok(()) => Self::Hardware(encoder),
                Err(err) => {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[PositionSource.from_probe] simulating encoder at {:#04x}: {:?}",
                        address, err
                    );
                    Self::Simulated(SimulatedEncoder::new(initial_position))
                }
            },
            Err(err) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[PositionSource.from_probe] simulating encoder at {:#04x}: {:?}",
                    address, err
                );
                Self::Simulated(SimulatedEncoder::new(initial_position))
            }
        }
    }

    /// Current position, `None` if the read failed this tick
    pub fn position(&mut self) -> Option<i32> {
        match self {
            Self::Hardware(encoder) => match encoder.position() {
                Ok(position) => Some(position),
                Err(_err) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[PositionSource.position] read failed: {:?}", _err);
                    None
                }
            },
            Self::Simulated(encoder) => Some(encoder.position()),
        }
    }

    pub fn set_position(&mut self, position: i32) {
        match self {
            Self::Hardware(encoder) => {
                let _ = encoder.set_position(position);
            }
            Self::Simulated(encoder) => encoder.set_position(position),
        }
    }

    /// Button level; a failed read counts as released
    pub fn button_pressed(&mut self) -> bool {
        match self {
            Self::Hardware(encoder) => encoder.button_pressed().unwrap_or(false),
            Self::Simulated(_) => false,
        }
    }

    pub fn set_indicator(&mut self, color: Rgb) {
        if let Self::Hardware(encoder) = self {
            let _ = encoder.set_indicator(color);
        }
    }

    pub const fn is_simulated(&self) -> bool {
        matches!(self, Self::Simulated(_))
    }
}
