use core::fmt;

use crate::pixel_bus::PinId;

/// Errors from the pixel bus registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Every registry slot is taken
    RegistryFull(PinId),
    /// No strip was opened on this pin
    UnknownPin(PinId),
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryFull(pin) => write!(f, "no free strip slot for pin {}", pin.0),
            Self::UnknownPin(pin) => write!(f, "no strip opened on pin {}", pin.0),
        }
    }
}

/// Errors returned while assembling a [`Mixer`](crate::Mixer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerError {
    Bus(BusError),
}

impl From<BusError> for MixerError {
    fn from(err: BusError) -> Self {
        Self::Bus(err)
    }
}

impl fmt::Display for MixerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(err) => write!(f, "pixel bus: {}", err),
        }
    }
}
