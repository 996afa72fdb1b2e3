//! Registry of physical LED strips keyed by data pin.
//!
//! Every strip is opened once and owned here. Channels only keep a
//! [`StripHandle`], so two channels configured on the same pin share one
//! strip instead of fighting over the bus.

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::PixelSink;
use crate::color::Rgb;
use crate::error::BusError;

/// Physical data pin a strip is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u8);

/// Non-owning reference to a strip in a [`PixelBusManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripHandle(u8);

impl StripHandle {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Byte order the strip expects on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl PixelOrder {
    /// Reorder a color into wire order
    pub const fn apply(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            Self::Rgb => [r, g, b],
            Self::Rbg => [r, b, g],
            Self::Grb => [g, r, b],
            Self::Gbr => [g, b, r],
            Self::Brg => [b, r, g],
            Self::Bgr => [b, g, r],
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            "RGB" => Some(Self::Rgb),
            "RBG" => Some(Self::Rbg),
            "GRB" => Some(Self::Grb),
            "GBR" => Some(Self::Gbr),
            "BRG" => Some(Self::Brg),
            "BGR" => Some(Self::Bgr),
            _ => None,
        }
    }
}

/// How to open one strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    pub pin: PinId,
    pub count: u16,
    /// Global strip brightness (0-255 = 0.0-1.0), applied by the driver
    pub brightness: u8,
    pub order: PixelOrder,
}

/// Owner of every opened strip
pub struct PixelBusManager<S: PixelSink, const N: usize> {
    strips: Vec<(PinId, S), N>,
}

impl<S: PixelSink, const N: usize> Default for PixelBusManager<S, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PixelSink, const N: usize> PixelBusManager<S, N> {
    pub const fn new() -> Self {
        Self { strips: Vec::new() }
    }

    /// Open the strip described by `config`, or return the existing handle.
    ///
    /// `open` is only called the first time a pin is seen.
    #[allow(clippy::cast_possible_truncation)]
    pub fn open<F>(&mut self, config: &StripConfig, open: F) -> Result<StripHandle, BusError>
    where
        F: FnOnce(&StripConfig) -> S,
    {
        if let Some(handle) = self.handle(config.pin) {
            return Ok(handle);
        }
        if self.strips.is_full() || self.strips.len() > usize::from(u8::MAX) {
            #[cfg(feature = "esp32-log")]
            println!("[PixelBusManager.open] registry full, pin {}", config.pin.0);
            return Err(BusError::RegistryFull(config.pin));
        }
        let index = self.strips.len();
        self.strips
            .push((config.pin, open(config)))
            .map_err(|_| BusError::RegistryFull(config.pin))?;
        Ok(StripHandle(index as u8))
    }

    /// Handle of the strip on `pin`, if it was opened
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle(&self, pin: PinId) -> Option<StripHandle> {
        self.strips
            .iter()
            .position(|(opened, _)| *opened == pin)
            .map(|index| StripHandle(index as u8))
    }

    /// Like [`handle`](Self::handle) but as an error
    pub fn require(&self, pin: PinId) -> Result<StripHandle, BusError> {
        self.handle(pin).ok_or(BusError::UnknownPin(pin))
    }

    pub fn strip(&self, handle: StripHandle) -> Option<&S> {
        self.strips.get(handle.index()).map(|(_, strip)| strip)
    }

    pub fn strip_mut(&mut self, handle: StripHandle) -> Option<&mut S> {
        self.strips.get_mut(handle.index()).map(|(_, strip)| strip)
    }

    /// Write `colors` from pixel 0 onward and flush the strip
    pub fn render<I>(&mut self, handle: StripHandle, colors: I)
    where
        I: IntoIterator<Item = Rgb>,
    {
        let Some(strip) = self.strip_mut(handle) else {
            return;
        };
        let count = strip.len();
        for (index, color) in colors.into_iter().take(count).enumerate() {
            strip.set_pixel(index, color);
        }
        strip.flush();
    }

    /// Set one pixel and flush the strip
    pub fn set_and_flush(&mut self, handle: StripHandle, index: usize, color: Rgb) {
        let Some(strip) = self.strip_mut(handle) else {
            return;
        };
        if index < strip.len() {
            strip.set_pixel(index, color);
        }
        strip.flush();
    }

    /// Number of opened strips
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }
}
