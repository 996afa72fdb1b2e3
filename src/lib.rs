#![no_std]

pub mod channel;
pub mod color;
pub mod config;
pub mod debounce;
pub mod encoder;
pub mod error;
pub mod events;
pub mod gamma;
pub mod menu;
pub mod mixer;
pub mod pixel_bus;
pub mod quantizer;
pub mod screen;
pub mod state;
pub mod switcher;
pub mod tick_scheduler;
pub mod trail;

pub use channel::{Channel, ChannelInit, ChannelOutputs, ChannelPalette};
pub use config::{CHANNEL_COUNT, ChannelConfig, MenuDefaults, ScreenConfig, Settings};
pub use encoder::{EncoderConfig, EncoderProbe, PositionSource, RotaryEncoder, SimulatedEncoder};
pub use error::{BusError, MixerError};
pub use events::{EventQueue, MixerEvent};
pub use gamma::dim_curve;
pub use menu::{Menu, MenuId, MenuSlot};
pub use mixer::{Mixer, MixerIo};
pub use pixel_bus::{PinId, PixelBusManager, PixelOrder, StripConfig, StripHandle};
pub use quantizer::{QuantizerConfig, sanitize};
pub use screen::{BarStyle, Screen};
pub use state::{ChannelState, MenuState, StateStore};
pub use switcher::MenuSwitcher;
pub use tick_scheduler::{TickResult, TickScheduler};
pub use trail::{TRAIL_LEN, TrailBuffer};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip trait
///
/// Implement this trait to support different hardware platforms.
/// Writes are buffered until [`flush`](PixelSink::flush) so a whole strip
/// goes out in one bus transaction.
pub trait PixelSink {
    /// Number of pixels on the strip
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set one pixel in the write buffer
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Send the buffer to the strip
    fn flush(&mut self);
}
