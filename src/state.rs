//! Snapshot of menu state carried across menu switches and power loss.
//!
//! Serialized as a flat document:
//! `{"trail_delay": 0.01, "knob_sensitivity": 3, "channel_0": {"value": 12,
//! "encoder_position": 12, "enabled": true}, ...}`. Every key is optional
//! when reading.

use core::fmt::Debug;

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::config::CHANNEL_COUNT;

/// Saved state of one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoder_position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Saved state of a menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MenuDocument", into = "MenuDocument")]
pub struct MenuState {
    pub trail_delay: Option<Duration>,
    pub knob_sensitivity: Option<i32>,
    pub channels: [ChannelState; CHANNEL_COUNT],
}

impl MenuState {
    pub fn channel(&self, index: usize) -> ChannelState {
        self.channels.get(index).copied().unwrap_or_default()
    }
}

/// Wire shape of [`MenuState`]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct MenuDocument {
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    trail_delay: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    knob_sensitivity: Option<i32>,
    channel_0: ChannelState,
    channel_1: ChannelState,
    channel_2: ChannelState,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn duration_from_secs(secs: f32) -> Duration {
    Duration::from_micros(libm::roundf(secs * 1_000_000.0).max(0.0) as u64)
}

#[allow(clippy::cast_precision_loss)]
fn duration_to_secs(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1_000_000.0
}

impl From<MenuDocument> for MenuState {
    fn from(doc: MenuDocument) -> Self {
        Self {
            trail_delay: doc.trail_delay.map(duration_from_secs),
            knob_sensitivity: doc.knob_sensitivity,
            channels: [doc.channel_0, doc.channel_1, doc.channel_2],
        }
    }
}

impl From<MenuState> for MenuDocument {
    fn from(state: MenuState) -> Self {
        let [channel_0, channel_1, channel_2] = state.channels;
        Self {
            trail_delay: state.trail_delay.map(duration_to_secs),
            knob_sensitivity: state.knob_sensitivity,
            channel_0,
            channel_1,
            channel_2,
        }
    }
}

/// Persistent storage for the menu state document
pub trait StateStore {
    type Error: Debug;

    fn load(&mut self) -> Result<MenuState, Self::Error>;

    fn save(&mut self, state: &MenuState) -> Result<(), Self::Error>;
}

/// Store that remembers nothing; every load yields defaults
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl StateStore for NoopStore {
    type Error = core::convert::Infallible;

    fn load(&mut self) -> Result<MenuState, Self::Error> {
        Ok(MenuState::default())
    }

    fn save(&mut self, _state: &MenuState) -> Result<(), Self::Error> {
        Ok(())
    }
}
