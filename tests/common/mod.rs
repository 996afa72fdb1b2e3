#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use myrtio_color_mixer::encoder::{EncoderConfig, EncoderProbe, RotaryEncoder};
use myrtio_color_mixer::screen::{BarStyle, Screen};
use myrtio_color_mixer::state::{MenuState, StateStore};
use myrtio_color_mixer::{PixelSink, Rgb};

/// I2C error stand-in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// Encoder wiring shared between a test and every encoder the probe hands out
#[derive(Debug, Default)]
pub struct EncoderState {
    /// Hardware positions returned by the next reads, oldest first
    pub readings: VecDeque<i32>,
    /// Button levels returned by the next reads
    pub presses: VecDeque<bool>,
    pub position: i32,
    pub writes: Vec<i32>,
    pub indicator: Option<Rgb>,
    pub fail_writes: bool,
}

pub type SharedEncoder = Rc<RefCell<EncoderState>>;

pub struct FakeEncoder {
    state: SharedEncoder,
}

impl RotaryEncoder for FakeEncoder {
    type Error = BusFault;

    fn position(&mut self) -> Result<i32, BusFault> {
        let mut state = self.state.borrow_mut();
        if let Some(reading) = state.readings.pop_front() {
            state.position = reading;
        }
        Ok(state.position)
    }

    fn set_position(&mut self, position: i32) -> Result<(), BusFault> {
        let mut state = self.state.borrow_mut();
        if state.fail_writes {
            return Err(BusFault);
        }
        state.position = position;
        state.writes.push(position);
        Ok(())
    }

    fn button_pressed(&mut self) -> Result<bool, BusFault> {
        Ok(self.state.borrow_mut().presses.pop_front().unwrap_or(false))
    }

    fn set_indicator(&mut self, color: Rgb) -> Result<(), BusFault> {
        self.state.borrow_mut().indicator = Some(color);
        Ok(())
    }
}

/// Probe answering for registered addresses only
#[derive(Default)]
pub struct FakeProbe {
    encoders: Vec<(u8, SharedEncoder)>,
    pub probed: Vec<u8>,
}

impl FakeProbe {
    /// Probe with an encoder on each address
    pub fn with_addresses(addresses: &[u8]) -> Self {
        let mut probe = Self::default();
        for &address in addresses {
            probe.attach(address);
        }
        probe
    }

    pub fn attach(&mut self, address: u8) -> SharedEncoder {
        let state = SharedEncoder::default();
        self.encoders.push((address, state.clone()));
        state
    }

    pub fn encoder(&self, address: u8) -> SharedEncoder {
        self.encoders
            .iter()
            .find(|(a, _)| *a == address)
            .map(|(_, state)| state.clone())
            .expect("no encoder on address")
    }
}

impl EncoderProbe for FakeProbe {
    type Encoder = FakeEncoder;
    type Error = BusFault;

    fn probe(&mut self, config: &EncoderConfig) -> Result<FakeEncoder, BusFault> {
        self.probed.push(config.address);
        self.encoders
            .iter()
            .find(|(address, _)| *address == config.address)
            .map(|(_, state)| FakeEncoder {
                state: state.clone(),
            })
            .ok_or(BusFault)
    }
}

/// Strip that keeps the last flushed frame
#[derive(Debug, Clone)]
pub struct FakeStrip {
    pub buffer: Vec<Rgb>,
    pub shown: Vec<Rgb>,
    pub flushes: usize,
}

impl FakeStrip {
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![Rgb::default(); len],
            shown: vec![Rgb::default(); len],
            flushes: 0,
        }
    }
}

impl PixelSink for FakeStrip {
    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) {
        self.buffer[index] = color;
    }

    fn flush(&mut self) {
        self.shown.clone_from(&self.buffer);
        self.flushes += 1;
    }
}

/// Screen that records what is currently displayed
#[derive(Debug)]
pub struct FakeScreen {
    pub title: Option<(String, String)>,
    pub titles_shown: Vec<String>,
    pub preview: Option<Rgb>,
    pub color_name: Option<(String, Rgb, u8)>,
    pub channel_labels: [String; 3],
    pub value_labels: [String; 3],
    pub value_label_writes: usize,
    pub bar_styles: [Option<BarStyle>; 3],
    /// Row bitmap per bar, row 0 at the top
    pub bars: [Vec<bool>; 3],
    pub clears: usize,
}

impl FakeScreen {
    pub fn new(bar_area_height: u16) -> Self {
        let rows = vec![false; usize::from(bar_area_height)];
        Self {
            title: None,
            titles_shown: Vec::new(),
            preview: None,
            color_name: None,
            channel_labels: Default::default(),
            value_labels: Default::default(),
            value_label_writes: 0,
            bar_styles: [None; 3],
            bars: [rows.clone(), rows.clone(), rows],
            clears: 0,
        }
    }

    /// Filled rows of a bar
    pub fn bar_height(&self, channel: usize) -> usize {
        self.bars[channel].iter().filter(|row| **row).count()
    }

    pub fn color_name(&self) -> Option<&str> {
        self.color_name.as_ref().map(|(name, _, _)| name.as_str())
    }
}

impl Screen for FakeScreen {
    fn clear(&mut self) {
        let height = self.bars[0].len();
        *self = Self {
            titles_shown: core::mem::take(&mut self.titles_shown),
            clears: self.clears + 1,
            ..Self::new(u16::try_from(height).unwrap_or(u16::MAX))
        };
    }

    fn show_title(&mut self, subtitle: &str, title: &str) {
        self.title = Some((subtitle.to_string(), title.to_string()));
        self.titles_shown.push(title.to_string());
    }

    fn hide_title(&mut self) {
        self.title = None;
    }

    fn set_preview(&mut self, color: Rgb) {
        self.preview = Some(color);
    }

    fn set_color_name(&mut self, name: &str, text_color: Rgb, scale: u8) {
        self.color_name = Some((name.to_string(), text_color, scale));
    }

    fn set_channel_label(&mut self, channel: usize, text: &str) {
        self.channel_labels[channel] = text.to_string();
    }

    fn set_value_label(&mut self, channel: usize, text: &str) {
        self.value_labels[channel] = text.to_string();
        self.value_label_writes += 1;
    }

    fn set_bar_style(&mut self, channel: usize, style: BarStyle) {
        self.bar_styles[channel] = Some(style);
    }

    fn fill_bar_rows(&mut self, channel: usize, rows: core::ops::Range<u16>, filled: bool) {
        for row in rows {
            self.bars[channel][usize::from(row)] = filled;
        }
    }
}

/// In-memory state document
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: Option<MenuState>,
    pub saves: usize,
    pub fail_saves: bool,
}

impl StateStore for MemoryStore {
    type Error = BusFault;

    fn load(&mut self) -> Result<MenuState, BusFault> {
        self.saved.ok_or(BusFault)
    }

    fn save(&mut self, state: &MenuState) -> Result<(), BusFault> {
        if self.fail_saves {
            return Err(BusFault);
        }
        self.saved = Some(*state);
        self.saves += 1;
        Ok(())
    }
}
