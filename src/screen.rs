//! Display-side abstraction and the incremental bar graph.

use core::fmt::Write;
use core::ops::Range;

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::color::Rgb;

/// How a channel bar is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// Enabled channel, solid bar in the channel color
    Filled(Rgb),
    /// Disabled channel, dimmed palette
    Outline(Rgb),
}

/// Retained-mode display sink.
///
/// Elements stay on screen until changed or until [`clear`](Screen::clear).
/// Bars live in a bitmap per channel, `bar_area_height` rows tall with row 0
/// at the top.
pub trait Screen {
    /// Drop every element, called before another menu is built
    fn clear(&mut self);

    fn show_title(&mut self, subtitle: &str, title: &str);

    fn hide_title(&mut self);

    /// Fill the preview swatch
    fn set_preview(&mut self, color: Rgb);

    fn set_color_name(&mut self, name: &str, text_color: Rgb, scale: u8);

    fn set_channel_label(&mut self, channel: usize, text: &str);

    fn set_value_label(&mut self, channel: usize, text: &str);

    fn set_bar_style(&mut self, channel: usize, style: BarStyle);

    /// Set (`filled`) or clear a run of full-width rows in a bar bitmap
    fn fill_bar_rows(&mut self, channel: usize, rows: Range<u16>, filled: bool);
}

/// Rows that changed between two bar heights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarDelta {
    pub rows: Range<u16>,
    pub filled: bool,
}

/// Tracks the drawn height of one bar so only the delta rows are redrawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGraph {
    area_height: u16,
    max_value: u16,
    height: u16,
}

impl BarGraph {
    pub const fn new(area_height: u16, max_value: u16) -> Self {
        Self {
            area_height,
            max_value,
            height: 0,
        }
    }

    /// Height in rows for `value`, linear in the value
    #[allow(clippy::cast_possible_truncation)]
    pub fn height_for(&self, value: u16) -> u16 {
        if self.max_value == 0 {
            return 0;
        }
        let value = u32::from(value.min(self.max_value));
        (value * u32::from(self.area_height) / u32::from(self.max_value)) as u16
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Treat the bar as empty, e.g. after the screen was cleared
    pub fn reset(&mut self) {
        self.height = 0;
    }

    /// Move the bar to `value`, returning the rows to set or clear
    pub fn update(&mut self, value: u16) -> Option<BarDelta> {
        let new_height = self.height_for(value);
        let old_height = self.height;
        if new_height == old_height {
            return None;
        }
        self.height = new_height;
        let bottom = self.area_height;
        let delta = if new_height > old_height {
            BarDelta {
                rows: bottom - new_height..bottom - old_height,
                filled: true,
            }
        } else {
            BarDelta {
                rows: bottom - old_height..bottom - new_height,
                filled: false,
            }
        };
        Some(delta)
    }
}

/// Menu title shown for a while after a menu is activated
#[derive(Debug, Clone, Copy)]
pub struct TitleOverlay {
    hide_at: Instant,
    visible: bool,
}

impl TitleOverlay {
    pub fn show<D: Screen>(screen: &mut D, title: &str, duration: Duration, now: Instant) -> Self {
        screen.show_title("Menu", title);
        Self {
            hide_at: now + duration,
            visible: true,
        }
    }

    /// Hide the title once its time is up
    pub fn poll<D: Screen>(&mut self, screen: &mut D, now: Instant) {
        if self.visible && now >= self.hide_at {
            screen.hide_title();
            self.visible = false;
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Zero-padded value text, e.g. `"007"`
pub type ValueText = String<4>;

pub fn value_text(value: u8) -> ValueText {
    let mut text = ValueText::new();
    let _ = write!(text, "{:03}", value);
    text
}

/// Last text sent to a label, to skip redundant redraws
#[derive(Debug, Clone, Default)]
pub struct LabelCache {
    last: Option<ValueText>,
}

impl LabelCache {
    /// Returns the text if it differs from the last one
    pub fn update(&mut self, value: u8) -> Option<ValueText> {
        let text = value_text(value);
        if self.last.as_ref() == Some(&text) {
            return None;
        }
        self.last = Some(text.clone());
        Some(text)
    }
}
