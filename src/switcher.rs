//! Menu selection with a dedicated encoder.
//!
//! Rotation accumulates until it reaches the step threshold, then moves the
//! selection one menu in that direction and resets the encoder to 0.

use core::fmt::Debug;

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::debounce::ButtonDebouncer;
use crate::encoder::{PositionSource, RotaryEncoder};

/// Encoder ticks per menu step
pub const DEFAULT_STEP_THRESHOLD: i32 = 2;

/// Result of one switcher poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitcherUpdate {
    /// New menu index, if the selection moved
    pub selected: Option<usize>,
    /// The menu button was pressed
    pub button_pressed: bool,
}

pub struct MenuSwitcher<E> {
    source: PositionSource<E>,
    button: ButtonDebouncer,
    menu_count: usize,
    step_threshold: i32,
    accumulated_delta: i32,
    last_position: i32,
    selected_index: usize,
}

impl<E: RotaryEncoder> MenuSwitcher<E> {
    /// Create a switcher on menu 0; a failed probe leaves it on a still
    /// simulated encoder.
    pub fn new<P: Debug>(
        probe: Result<E, P>,
        address: u8,
        menu_count: usize,
        step_threshold: i32,
        debounce: Duration,
        now: Instant,
    ) -> Self {
        Self {
            source: PositionSource::from_probe(probe, 0, address),
            button: ButtonDebouncer::new(debounce, now),
            menu_count: menu_count.max(1),
            step_threshold: step_threshold.max(1),
            accumulated_delta: 0,
            last_position: 0,
            selected_index: 0,
        }
    }

    /// Read the encoder and button once
    pub fn update(&mut self, now: Instant) -> SwitcherUpdate {
        let mut update = SwitcherUpdate::default();

        if let Some(position) = self.source.position() {
            let delta = position.saturating_sub(self.last_position);
            self.last_position = position;
            update.selected = self.accumulate(delta);
        }

        let pressed = self.source.button_pressed();
        if self.button.update(pressed, now) {
            #[cfg(feature = "esp32-log")]
            println!("[MenuSwitcher.update] menu encoder button pressed");
            update.button_pressed = true;
        }

        update
    }

    /// Add a rotation delta, returning the new index if the selection moved.
    ///
    /// On a step the accumulator and the encoder position both return to 0.
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn accumulate(&mut self, delta: i32) -> Option<usize> {
        self.accumulated_delta = self.accumulated_delta.saturating_add(delta);
        if self.accumulated_delta.unsigned_abs() < self.step_threshold.unsigned_abs() {
            return None;
        }

        let direction = i64::from(self.accumulated_delta.signum());
        let count = self.menu_count as i64;
        self.selected_index = (self.selected_index as i64 + direction).rem_euclid(count) as usize;
        self.accumulated_delta = 0;
        self.source.set_position(0);
        self.last_position = 0;

        #[cfg(feature = "esp32-log")]
        println!(
            "[MenuSwitcher.accumulate] menu switched to index {}",
            self.selected_index
        );
        Some(self.selected_index)
    }

    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub const fn accumulated_delta(&self) -> i32 {
        self.accumulated_delta
    }

    pub const fn step_threshold(&self) -> i32 {
        self.step_threshold
    }

    pub const fn menu_count(&self) -> usize {
        self.menu_count
    }

    pub const fn is_simulated(&self) -> bool {
        self.source.is_simulated()
    }
}
