use embassy_time::{Duration, Instant};

/// Minimum time between two accepted button presses
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Edge detector with a time gate for encoder push buttons.
///
/// A press counts when the button goes from released to pressed and more than
/// `interval` has passed since the previous accepted press (or since the
/// debouncer was created).
#[derive(Debug, Clone)]
pub struct ButtonDebouncer {
    interval: Duration,
    last_event: Instant,
    was_pressed: bool,
}

impl ButtonDebouncer {
    pub const fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_event: now,
            was_pressed: false,
        }
    }

    /// Feed one button reading, returns `true` if it is an accepted press
    pub fn update(&mut self, pressed: bool, now: Instant) -> bool {
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        if !edge {
            return false;
        }

        let elapsed = now
            .checked_duration_since(self.last_event)
            .unwrap_or(Duration::from_millis(0));
        if elapsed <= self.interval {
            return false;
        }
        self.last_event = now;
        true
    }

    /// Time of the last accepted press
    pub const fn last_event(&self) -> Instant {
        self.last_event
    }
}
