//! Scrolling value history rendered across a short LED strip.

use embassy_time::{Duration, Instant};

/// Pixels per trail strip
pub const TRAIL_LEN: usize = 8;

/// Fixed-length history, newest entry first.
///
/// Pushing shifts every entry one slot towards the tail and drops the oldest,
/// so the length never changes.
#[derive(Debug, Clone)]
pub struct TrailBuffer<T: Copy + Default, const N: usize = TRAIL_LEN> {
    items: [T; N],
}

impl<T: Copy + Default, const N: usize> Default for TrailBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> TrailBuffer<T, N> {
    /// Buffer filled with `T::default()`
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
        }
    }

    /// Push a value to the front, dropping the tail
    pub fn push(&mut self, value: T) {
        if N == 0 {
            return;
        }
        self.items.copy_within(0..N - 1, 1);
        self.items[0] = value;
    }

    /// Most recently pushed value
    pub fn newest(&self) -> T {
        self.items.first().copied().unwrap_or_default()
    }

    /// Oldest value, shown on the cursor pixel
    pub fn tail(&self) -> T {
        self.items.last().copied().unwrap_or_default()
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Reset every entry to `T::default()`
    pub fn clear(&mut self) {
        self.items = [T::default(); N];
    }
}

/// Rate limiter for trail redraws, independent of the poll rate
#[derive(Debug, Clone, Copy)]
pub struct TrailGate {
    last_update: Instant,
}

impl TrailGate {
    pub const fn new(now: Instant) -> Self {
        Self { last_update: now }
    }

    /// Returns `true` (and restarts the wait) once `delay` has passed
    pub fn poll(&mut self, now: Instant, delay: Duration) -> bool {
        let due = now
            .checked_duration_since(self.last_update)
            .is_some_and(|elapsed| elapsed >= delay);
        if due {
            self.last_update = now;
        }
        due
    }

    pub const fn last_update(&self) -> Instant {
        self.last_update
    }
}
