//! Tick scheduling and timing utilities.
//!
//! Provides portable loop pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

use crate::PixelSink;
use crate::encoder::EncoderProbe;
use crate::mixer::Mixer;
use crate::screen::Screen;
use crate::state::StateStore;

/// Default poll period (20 ticks per second).
pub const DEFAULT_TICK_DURATION: Duration = Duration::from_millis(50);

/// Result of a tick operation.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Fixed-period driver for a [`Mixer`].
///
/// Each tick runs every channel update before returning. If a slow bus
/// transaction makes the loop fall more than two periods behind, the backlog
/// is skipped instead of replayed.
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(mixer);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<'a, P, S, D, T, const STRIPS: usize, const EVENTS: usize>
where
    P: EncoderProbe,
    S: PixelSink,
    D: Screen,
    T: StateStore,
{
    mixer: Mixer<'a, P, S, D, T, STRIPS, EVENTS>,
    next_tick: Instant,
    tick_duration: Duration,
    ticks: u64,
}

impl<'a, P, S, D, T, const STRIPS: usize, const EVENTS: usize>
    TickScheduler<'a, P, S, D, T, STRIPS, EVENTS>
where
    P: EncoderProbe,
    S: PixelSink,
    D: Screen,
    T: StateStore,
{
    /// Create a scheduler ticking every `DEFAULT_TICK_DURATION`.
    pub fn new(mixer: Mixer<'a, P, S, D, T, STRIPS, EVENTS>) -> Self {
        Self::with_tick_duration(mixer, DEFAULT_TICK_DURATION)
    }

    pub fn with_tick_duration(
        mixer: Mixer<'a, P, S, D, T, STRIPS, EVENTS>,
        tick_duration: Duration,
    ) -> Self {
        Self {
            mixer,
            next_tick: Instant::from_millis(0),
            tick_duration,
            ticks: 0,
        }
    }

    /// Run one tick and return when the next one is due.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a long stall
        let max_drift = self.tick_duration.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        self.mixer.tick(now);
        self.ticks += 1;

        self.next_tick += self.tick_duration;

        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    /// Ticks run so far
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    pub const fn mixer(&self) -> &Mixer<'a, P, S, D, T, STRIPS, EVENTS> {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut Mixer<'a, P, S, D, T, STRIPS, EVENTS> {
        &mut self.mixer
    }
}
