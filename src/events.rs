//! Notifications the mixer publishes for the application.
//!
//! A bounded queue built on `critical-section` and `heapless::Deque`, safe to
//! drain from a different task or interrupt than the one ticking the mixer.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Something the user did that the application may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixerEvent {
    /// A channel button toggled the channel on or off
    ChannelToggled { channel: usize, enabled: bool },
    /// The menu encoder selected another menu
    MenuSelected(usize),
    /// The menu encoder button was pressed; no built-in action
    MenuButtonPressed,
}

/// Error returned when trying to receive from an empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded event queue that keeps the newest events.
///
/// The mixer never waits on the consumer: publishing into a full queue drops
/// the oldest event.
pub struct EventQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<MixerEvent, SIZE>>>,
}

impl<const SIZE: usize> EventQueue<SIZE> {
    /// Create a new empty queue.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Publish an event, evicting the oldest one if the queue is full.
    ///
    /// Returns the evicted event, if any.
    pub fn publish(&self, event: MixerEvent) -> Option<MixerEvent> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            let evicted = if queue.is_full() {
                queue.pop_front()
            } else {
                None
            };
            // Cannot fail: a slot was freed above if needed
            let _ = queue.push_back(event);
            evicted
        })
    }

    /// Try to receive the oldest event.
    ///
    /// Returns `Err(TryReceiveError)` if the queue is empty.
    pub fn try_receive(&self) -> Result<MixerEvent, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }

    /// Number of events waiting
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for EventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
