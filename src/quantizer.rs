//! Raw encoder ticks to a bounded, glitch-filtered value.

/// Largest value a channel can take
pub const DEFAULT_MAX_VALUE: i32 = 255;

/// Largest accepted single-tick change; anything above is a read glitch
pub const DEFAULT_MAX_JUMP: i32 = 50;

/// Bounds applied by [`sanitize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizerConfig {
    pub max_value: i32,
    pub max_jump: i32,
}

impl Default for QuantizerConfig {
    fn default() -> Self {
        Self {
            max_value: DEFAULT_MAX_VALUE,
            max_jump: DEFAULT_MAX_JUMP,
        }
    }
}

impl QuantizerConfig {
    /// [`sanitize`] with this config's bounds
    pub fn sanitize(&self, raw_position: i32, last_accepted: i32, sensitivity: i32) -> i32 {
        sanitize(
            raw_position,
            last_accepted,
            sensitivity,
            self.max_value,
            self.max_jump,
        )
    }
}

/// Map a raw encoder position to a value in `[0, max_value]`.
///
/// The candidate is `clamp(raw * sensitivity, 0, max_value)`. If it lies more
/// than `max_jump` away from `last_accepted` the reading is treated as a bus
/// glitch and `last_accepted` is returned unchanged.
pub fn sanitize(
    raw_position: i32,
    last_accepted: i32,
    sensitivity: i32,
    max_value: i32,
    max_jump: i32,
) -> i32 {
    let candidate = raw_position
        .saturating_mul(sensitivity)
        .clamp(0, max_value.max(0));
    if candidate.abs_diff(last_accepted) > max_jump.unsigned_abs() {
        return last_accepted;
    }
    candidate
}

/// Hardware position to write back after accepting `accepted`.
///
/// Keeps the physical counter in step with the logical value so a later
/// sensitivity change does not make the value jump.
pub const fn write_back_position(accepted: i32, sensitivity: i32) -> i32 {
    let sensitivity = if sensitivity < 1 { 1 } else { sensitivity };
    (accepted / sensitivity).saturating_neg()
}
