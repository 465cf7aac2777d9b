//! Shared numeric constants for the controls crate.

// ── Orbit ───────────────────────────────────────────────────────

/// Radians of yaw per pixel of horizontal drag at `rotate_speed = 1`.
pub const ROTATE_RADIANS_PER_PX: f64 = 0.01;

// ── Pinch ───────────────────────────────────────────────────────

/// Smallest uniform scale a pinch can produce.
pub const MIN_SCALE: f64 = 0.1;

/// Largest uniform scale a pinch can produce.
pub const MAX_SCALE: f64 = 10.0;

/// Camera distance before the first pinch.
pub const DEFAULT_DISTANCE: f64 = 5.0;

/// Finger distances at or below this are treated as coincident touches.
pub const MIN_FINGER_DISTANCE_PX: f64 = 1e-6;

// ── Indicator ───────────────────────────────────────────────────

/// How long the gesture indicator stays visible after a gesture starts.
pub const INDICATOR_DURATION_MS: u32 = 1000;

/// Clamp `value` into `[lo, hi]` without panicking on NaN or inverted bounds.
///
/// A NaN input resolves to `lo`.
#[must_use]
pub fn clamp_range(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
