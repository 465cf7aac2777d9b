//! Input model: touch samples, boundary events, and the gesture state machine.
//!
//! `TouchSample` is one finger's page position at one event tick. `TouchInput`
//! is the whole event as the host delivers it. `GestureState` is the active
//! gesture being tracked between touch-start and touch-end, carrying the
//! context needed to compute the next incremental delta.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Deserialize;

/// One finger's screen position at one event tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TouchSample {
    /// Browser-assigned touch identifier.
    #[serde(default)]
    pub id: i32,
    /// Page x in CSS pixels.
    pub x: f64,
    /// Page y in CSS pixels.
    pub y: f64,
}

impl TouchSample {
    #[must_use]
    pub fn new(id: i32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean pixel distance to another sample.
    #[must_use]
    pub fn distance_to(&self, other: &TouchSample) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Which part of the touch lifecycle an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A touch event at the host boundary: its phase plus every active touch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TouchInput {
    #[serde(rename = "type")]
    pub phase: TouchPhase,
    #[serde(default)]
    pub touches: Vec<TouchSample>,
}

impl TouchInput {
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchSample>) -> Self {
        Self { phase, touches }
    }
}

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Single finger dragging horizontally rotates the model.
    Orbit,
    /// Two fingers spreading or closing scale the model.
    Pinch,
}

impl GestureKind {
    /// Number of simultaneous touches that starts this gesture.
    #[must_use]
    pub fn touch_count(self) -> usize {
        match self {
            Self::Orbit => 1,
            Self::Pinch => 2,
        }
    }

    /// Classify a touch-start by its touch count.
    #[must_use]
    pub fn from_touch_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(Self::Orbit),
            2 => Some(Self::Pinch),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orbit => "orbit",
            Self::Pinch => "pinch",
        }
    }
}

/// Internal state for the gesture state machine.
///
/// Each active variant carries the context needed to compute the next delta.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next touch-start.
    #[default]
    Idle,
    /// One finger is orbiting the model.
    Orbiting {
        /// The previous sample, used to compute the horizontal delta.
        last: TouchSample,
    },
    /// Two fingers are pinching.
    Pinching {
        /// Finger distance at the previous sample; each move is scaled relative to it.
        reference_distance: f64,
    },
}

impl GestureState {
    /// The gesture this state tracks, or `None` when idle.
    #[must_use]
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Self::Idle => None,
            Self::Orbiting { .. } => Some(GestureKind::Orbit),
            Self::Pinching { .. } => Some(GestureKind::Pinch),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short label for the host UI: `idle`, `orbit` or `pinch`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.kind().map_or("idle", GestureKind::as_str)
    }
}
