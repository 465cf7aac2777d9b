use crate::config::OrbitConfig;
use crate::consts::{DEFAULT_DISTANCE, MIN_FINGER_DISTANCE_PX, ROTATE_RADIANS_PER_PX, clamp_range};
use crate::input::{GestureKind, GestureState, TouchInput, TouchPhase, TouchSample};
use crate::target::ModelTarget;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from touch handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The host should suppress the browser's default scroll/pan for this event.
    PreventDefault,
    /// An orbit or pinch was recognized; the host shows its indicator.
    GestureStarted(GestureKind),
    /// The active gesture finished.
    GestureEnded,
    /// The target's yaw was set to this absolute value (radians).
    RotationChanged { yaw: f64 },
    /// The target's uniform scale was set to this value.
    ScaleChanged { scale: f64 },
    /// The clamped camera distance changed.
    DistanceChanged { distance: f64 },
}

/// Gesture state machine over a bound [`ModelTarget`].
///
/// Holds everything that doesn't depend on the DOM, so it can be tested
/// without WASM/browser dependencies. Accumulated yaw and distance survive
/// disabling and target rebinding; only an end/cancel event returns the
/// machine to [`GestureState::Idle`].
pub struct EngineCore<T> {
    config: OrbitConfig,
    input: GestureState,
    target: Option<T>,
    enabled: bool,
    yaw: f64,
    distance: f64,
    touch_points: Vec<TouchSample>,
}

impl<T: ModelTarget> EngineCore<T> {
    #[must_use]
    pub fn new(config: OrbitConfig) -> Self {
        let enabled = config.enabled;
        Self {
            config,
            input: GestureState::Idle,
            target: None,
            enabled,
            yaw: 0.0,
            distance: DEFAULT_DISTANCE,
            touch_points: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_target(config: OrbitConfig, target: T) -> Self {
        let mut core = Self::new(config);
        core.target = Some(target);
        core
    }

    // --- Touch inputs ---

    /// Dispatch a boundary event to the matching handler.
    pub fn handle(&mut self, input: &TouchInput) -> Vec<Action> {
        match input.phase {
            TouchPhase::Start => self.on_touch_start(&input.touches),
            TouchPhase::Move => self.on_touch_move(&input.touches),
            TouchPhase::End => self.on_touch_end(),
            TouchPhase::Cancel => self.on_touch_cancel(),
        }
    }

    /// One or more fingers went down. `touches` holds every active touch.
    pub fn on_touch_start(&mut self, touches: &[TouchSample]) -> Vec<Action> {
        if !self.accepts_gestures() {
            return Vec::new();
        }
        self.touch_points = touches.to_vec();

        let mut actions = Vec::new();
        match touches {
            [only] => {
                self.input = GestureState::Orbiting { last: *only };
                actions.push(Action::GestureStarted(GestureKind::Orbit));
            }
            [a, b] => {
                self.input = GestureState::Pinching { reference_distance: a.distance_to(b) };
                actions.push(Action::GestureStarted(GestureKind::Pinch));
            }
            _ => {}
        }
        actions.push(Action::PreventDefault);
        actions
    }

    /// Fingers moved. Touch counts that don't match the active gesture are
    /// ignored for this event without leaving the gesture.
    pub fn on_touch_move(&mut self, touches: &[TouchSample]) -> Vec<Action> {
        if self.input.is_idle() || !self.accepts_gestures() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        match (self.input, touches) {
            (GestureState::Orbiting { last }, [current]) => {
                self.orbit(last, *current, &mut actions);
            }
            (GestureState::Pinching { reference_distance }, [a, b]) => {
                self.touch_points = vec![*a, *b];
                self.pinch(reference_distance, a.distance_to(b), &mut actions);
            }
            _ => {}
        }
        actions.push(Action::PreventDefault);
        actions
    }

    /// Every finger lifted. Always succeeds, whatever the gates say.
    pub fn on_touch_end(&mut self) -> Vec<Action> {
        let was_active = !self.input.is_idle();
        self.input = GestureState::Idle;
        self.touch_points.clear();
        if was_active { vec![Action::GestureEnded] } else { Vec::new() }
    }

    /// The browser aborted the touch sequence. Same reset as [`Self::on_touch_end`].
    pub fn on_touch_cancel(&mut self) -> Vec<Action> {
        self.on_touch_end()
    }

    // --- Gesture math ---

    fn orbit(&mut self, last: TouchSample, current: TouchSample, actions: &mut Vec<Action>) {
        let delta_x = current.x - last.x;
        self.yaw += delta_x * self.config.rotate_speed * ROTATE_RADIANS_PER_PX;
        if let Some(target) = self.target.as_mut() {
            target.set_rotation_y(self.yaw);
        }
        self.input = GestureState::Orbiting { last: current };
        self.touch_points = vec![current];
        actions.push(Action::RotationChanged { yaw: self.yaw });
    }

    fn pinch(&mut self, reference_distance: f64, new_distance: f64, actions: &mut Vec<Action>) {
        // Each move is relative to the previous sample, not the pinch start.
        self.input = GestureState::Pinching { reference_distance: new_distance };
        if reference_distance <= MIN_FINGER_DISTANCE_PX {
            return;
        }
        let factor = new_distance / reference_distance;

        self.distance = clamp_range(self.distance / factor, self.config.min_distance, self.config.max_distance);
        actions.push(Action::DistanceChanged { distance: self.distance });

        if let Some(target) = self.target.as_mut() {
            let scale = clamp_range(target.scale() * factor, self.config.min_scale, self.config.max_scale);
            target.set_uniform_scale(scale);
            actions.push(Action::ScaleChanged { scale });
        }
    }

    fn accepts_gestures(&self) -> bool {
        self.enabled && self.target.as_ref().is_some_and(T::is_visible)
    }

    // --- Control ---

    /// Turn gesture processing on or off. Accumulated yaw, scale and
    /// distance are kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Point the engine at a different object, returning the previous one.
    /// Accumulated yaw and distance carry over to the new target.
    pub fn bind_target(&mut self, target: T) -> Option<T> {
        self.target.replace(target)
    }

    pub fn unbind_target(&mut self) -> Option<T> {
        self.target.take()
    }

    // --- Queries ---

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.input
    }

    /// Accumulated rotation about the vertical axis, in radians.
    #[must_use]
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Clamped camera distance driven by pinching.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The bound target's current uniform scale.
    #[must_use]
    pub fn scale(&self) -> Option<f64> {
        self.target.as_ref().map(T::scale)
    }

    #[must_use]
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Touches recorded by the last handled start/move.
    #[must_use]
    pub fn touch_points(&self) -> &[TouchSample] {
        &self.touch_points
    }

    #[must_use]
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }
}
