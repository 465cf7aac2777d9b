#[cfg(test)]
#[path = "target_test.rs"]
mod target_test;

/// The 3D object the gesture engine mutates.
///
/// The rendering framework owns the real object; the engine only reads its
/// visibility and current scale, and writes an absolute yaw and a uniform
/// scale.
pub trait ModelTarget {
    /// Gestures are ignored while this is `false`.
    fn is_visible(&self) -> bool;

    /// Current uniform scale, read from the x axis.
    fn scale(&self) -> f64;

    /// Set rotation about the vertical axis, in radians (absolute, not additive).
    fn set_rotation_y(&mut self, radians: f64);

    /// Set the same scale on all three axes.
    fn set_uniform_scale(&mut self, scale: f64);
}

/// Plain in-memory transform, for hosts that mirror the scene themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// Euler rotation in radians (x, y, z).
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub visible: bool,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self { rotation: [0.0; 3], scale: [1.0; 3], visible: true }
    }
}

impl SceneObject {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self { scale: [scale; 3], ..Self::default() }
    }

    #[must_use]
    pub fn hidden() -> Self {
        Self { visible: false, ..Self::default() }
    }
}

impl ModelTarget for SceneObject {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn scale(&self) -> f64 {
        self.scale[0]
    }

    fn set_rotation_y(&mut self, radians: f64) {
        self.rotation[1] = radians;
    }

    fn set_uniform_scale(&mut self, scale: f64) {
        self.scale = [scale; 3];
    }
}
