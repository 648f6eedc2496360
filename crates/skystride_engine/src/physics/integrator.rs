//! Velocity integrator for the first-person body
//!
//! Turns held movement keys into damped horizontal motion, applies gravity
//! and jumping, and moves the body to its tentative position for the frame.
//! The collision resolver corrects that position afterwards.

use crate::core::MovementConfig;
use crate::foundation::math::{utils, Vec3};
use crate::input::{InputState, MovementKeys};
use super::body::CameraBody;

/// Horizontal camera basis used to interpret movement keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveBasis {
    /// Camera forward direction
    pub forward: Vec3,
    /// Camera right direction
    pub right: Vec3,
}

impl MoveBasis {
    /// Create a basis from camera vectors; pitch is ignored
    pub fn new(forward: Vec3, right: Vec3) -> Self {
        Self { forward, right }
    }

    /// Unit direction for the held keys, zero when nothing (or opposing keys) is held
    pub fn wish_direction(&self, keys: MovementKeys) -> Vec3 {
        let forward = utils::flatten_horizontal(self.forward);
        let right = utils::flatten_horizontal(self.right);

        let mut wish = Vec3::zeros();
        if keys.contains(MovementKeys::FORWARD) { wish += forward; }
        if keys.contains(MovementKeys::BACK) { wish -= forward; }
        if keys.contains(MovementKeys::RIGHT) { wish += right; }
        if keys.contains(MovementKeys::LEFT) { wish -= right; }

        wish.try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
    }
}

/// Blend `current` toward `target` with framerate-independent exponential damping
pub fn damp_toward(current: Vec3, target: Vec3, damping: f32, dt: f32) -> Vec3 {
    let t = 1.0 - (-damping * dt).exp();
    current + (target - current) * t
}

/// Per-frame velocity integration
#[derive(Debug, Clone)]
pub struct VelocityIntegrator {
    config: MovementConfig,
}

impl VelocityIntegrator {
    /// Create an integrator
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Integrator settings
    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    /// Advance the body by one frame.
    ///
    /// Returns the displacement applied. A non-positive `dt` changes nothing.
    pub fn integrate(
        &self,
        body: &mut CameraBody,
        basis: &MoveBasis,
        input: &InputState,
        dt: f32,
    ) -> Vec3 {
        if dt <= 0.0 {
            return Vec3::zeros();
        }

        let target = basis.wish_direction(input.current.keys) * self.config.move_speed;
        let current = Vec3::new(body.horizontal_velocity.x, 0.0, body.horizontal_velocity.z);
        body.horizontal_velocity = damp_toward(current, target, self.config.damping, dt);

        if input.just_pressed(MovementKeys::JUMP) && body.is_grounded() {
            body.vertical_velocity = self.config.jump_speed;
            body.set_grounded(false);
            log::trace!("Jump from feet height {:.3}", body.feet_y());
        }

        body.vertical_velocity += self.config.gravity * dt;

        let displacement = body.velocity() * dt;
        body.translate(displacement);

        // Flat ground fallback for scenes without colliders underfoot
        if body.feet_y() <= self.config.ground_y {
            body.set_feet_y(self.config.ground_y);
            if body.vertical_velocity < 0.0 {
                body.vertical_velocity = 0.0;
            }
            body.set_grounded(true);
        } else {
            body.set_grounded(false);
        }

        displacement
    }
}

impl Default for VelocityIntegrator {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}
