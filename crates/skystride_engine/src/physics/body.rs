//! Kinematic camera body
//!
//! The player is a box of fixed half extents centered on the eye position.
//! Feet sit `eye_height` below the eye.

use crate::foundation::math::Vec3;
use super::bounds::Aabb;

/// Kinematic state of the first-person camera
#[derive(Debug, Clone, PartialEq)]
pub struct CameraBody {
    /// Eye position in world space
    pub position: Vec3,

    /// Horizontal velocity (the Y component stays zero)
    pub horizontal_velocity: Vec3,

    /// Vertical velocity, positive is up
    pub vertical_velocity: f32,

    /// Offset from feet to eye
    pub eye_height: f32,

    /// Half extents of the collision box
    pub half_extents: Vec3,

    grounded: bool,
    support_y: Option<f32>,
}

impl CameraBody {
    /// Create a body at rest with its eye at `position`
    pub fn new(position: Vec3, eye_height: f32, half_extents: Vec3) -> Self {
        Self {
            position,
            horizontal_velocity: Vec3::zeros(),
            vertical_velocity: 0.0,
            eye_height,
            half_extents,
            grounded: false,
            support_y: None,
        }
    }

    /// Create a body with its feet at `feet`
    pub fn standing_at(feet: Vec3, eye_height: f32, half_extents: Vec3) -> Self {
        Self::new(feet + Vec3::new(0.0, eye_height, 0.0), eye_height, half_extents)
    }

    /// Put the feet at `feet`, at rest, airborne and with no support
    pub fn place_at(&mut self, feet: Vec3) {
        self.position = feet + Vec3::new(0.0, self.eye_height, 0.0);
        self.horizontal_velocity = Vec3::zeros();
        self.vertical_velocity = 0.0;
        self.grounded = false;
        self.support_y = None;
    }

    /// Height of the feet
    pub fn feet_y(&self) -> f32 {
        self.position.y - self.eye_height
    }

    /// Move vertically so the feet are at `y`
    pub fn set_feet_y(&mut self, y: f32) {
        self.position.y = y + self.eye_height;
    }

    /// World-space collision box
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// Full velocity vector
    pub fn velocity(&self) -> Vec3 {
        Vec3::new(self.horizontal_velocity.x, self.vertical_velocity, self.horizontal_velocity.z)
    }

    /// Shift the body
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Whether the body is standing on something
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Set the grounded flag
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Top of the highest support found this frame
    pub fn support_y(&self) -> Option<f32> {
        self.support_y
    }

    /// Snap the feet onto a surface at `top` and stop falling
    pub fn land_on(&mut self, top: f32) {
        self.set_feet_y(top);
        if self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;
        }
        self.grounded = true;
    }

    /// Commit this frame's support height.
    ///
    /// When the feet are at or below the support (within `epsilon`) the body
    /// is lifted onto it and grounded. Above it, or with no support, the
    /// grounded flag is left as the integrator set it.
    pub fn set_support_top(&mut self, support: Option<f32>, epsilon: f32) {
        self.support_y = support;
        if let Some(top) = support {
            if self.feet_y() <= top + epsilon {
                self.land_on(top);
            }
        }
    }
}
