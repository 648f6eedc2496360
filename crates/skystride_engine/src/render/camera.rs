//! # First-Person Camera
//!
//! Couples the kinematic [`CameraBody`] with yaw/pitch look control and
//! produces the matrices the renderer consumes.
//!
//! ## Orientation
//! Angles are kept in degrees. Yaw turns about the world Y axis and pitch
//! tilts toward it, clamped to ±89° so the view never flips over the pole:
//!
//! ```text
//! front = (cos yaw · cos pitch, sin pitch, sin yaw · cos pitch)
//! right = normalize(front × Y)
//! up    = normalize(right × front)
//! ```
//!
//! A yaw of −90° looks down −Z, the usual right-handed starting view.

use crate::core::CameraConfig;
use crate::foundation::math::{utils, Mat4, Point3, Vec2, Vec3, WORLD_UP};
use crate::physics::{CameraBody, MoveBasis};

/// Pitch limit in degrees
pub const PITCH_LIMIT: f32 = 89.0;

/// Read-only per-frame hand-off to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Corrected eye position
    pub eye: Vec3,
    /// View direction
    pub front: Vec3,
    /// Camera up vector
    pub up: Vec3,
    /// World-to-view transform
    pub view: Mat4,
    /// Perspective projection
    pub projection: Mat4,
}

/// First-person camera
#[derive(Debug, Clone)]
pub struct Camera {
    body: CameraBody,
    config: CameraConfig,
    yaw: f32,
    pitch: f32,
    front: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera around `body` with the configured initial orientation
    pub fn new(body: CameraBody, config: CameraConfig) -> Self {
        let mut camera = Self {
            body,
            yaw: config.initial_yaw,
            pitch: config.initial_pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            config,
            front: Vec3::new(0.0, 0.0, -1.0),
            right: Vec3::new(1.0, 0.0, 0.0),
            up: WORLD_UP,
        };
        camera.update_vectors();
        camera
    }

    /// Kinematic body
    pub fn body(&self) -> &CameraBody {
        &self.body
    }

    /// Mutable kinematic body, for the integrator and the resolver
    pub fn body_mut(&mut self) -> &mut CameraBody {
        &mut self.body
    }

    /// Eye position
    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// View direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Right vector
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Up vector
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Horizontal movement basis for the velocity integrator
    pub fn move_basis(&self) -> MoveBasis {
        MoveBasis::new(self.front, self.right)
    }

    /// Turn by a mouse delta in pixels.
    ///
    /// Moving right increases yaw; moving down lowers pitch.
    pub fn apply_look(&mut self, mouse_delta: Vec2) {
        if mouse_delta == Vec2::zeros() {
            return;
        }
        self.yaw += mouse_delta.x * self.config.sensitivity;
        self.pitch = (self.pitch - mouse_delta.y * self.config.sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
        log::trace!("Camera look: yaw {:.2} pitch {:.2}", self.yaw, self.pitch);
    }

    /// Set yaw and pitch directly, in degrees
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Update the aspect ratio after a viewport resize
    ///
    /// Only changes larger than 0.01 are logged, to keep resize drags quiet.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.config.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.config.aspect, aspect);
        }
        self.config.aspect = aspect;
    }

    /// Current aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.config.aspect
    }

    /// Right-handed look-at view matrix
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.body.position);
        let target = Point3::from(self.body.position + self.front);
        Mat4::look_at_rh(&eye, &target, &self.up)
    }

    /// Perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(
            self.config.aspect,
            utils::deg_to_rad(self.config.fov_degrees),
            self.config.near,
            self.config.far,
        )
    }

    /// Snapshot of the committed camera state for rendering
    pub fn render_view(&self) -> RenderView {
        RenderView {
            eye: self.body.position,
            front: self.front,
            up: self.up,
            view: self.view_matrix(),
            projection: self.projection_matrix(),
        }
    }

    fn update_vectors(&mut self) {
        let (sin_yaw, cos_yaw) = utils::deg_to_rad(self.yaw).sin_cos();
        let (sin_pitch, cos_pitch) = utils::deg_to_rad(self.pitch).sin_cos();

        let front = Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch);
        self.front = front.try_normalize(f32::EPSILON).unwrap_or(self.front);
        self.right = self.front.cross(&WORLD_UP).try_normalize(f32::EPSILON).unwrap_or(self.right);
        self.up = self.right.cross(&self.front).try_normalize(f32::EPSILON).unwrap_or(WORLD_UP);
    }
}
