//! # Unified Configuration System
//!
//! All tunables of the runtime live here, grouped by the subsystem that
//! consumes them. Every section has sensible defaults so a config file only
//! needs to name the values it changes.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging, frame timing, run length
//! - **Movement Config**: velocity integrator tuning
//! - **Collision Config**: body box and resolver tolerances
//! - **Camera Config**: look control and projection

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

pub use crate::config::{Config, ConfigError};

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

/// # Engine Configuration
///
/// Frame loop behavior and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default log level filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Fixed frame step in seconds; `None` uses the wall clock
    pub fixed_timestep: Option<f32>,
    /// Stop after this many frames; `None` runs until exit is requested
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: None,
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Use a fixed timestep instead of the wall clock
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = Some(step);
        self
    }

    /// Limit the number of frames the loop runs
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(step) = self.fixed_timestep {
            if step <= 0.0 || !step.is_finite() {
                return Err(invalid(format!("fixed_timestep must be positive, got {step}")));
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Movement Configuration
///
/// Tuning for the velocity integrator. Units are meters and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal move speed
    pub move_speed: f32,
    /// Vertical velocity set by a jump
    pub jump_speed: f32,
    /// Gravity acceleration (negative is down)
    pub gravity: f32,
    /// Height of the flat fallback ground plane
    pub ground_y: f32,
    /// Exponential damping rate for horizontal velocity
    pub damping: f32,
    /// Offset from feet to eye
    pub eye_height: f32,
}

impl MovementConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.move_speed <= 0.0 {
            return Err(invalid("move_speed must be positive"));
        }
        if self.jump_speed < 0.0 {
            return Err(invalid("jump_speed cannot be negative"));
        }
        if self.gravity >= 0.0 {
            return Err(invalid(format!("gravity must be negative, got {}", self.gravity)));
        }
        if self.damping < 0.0 {
            return Err(invalid("damping cannot be negative"));
        }
        if self.eye_height <= 0.0 {
            return Err(invalid("eye_height must be positive"));
        }
        Ok(())
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_speed: 6.5,
            gravity: -18.0,
            ground_y: 0.0,
            damping: 8.0,
            eye_height: 1.7,
        }
    }
}

/// # Collision Configuration
///
/// Camera body box and resolver tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Half extents of the camera body box, centered on the eye.
    ///
    /// Read once when the engine builds its camera body; the resolver uses
    /// the extents carried by the body it is given.
    pub body_half_extents: Vec3,
    /// Tallest ledge that counts as a step instead of a wall
    pub max_step_height: f32,
    /// Separation buffer against boundary jitter
    pub epsilon: f32,
    /// Inward shrink of the footprint for support tests
    pub support_padding: f32,
}

impl CollisionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let half = self.body_half_extents;
        if half.x <= 0.0 || half.y <= 0.0 || half.z <= 0.0 {
            return Err(invalid(format!("body_half_extents must be positive, got {half:?}")));
        }
        if self.max_step_height < 0.0 {
            return Err(invalid("max_step_height cannot be negative"));
        }
        if self.epsilon < 0.0 {
            return Err(invalid("epsilon cannot be negative"));
        }
        if self.support_padding < 0.0 {
            return Err(invalid("support_padding cannot be negative"));
        }
        if self.support_padding >= half.x || self.support_padding >= half.z {
            return Err(invalid("support_padding must be smaller than the body footprint"));
        }
        Ok(())
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            body_half_extents: Vec3::new(0.4, 0.9, 0.4),
            max_step_height: 0.35,
            epsilon: 0.001,
            support_padding: 0.05,
        }
    }
}

/// # Camera Configuration
///
/// First-person look control and projection parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Degrees of rotation per unit of mouse movement
    pub sensitivity: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Starting yaw in degrees (-90 looks down -Z)
    pub initial_yaw: f32,
    /// Starting pitch in degrees
    pub initial_pitch: f32,
}

impl CameraConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fov_degrees <= 0.0 || self.fov_degrees >= 180.0 {
            return Err(invalid("fov_degrees must be within (0, 180)"));
        }
        if self.aspect <= 0.0 {
            return Err(invalid("aspect must be positive"));
        }
        if self.near <= 0.0 || self.near >= self.far {
            return Err(invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            sensitivity: 0.2,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 1000.0,
            initial_yaw: -90.0,
            initial_pitch: 0.0,
        }
    }
}

/// # Complete Runtime Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Frame loop configuration
    pub engine: EngineConfig,
    /// Velocity integrator configuration
    pub movement: MovementConfig,
    /// Collision resolver configuration
    pub collision: CollisionConfig,
    /// Camera configuration
    pub camera: CameraConfig,
}

impl RuntimeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.movement.validate()?;
        self.collision.validate()?;
        self.camera.validate()?;
        Ok(())
    }
}

impl Config for RuntimeConfig {}
