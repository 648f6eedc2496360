//! # Skystride Engine
//!
//! A first-person 3D scene runtime built around a kinematic character
//! controller.
//!
//! ## Features
//!
//! - **Collider Derivation**: One world-space AABB per placed object, rotation aware
//! - **Velocity Integration**: Damped walking, gravity and edge-triggered jumping
//! - **Collision Resolution**: Support and landing, then minimal horizontal push-out
//! - **Scene Arena**: Single-owner object storage with a collidable registry
//! - **Frame Loop**: Input, look, physics and render hand-off in a fixed order
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skystride_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let mut scene = Scene::default();
//!         scene.add_object("crate", Geometry::cube(Vec3::new(0.0, 0.5, -4.0), 1.0));
//!         engine.enter_scene(scene, Vec3::zeros());
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RuntimeConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;

mod application;
mod engine;

pub use application::{Application, AppError, AppEvent};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        Engine, EngineError,
        core::{RuntimeConfig, EngineConfig, MovementConfig, CollisionConfig, CameraConfig, Config},
        foundation::{
            math::{Vec2, Vec3, Mat4},
            time::FrameClock,
        },
        input::{InputManager, KeyCode, MovementKeys},
        physics::{Aabb, CameraBody, Collidable, CollisionResolver, VelocityIntegrator},
        render::{Camera, RenderView},
        scene::{EntityKey, Geometry, MeshBounds, Scene},
    };
}
