//! # Core Module
//!
//! Shared configuration for every subsystem of the runtime.

pub mod config;

pub use config::{
    RuntimeConfig,
    EngineConfig,
    MovementConfig,
    CollisionConfig,
    CameraConfig,
    Config,
    ConfigError,
};
