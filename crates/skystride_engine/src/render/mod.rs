//! # Rendering Hand-off
//!
//! The runtime does not draw anything itself. Once per frame it commits the
//! corrected camera state into a [`RenderView`] that a graphics backend can
//! consume read-only.

pub mod camera;

pub use camera::{Camera, RenderView, PITCH_LIMIT};
