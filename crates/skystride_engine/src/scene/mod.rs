//! Scene runtime
//!
//! A scene owns every placed object in a single arena. Objects added as solid
//! geometry get one collider derived at insertion time and a handle in the
//! collidable registry; the registry is read-only while frames run.
//!
//! ## Frame contract
//!
//! ```text
//! Velocity integrator (tentative position)
//!      ↓
//! Scene::update (support + push-out against the registry)
//!      ↓
//! Render view
//! ```

mod entity;
mod geometry;
mod registry;
mod world;

pub use entity::{EntityKey, SceneObject};
pub use geometry::{Geometry, MeshBounds};
pub use registry::CollidableRegistry;
pub use world::{Scene, SceneError};
