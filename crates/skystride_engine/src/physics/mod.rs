//! Character-controller physics
//!
//! Kinematic collision for a first-person camera against static world boxes:
//! bounding volumes, collider derivation from placed geometry, the camera
//! body, the velocity integrator and the two-pass collision resolver.

pub mod body;
pub mod bounds;
pub mod collider;
pub mod integrator;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use body::CameraBody;
pub use bounds::Aabb;
pub use collider::{derive_bounds, Collidable, StaticCollider};
pub use integrator::{MoveBasis, VelocityIntegrator};
pub use resolver::{CollisionResolver, FrameHistory, PushAxis, ResolveReport};
