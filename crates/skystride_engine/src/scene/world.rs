//! Scene: the object arena, its collidable registry and the resolver

use slotmap::SlotMap;
use thiserror::Error;

use crate::core::CollisionConfig;
use crate::physics::{CameraBody, Collidable, CollisionResolver, ResolveReport};
use super::entity::{EntityKey, SceneObject};
use super::geometry::Geometry;
use super::registry::CollidableRegistry;

/// Scene errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live object
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(EntityKey),

    /// The collision settings failed validation
    #[error("Invalid collision configuration: {0}")]
    InvalidConfig(String),
}

/// Owns every object in the world and resolves the camera against them
#[derive(Debug, Clone)]
pub struct Scene {
    objects: SlotMap<EntityKey, SceneObject>,
    registry: CollidableRegistry,
    resolver: CollisionResolver,
}

impl Scene {
    /// Create an empty scene after validating its collision settings
    pub fn new(config: CollisionConfig) -> Result<Self, SceneError> {
        config
            .validate()
            .map_err(|e| SceneError::InvalidConfig(e.to_string()))?;
        Ok(Self::with_checked_config(config))
    }

    fn with_checked_config(config: CollisionConfig) -> Self {
        Self {
            objects: SlotMap::with_key(),
            registry: CollidableRegistry::new(),
            resolver: CollisionResolver::new(config),
        }
    }

    /// Add an object and register its collider.
    ///
    /// Geometry whose collider has no volume is still added, but never collides.
    pub fn add_object(&mut self, name: impl Into<String>, geometry: Geometry) -> EntityKey {
        let object = SceneObject::solid(name, geometry);
        let name = object.name.clone();
        let bounds = object.collider().map(Collidable::bounds);
        let key = self.objects.insert(object);

        match bounds {
            Some(bounds) => {
                self.registry.register(key);
                log::debug!(
                    "Registered collider for {} '{}': min {:?} max {:?}",
                    geometry.kind(), name, bounds.min, bounds.max
                );
            }
            None => log::debug!("Skipped degenerate collider for {} '{}'", geometry.kind(), name),
        }
        key
    }

    /// Add an object that is rendered but never collides
    pub fn add_decoration(&mut self, name: impl Into<String>, geometry: Geometry) -> EntityKey {
        self.objects.insert(SceneObject::decoration(name, geometry))
    }

    /// Enable or disable an object's collider
    pub fn set_active(&mut self, key: EntityKey, active: bool) -> Result<(), SceneError> {
        let object = self.objects.get_mut(key).ok_or(SceneError::UnknownEntity(key))?;
        if let Some(collider) = object.collider_mut() {
            collider.set_active(active);
        }
        Ok(())
    }

    /// Move or reshape an object; its collider is derived again.
    ///
    /// A registered object keeps its place in the registry even while its
    /// geometry is degenerate, so push-out order never changes.
    pub fn replace_geometry(&mut self, key: EntityKey, geometry: Geometry) -> Result<(), SceneError> {
        let object = self.objects.get_mut(key).ok_or(SceneError::UnknownEntity(key))?;
        object.replace_geometry(geometry);
        if object.is_solid() && object.collider().is_some() {
            self.registry.register(key);
        }
        Ok(())
    }

    /// Look up an object
    pub fn get(&self, key: EntityKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// Number of objects, collidable or not
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of objects that currently collide
    pub fn collidable_count(&self) -> usize {
        self.collidables().count()
    }

    /// Registered colliders in registration order
    pub fn collidables(&self) -> impl Iterator<Item = &dyn Collidable> + Clone + '_ {
        self.registry.iter(&self.objects)
    }

    /// Objects in the scene
    pub fn objects(&self) -> impl Iterator<Item = (EntityKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Prepare for the camera entering the scene
    pub fn enter(&mut self) {
        self.resolver.reset();
        log::info!(
            "Entered scene with {} objects ({} collidable)",
            self.object_count(), self.collidable_count()
        );
    }

    /// Resolve the camera against the scene for one frame.
    ///
    /// Returns `None` without touching the body when `dt` is not positive.
    pub fn update(&mut self, body: &mut CameraBody, dt: f32) -> Option<ResolveReport> {
        if dt <= 0.0 {
            return None;
        }
        Some(self.resolver.resolve(body, self.registry.iter(&self.objects)))
    }

    /// Remove every object and collider
    pub fn teardown(&mut self) {
        log::info!("Tearing down scene ({} objects)", self.objects.len());
        self.registry.clear();
        self.objects.clear();
        self.resolver.reset();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_checked_config(CollisionConfig::default())
    }
}
