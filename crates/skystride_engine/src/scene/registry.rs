//! Collidable registry
//!
//! Non-owning list of the scene objects that have a collider, in
//! registration order. Filled as objects are added and cleared wholesale on
//! teardown; it is never rebuilt per frame.

use slotmap::SlotMap;

use crate::physics::Collidable;
use super::entity::{EntityKey, SceneObject};

/// Registration-ordered handles to collidable objects
#[derive(Debug, Clone, Default)]
pub struct CollidableRegistry {
    keys: Vec<EntityKey>,
}

impl CollidableRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object; registering the same key twice is ignored
    pub fn register(&mut self, key: EntityKey) {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
    }

    /// Whether `key` is registered
    pub fn contains(&self, key: EntityKey) -> bool {
        self.keys.contains(&key)
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Forget every handle
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Registered handles in order
    pub fn keys(&self) -> &[EntityKey] {
        &self.keys
    }

    /// Resolve the handles against the arena, in registration order.
    ///
    /// Stale handles and objects without a collider are skipped.
    pub fn iter<'a>(
        &'a self,
        objects: &'a SlotMap<EntityKey, SceneObject>,
    ) -> impl Iterator<Item = &'a dyn Collidable> + Clone + 'a {
        self.keys
            .iter()
            .filter_map(move |key| objects.get(*key).and_then(|object| object.collidable()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::Geometry;

    #[test]
    fn test_iter_follows_registration_order() {
        let mut objects = SlotMap::with_key();
        let far = objects.insert(SceneObject::solid("far", Geometry::cube(Vec3::new(10.0, 0.0, 0.0), 1.0)));
        let near = objects.insert(SceneObject::solid("near", Geometry::cube(Vec3::zeros(), 1.0)));

        let mut registry = CollidableRegistry::new();
        registry.register(near);
        registry.register(far);
        registry.register(near);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(far));
        assert_eq!(registry.keys(), &[near, far]);

        let centers: Vec<Vec3> = registry.iter(&objects).map(|c| c.bounds().center()).collect();
        assert_eq!(centers, vec![Vec3::zeros(), Vec3::new(10.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_stale_handles_are_skipped() {
        let mut objects = SlotMap::with_key();
        let key = objects.insert(SceneObject::solid("cube", Geometry::cube(Vec3::zeros(), 1.0)));
        let mut registry = CollidableRegistry::new();
        registry.register(key);

        objects.remove(key);
        assert_eq!(registry.iter(&objects).count(), 0);

        registry.clear();
        assert!(registry.is_empty());
    }
}
