//! Scene objects and their arena handles

use slotmap::new_key_type;

use crate::physics::{Collidable, StaticCollider};
use super::geometry::Geometry;

new_key_type! {
    /// Handle to an object owned by a [`Scene`](super::Scene)
    pub struct EntityKey;
}

/// An object placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Display name
    pub name: String,
    /// Placement
    pub geometry: Geometry,
    solid: bool,
    collider: Option<StaticCollider>,
}

impl SceneObject {
    /// Object with a collider derived from its geometry
    pub fn solid(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            solid: true,
            collider: StaticCollider::from_geometry(&geometry),
        }
    }

    /// Object that is rendered but never collides
    pub fn decoration(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            solid: false,
            collider: None,
        }
    }

    /// Whether the object was added as collidable geometry
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// The object's collider, if it has one
    pub fn collider(&self) -> Option<&StaticCollider> {
        self.collider.as_ref()
    }

    /// The object as a collidable, if it has a collider
    pub fn collidable(&self) -> Option<&dyn Collidable> {
        self.collider.as_ref().map(|c| c as &dyn Collidable)
    }

    pub(crate) fn collider_mut(&mut self) -> Option<&mut StaticCollider> {
        self.collider.as_mut()
    }

    /// Swap in new geometry, deriving a fresh collider for solid objects.
    ///
    /// The new collider keeps the old active flag.
    pub(crate) fn replace_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        if !self.solid {
            return;
        }
        let active = self.collider.map_or(true, |c| c.is_active());
        self.collider = StaticCollider::from_geometry(&geometry).map(|mut collider| {
            collider.set_active(active);
            collider
        });
    }
}
