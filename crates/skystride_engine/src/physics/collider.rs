//! Collidable capability and collider derivation
//!
//! Scene geometry is converted to one world-space [`Aabb`] when it is added
//! to a scene. Rotated panels and props are covered with the standard
//! oriented-box to AABB conversion, so a tilted ramp still gets a collider
//! that encloses it.

use crate::foundation::math::{utils, Vec3};
use crate::scene::Geometry;
use super::bounds::Aabb;

/// Thickness given to panels authored with no height
pub const PANEL_MIN_THICKNESS: f32 = 0.05;

/// Vertical thickness of a terrain collider
pub const TERRAIN_THICKNESS: f32 = 0.2;

/// Anything the camera body can collide with
pub trait Collidable {
    /// Whether this collider currently participates in collision
    fn is_active(&self) -> bool;

    /// World-space bounds
    fn bounds(&self) -> Aabb;
}

/// Bare boxes are always-active colliders
impl Collidable for Aabb {
    fn is_active(&self) -> bool {
        true
    }

    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Collider derived once from static scene geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    bounds: Aabb,
    active: bool,
}

impl StaticCollider {
    /// Create an active collider
    pub fn new(bounds: Aabb) -> Self {
        Self { bounds, active: true }
    }

    /// Derive a collider from geometry; `None` for zero-volume results
    pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
        derive_bounds(geometry).map(Self::new)
    }

    /// Enable or disable collision
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Collidable for StaticCollider {
    fn is_active(&self) -> bool {
        self.active
    }

    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

/// World half extents for local half extents under an authored rotation.
///
/// Identity rotations take the cheap path and return `local_half` as is.
pub fn world_half_extents(local_half: Vec3, rotation_deg: Vec3) -> Vec3 {
    if rotation_deg == Vec3::zeros() {
        return local_half;
    }
    let rotation = utils::euler_rotation(rotation_deg);
    utils::oriented_half_extents(&rotation, local_half)
}

/// Derive the world-space bounding box for a piece of placed geometry.
///
/// Returns `None` when the result would enclose no volume; such geometry is
/// rendered but never collides.
pub fn derive_bounds(geometry: &Geometry) -> Option<Aabb> {
    let (center, half) = match geometry {
        Geometry::Panel { center, size, rotation_deg } => {
            let thickness = if size.y <= 0.0 { PANEL_MIN_THICKNESS } else { size.y };
            let local_half = Vec3::new(size.x, thickness, size.z) * 0.5;
            (*center, world_half_extents(local_half, *rotation_deg))
        }
        Geometry::Block { center, size } => (*center, size.abs() * 0.5),
        Geometry::Terrain { anchor, tiles, tile_size } => {
            #[allow(clippy::cast_precision_loss)]
            let half_span = *tiles as f32 * tile_size;
            (*anchor, Vec3::new(half_span, TERRAIN_THICKNESS * 0.5, half_span))
        }
        Geometry::Prop { position, scale, rotation_deg, mesh } => {
            if *scale <= 0.0 {
                return None;
            }
            let local_half = mesh.size() * (scale * 0.5);
            (*position, world_half_extents(local_half, *rotation_deg))
        }
    };

    let bounds = Aabb::from_center_half_extents(center, half);
    (!bounds.is_degenerate()).then_some(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MeshBounds;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_panel_gets_minimum_thickness() {
        let floor = Geometry::Panel {
            center: Vec3::new(0.0, 0.0, 0.0),
            size: Vec3::new(70.0, 0.0, 70.0),
            rotation_deg: Vec3::zeros(),
        };
        let bounds = derive_bounds(&floor).unwrap();
        assert_relative_eq!(bounds.half_extents(), Vec3::new(35.0, 0.025, 35.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.top(), 0.025, epsilon = 1e-6);
    }

    #[test]
    fn test_yawed_panel_swaps_horizontal_extents() {
        let wall = Geometry::Panel {
            center: Vec3::new(4.0, 1.0, -2.0),
            size: Vec3::new(20.0, 1.0, 2.0),
            rotation_deg: Vec3::new(0.0, 90.0, 0.0),
        };
        let bounds = derive_bounds(&wall).unwrap();
        assert_relative_eq!(bounds.half_extents(), Vec3::new(1.0, 0.5, 10.0), epsilon = 1e-5);
        assert_relative_eq!(bounds.center(), Vec3::new(4.0, 1.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_tilted_ramp_covers_its_rise() {
        // 10 long, 0.2 thick, pitched 30 degrees
        let ramp = Geometry::Panel {
            center: Vec3::zeros(),
            size: Vec3::new(2.0, 0.2, 10.0),
            rotation_deg: Vec3::new(30.0, 0.0, 0.0),
        };
        let half = derive_bounds(&ramp).unwrap().half_extents();
        let (sin, cos) = 30.0f32.to_radians().sin_cos();
        assert_relative_eq!(half.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(half.y, cos * 0.1 + sin * 5.0, epsilon = 1e-5);
        assert_relative_eq!(half.z, sin * 0.1 + cos * 5.0, epsilon = 1e-5);
    }

    #[test]
    fn test_block_and_cube() {
        let cube = Geometry::cube(Vec3::new(0.0, 0.5, 0.0), 1.0);
        let bounds = derive_bounds(&cube).unwrap();
        assert_eq!(bounds.min, Vec3::new(-0.5, 0.0, -0.5));
        assert_eq!(bounds.max, Vec3::new(0.5, 1.0, 0.5));
    }

    #[test]
    fn test_terrain_spans_full_footprint() {
        let terrain = Geometry::Terrain { anchor: Vec3::zeros(), tiles: 20, tile_size: 2.0 };
        let bounds = derive_bounds(&terrain).unwrap();
        assert_relative_eq!(bounds.min, Vec3::new(-40.0, -0.1, -40.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Vec3::new(40.0, 0.1, 40.0), epsilon = 1e-6);
    }

    #[test]
    fn test_prop_scales_mesh_bounds() {
        let mesh = MeshBounds::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 3.0, 2.0));
        let prop = Geometry::Prop {
            position: Vec3::new(5.0, 0.7, 0.0),
            scale: 0.5,
            rotation_deg: Vec3::zeros(),
            mesh,
        };
        let bounds = derive_bounds(&prop).unwrap();
        assert_relative_eq!(bounds.half_extents(), Vec3::new(0.5, 0.75, 1.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.center(), Vec3::new(5.0, 0.7, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_geometry_has_no_collider() {
        let flat_mesh = MeshBounds::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 1.0));
        let prop = Geometry::Prop {
            position: Vec3::zeros(),
            scale: 1.0,
            rotation_deg: Vec3::zeros(),
            mesh: flat_mesh,
        };
        assert!(derive_bounds(&prop).is_none());

        let unscaled = Geometry::Prop {
            position: Vec3::zeros(),
            scale: 0.0,
            rotation_deg: Vec3::zeros(),
            mesh: MeshBounds::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)),
        };
        assert!(StaticCollider::from_geometry(&unscaled).is_none());

        let empty_terrain = Geometry::Terrain { anchor: Vec3::zeros(), tiles: 0, tile_size: 1.0 };
        assert!(derive_bounds(&empty_terrain).is_none());
    }

    #[test]
    fn test_static_collider_toggles() {
        let mut collider = StaticCollider::new(Aabb::from_min_max(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)));
        assert!(collider.is_active());
        collider.set_active(false);
        assert!(!collider.is_active());
    }
}
