//! Placed geometry descriptors
//!
//! Scene authoring hands the runtime already-placed geometry. Each variant
//! carries just enough to render it and to derive its collider.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Object-space bounds of a loaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshBounds {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl MeshBounds {
    /// Create bounds from two corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a vertex list, `None` when it is empty
    pub fn from_vertices(vertices: &[Vec3]) -> Option<Self> {
        let (first, rest) = vertices.split_first()?;
        let bounds = rest.iter().fold(Self::new(*first, *first), |acc, v| {
            Self::new(acc.min.inf(v), acc.max.sup(v))
        });
        Some(bounds)
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// A piece of world geometry at its final placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Flat platform or wall panel
    Panel {
        /// World-space center
        center: Vec3,
        /// Full size; a non-positive `y` is treated as a thin sheet
        size: Vec3,
        /// Authored `(pitch, yaw, roll)` in degrees
        rotation_deg: Vec3,
    },

    /// Axis-aligned box
    Block {
        /// World-space center
        center: Vec3,
        /// Full size
        size: Vec3,
    },

    /// Checkerboard terrain tiled outward from its anchor
    Terrain {
        /// World-space center of the tiled area
        anchor: Vec3,
        /// Tiles from the anchor to each edge
        tiles: u32,
        /// Edge length of one tile
        tile_size: f32,
    },

    /// Modeled prop, rendered centered on its position
    Prop {
        /// World-space center
        position: Vec3,
        /// Uniform render scale
        scale: f32,
        /// Authored `(pitch, yaw, roll)` in degrees
        rotation_deg: Vec3,
        /// Bounds of the source mesh
        mesh: MeshBounds,
    },
}

impl Geometry {
    /// Axis-aligned cube with edge length `edge`
    pub fn cube(center: Vec3, edge: f32) -> Self {
        Self::Block {
            center,
            size: Vec3::new(edge, edge, edge),
        }
    }

    /// Reference point of the placement
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Panel { center, .. } | Self::Block { center, .. } => *center,
            Self::Terrain { anchor, .. } => *anchor,
            Self::Prop { position, .. } => *position,
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Panel { .. } => "panel",
            Self::Block { .. } => "block",
            Self::Terrain { .. } => "terrain",
            Self::Prop { .. } => "prop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_bounds_from_vertices() {
        let vertices = [
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ];
        let bounds = MeshBounds::from_vertices(&vertices).unwrap();
        assert_eq!(bounds.min, Vec3::new(-3.0, -2.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 0.5));
        assert_eq!(bounds.size(), Vec3::new(4.0, 6.0, 1.5));
    }

    #[test]
    fn test_mesh_bounds_empty() {
        assert!(MeshBounds::from_vertices(&[]).is_none());
    }

    #[test]
    fn test_geometry_position_and_kind() {
        let terrain = Geometry::Terrain { anchor: Vec3::new(1.0, 0.0, 2.0), tiles: 4, tile_size: 1.0 };
        assert_eq!(terrain.position(), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(terrain.kind(), "terrain");
        assert_eq!(Geometry::cube(Vec3::zeros(), 2.0).kind(), "block");
    }
}
