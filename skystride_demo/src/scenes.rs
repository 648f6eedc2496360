//! Demo scenes

use rand::{rngs::StdRng, Rng, SeedableRng};
use skystride_engine::prelude::*;
use skystride_engine::scene::SceneError;

/// Seed for the scattered crates, so every run walks the same course
const CRATE_SEED: u64 = 0x5EED_CAFE;

/// Axis-aligned unit box centered on the origin, as a vertex hull
fn unit_box_hull() -> Vec<Vec3> {
    let mut corners = Vec::with_capacity(8);
    for &x in &[-0.5, 0.5] {
        for &y in &[-0.5, 0.5] {
            for &z in &[-0.5, 0.5] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    corners
}

/// Hull of a squat, long model standing in for the frog
fn frog_hull() -> Vec<Vec3> {
    unit_box_hull()
        .into_iter()
        .map(|v| v.component_mul(&Vec3::new(2.0, 1.2, 2.4)))
        .collect()
}

/// Terrain, a cube, two props, a ramp and a ring of scattered crates
pub fn template_scene(collision: CollisionConfig) -> Result<Scene, SceneError> {
    let mut scene = Scene::new(collision)?;

    scene.add_decoration("grid", Geometry::Panel {
        center: Vec3::new(0.0, 0.01, 0.0),
        size: Vec3::new(40.0, 0.0, 40.0),
        rotation_deg: Vec3::zeros(),
    });
    scene.add_object("terrain", Geometry::Terrain {
        anchor: Vec3::new(0.0, -0.1, 0.0),
        tiles: 20,
        tile_size: 2.0,
    });
    scene.add_object("cube", Geometry::cube(Vec3::new(0.0, 0.5, -6.0), 1.0));

    if let Some(mesh) = MeshBounds::from_vertices(&frog_hull()) {
        scene.add_object("frog", Geometry::Prop {
            position: Vec3::new(5.0, 0.7, 0.0),
            scale: 0.4,
            rotation_deg: Vec3::new(-90.0, 0.0, -150.0),
            mesh,
        });
    }
    if let Some(mesh) = MeshBounds::from_vertices(&unit_box_hull()) {
        scene.add_object("crate", Geometry::Prop {
            position: Vec3::new(-5.0, 0.7, 0.0),
            scale: 3.0,
            rotation_deg: Vec3::new(-90.0, 0.0, -150.0),
            mesh,
        });
    }

    scene.add_object("ramp", Geometry::Panel {
        center: Vec3::new(0.0, 0.6, -12.0),
        size: Vec3::new(3.0, 0.2, 6.0),
        rotation_deg: Vec3::new(12.0, 0.0, 0.0),
    });
    scene.add_object("back wall", Geometry::Panel {
        center: Vec3::new(0.0, 1.5, -18.0),
        size: Vec3::new(20.0, 3.0, 0.5),
        rotation_deg: Vec3::zeros(),
    });
    scene.add_object("side wall", Geometry::Panel {
        center: Vec3::new(10.0, 1.5, -8.0),
        size: Vec3::new(20.0, 3.0, 0.5),
        rotation_deg: Vec3::new(0.0, 90.0, 0.0),
    });

    let mut rng = StdRng::seed_from_u64(CRATE_SEED);
    for i in 0..8 {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let radius = rng.gen_range(8.0..14.0);
        let edge = rng.gen_range(0.3..1.2);
        let center = Vec3::new(angle.cos() * radius, edge * 0.5, angle.sin() * radius);
        scene.add_object(format!("crate {i}"), Geometry::cube(center, edge));
    }

    Ok(scene)
}

/// A wide snowy platform
pub fn arctic_scene(collision: CollisionConfig) -> Result<Scene, SceneError> {
    let mut scene = Scene::new(collision)?;
    scene.add_object("platform", Geometry::Panel {
        center: Vec3::zeros(),
        size: Vec3::new(70.0, 0.0, 70.0),
        rotation_deg: Vec3::zeros(),
    });
    Ok(scene)
}
