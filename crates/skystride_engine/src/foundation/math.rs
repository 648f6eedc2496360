//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene runtime and the
//! character controller.

pub use nalgebra::{
    Vector2, Vector3,
    Matrix3, Matrix4,
    Rotation3,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Rotation matrix type
pub type Rot3 = Rotation3<f32>;

/// World up axis (Y-up, right-handed)
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Rot3, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Build a rotation from authored Euler angles in degrees.
    ///
    /// `degrees` is `(pitch, yaw, roll)`: rotations about X, Y and Z. The
    /// composite is `Ry * Rx * Rz`, so roll is applied first and yaw last.
    pub fn euler_rotation(degrees: Vec3) -> Rot3 {
        let yaw = Rot3::from_axis_angle(&Vec3::y_axis(), deg_to_rad(degrees.y));
        let pitch = Rot3::from_axis_angle(&Vec3::x_axis(), deg_to_rad(degrees.x));
        let roll = Rot3::from_axis_angle(&Vec3::z_axis(), deg_to_rad(degrees.z));
        yaw * pitch * roll
    }

    /// World-aligned half extents of an oriented box.
    ///
    /// For each world axis `a`: `extent[a] = sum_k |R[a][k]| * local_half[k]`.
    pub fn oriented_half_extents(rotation: &Rot3, local_half: Vec3) -> Vec3 {
        rotation.matrix().abs() * local_half
    }

    /// Remove the vertical component of `v` and renormalize it.
    ///
    /// Returns zero when nothing horizontal is left.
    pub fn flatten_horizontal(v: Vec3) -> Vec3 {
        Vec3::new(v.x, 0.0, v.z)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_euler_is_identity() {
        let rotation = utils::euler_rotation(Vec3::zeros());
        assert_relative_eq!(*rotation.matrix(), Mat3::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_yaw_quarter_turn_swaps_horizontal_extents() {
        let rotation = utils::euler_rotation(Vec3::new(0.0, 90.0, 0.0));
        let extents = utils::oriented_half_extents(&rotation, Vec3::new(10.0, 0.5, 1.0));
        assert_relative_eq!(extents, Vec3::new(1.0, 0.5, 10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_flatten_horizontal_drops_pitch() {
        let flattened = utils::flatten_horizontal(Vec3::new(0.0, 0.9, -0.1));
        assert_relative_eq!(flattened, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        let straight_up = utils::flatten_horizontal(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(straight_up, Vec3::zeros());
    }
}
