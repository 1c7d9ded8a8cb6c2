//! Instance pose and color types shared by the loader and its callers

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math;

/// Per-instance pose of a loaded model, independent of the asset's own node
/// transforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform at the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with a uniform scale at the given position
    pub fn from_position_scale(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale: Vec3::splat(scale),
            ..Default::default()
        }
    }

    /// Model matrix `T * R * S`. The rotation is normalized first, so an
    /// accumulated or hand-written quaternion never leaks scale into the result.
    pub fn matrix(&self) -> Mat4 {
        math::compose_trs(self.position, math::quat_normalize(self.rotation), self.scale)
    }

    /// Rotate by `angle` radians about a unit `axis`, applied after the
    /// current rotation.
    pub fn rotate_axis_angle(&mut self, axis: Vec3, angle: f32) {
        let delta = math::quat_from_axis_angle(axis, angle);
        self.rotation = math::quat_normalize(math::quat_mul(delta, self.rotation));
    }

    /// Translate by the given offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }
}

/// RGBA color with floating point components (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Base color of a primitive that has no material.
    pub const UNLIT_GRAY: Color = Color::rgba(0.8, 0.8, 0.8, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Convert to an array [r, g, b, a]
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::UNLIT_GRAY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix_translation_column() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let matrix = transform.matrix();
        let translation = matrix.col(3).truncate();
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_matrix_normalizes_rotation() {
        let mut transform = Transform::default();
        transform.rotation = Quat::from_xyzw(0.0, 0.0, 0.0, 3.0);
        assert!(math::mat_approx_eq(transform.matrix(), Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_transform_matrix_scales_then_rotates_then_translates() {
        let mut transform = Transform::from_position_scale(Vec3::new(-1.0, 0.5, 2.0), 2.0);
        transform.rotate_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let p = math::transform_point(transform.matrix(), Vec3::X);
        assert!((p - Vec3::new(-1.0, 0.5, 0.0)).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_default_color_is_unlit_gray() {
        assert_eq!(Color::default().to_array(), [0.8, 0.8, 0.8, 1.0]);
    }
}
