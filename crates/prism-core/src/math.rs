//! Linear-algebra kernel
//!
//! All matrices are column-major (`glam::Mat4`): column `c`, row `r` lives at
//! index `c * 4 + r` of [`Mat4::to_cols_array`]. Every function here is pure
//! and none of them normalizes its inputs implicitly.

use glam::{Mat4, Quat, Vec3};

/// The identity matrix.
pub fn mat_identity() -> Mat4 {
    Mat4::IDENTITY
}

/// Compose two transforms. The result applied to `v` equals `a * (b * v)`.
pub fn mat_mul(a: Mat4, b: Mat4) -> Mat4 {
    a * b
}

/// Translation by `t`.
pub fn mat_translate(t: Vec3) -> Mat4 {
    Mat4::from_translation(t)
}

/// Non-uniform scale along the three axes.
pub fn mat_scale(sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(sx, sy, sz))
}

pub fn mat_scale_uniform(s: f32) -> Mat4 {
    mat_scale(s, s, s)
}

/// Rotation about X with column 1 stored as `(0, c, -s)`: a positive angle
/// turns +Y toward -Z, the opposite sense of [`mat_rotate_y`] and
/// [`mat_rotate_z`].
pub fn mat_rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array(&[
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, -s, 0.0, //
        0.0, s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Counter-clockwise rotation about +Y (Z turns toward X).
pub fn mat_rotate_y(angle: f32) -> Mat4 {
    Mat4::from_rotation_y(angle)
}

/// Counter-clockwise rotation about +Z (X turns toward Y).
pub fn mat_rotate_z(angle: f32) -> Mat4 {
    Mat4::from_rotation_z(angle)
}

/// Right-handed perspective projection with OpenGL depth: `near` maps to -1
/// and `far` to +1 in normalized device depth.
///
/// `fovy` is the vertical field of view in radians. Degenerate when
/// `near == far`.
pub fn mat_perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fovy, aspect, near, far)
}

/// View matrix for a camera at `eye` looking at `center`.
///
/// `up` must not be parallel to `center - eye`; that case is not checked and
/// produces a degenerate basis.
pub fn mat_look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(eye, center, up)
}

/// Apply `m` to the point `p` (w = 1), dividing by the resulting w.
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let v = m * p.extend(1.0);
    if v.w == 0.0 || v.w == 1.0 {
        v.truncate()
    } else {
        v.truncate() / v.w
    }
}

/// Rotation of `angle` radians about `axis`.
///
/// `axis` is used as given: a non-unit axis yields a non-unit quaternion.
pub fn quat_from_axis_angle(axis: Vec3, angle: f32) -> Quat {
    let (s, c) = (angle / 2.0).sin_cos();
    Quat::from_xyzw(axis.x * s, axis.y * s, axis.z * s, c)
}

/// Hamilton product `a * b` (apply `b`, then `a`).
pub fn quat_mul(a: Quat, b: Quat) -> Quat {
    a * b
}

/// Divide by the magnitude. A zero quaternion produces NaN components.
pub fn quat_normalize(q: Quat) -> Quat {
    let length = (q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w).sqrt();
    Quat::from_xyzw(q.x / length, q.y / length, q.z / length, q.w / length)
}

/// Rotation matrix of a unit quaternion.
///
/// The quaternion is not normalized here. A non-unit input yields a matrix
/// that is not a pure rotation (it carries an implicit scale).
pub fn quat_to_mat4(q: Quat) -> Mat4 {
    Mat4::from_quat(q)
}

/// `T * R * S` for a translation, a rotation quaternion (xyzw) and a scale.
///
/// The rotation-and-scale lands in the upper-left 3x3 block and the
/// translation column holds `t` untouched.
pub fn compose_trs(t: Vec3, q: Quat, s: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(s, q, t)
}

/// Component-wise comparison with a tolerance relative to the larger magnitude.
pub fn mat_approx_eq(a: Mat4, b: Mat4, tolerance: f32) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() <= tolerance * x.abs().max(y.abs()).max(1.0))
}
