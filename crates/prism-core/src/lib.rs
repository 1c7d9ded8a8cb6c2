//! Prism Core - math kernel and shared types
//!
//! This crate provides the foundational pieces used by the asset loader:
//! - Column-major 4x4 matrix and quaternion operations
//! - The per-instance `Transform`
//! - `Color`

pub mod math;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use types::{Color, Transform};
