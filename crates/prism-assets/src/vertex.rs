//! Interleaved vertex layout handed to the renderer

use bytemuck::{Pod, Zeroable};

/// Number of `f32` values per vertex: position (3), normal (3), texcoord (2).
pub const FLOATS_PER_VERTEX: usize = 8;

/// One vertex of a decoded primitive. `#[repr(C)]` keeps the fields packed in
/// declaration order with a 32 byte stride.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const STRIDE: usize = std::mem::size_of::<Self>();
    pub const NORMAL_OFFSET: usize = 12;
    pub const TEX_COORD_OFFSET: usize = 24;

    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}
