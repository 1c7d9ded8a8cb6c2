use glam::{Mat4, Vec3};
use prism_core::{math, Color, Transform};

use crate::handle::TextureHandle;
use crate::vertex::Vertex;

/// How a decoded mesh is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Triangle list over the index buffer.
    Indexed { index_count: usize },
    /// Triangle list over the vertices in order.
    Arrays { vertex_count: usize },
}

/// One render-ready primitive with its world transform baked in at load time.
#[derive(Debug, Clone)]
pub struct DecodedMesh {
    /// Name of the glTF mesh this primitive belongs to.
    pub name: String,
    pub vertices: Vec<Vertex>,
    /// `None` for non-indexed primitives.
    pub indices: Option<Vec<u32>>,
    pub vertex_count: usize,
    /// Zero when the primitive is non-indexed.
    pub index_count: usize,
    pub base_color: Color,
    /// `None` renders from `base_color` alone.
    pub texture: Option<TextureHandle>,
    /// World transform of the owning node (column-major).
    pub transform: Mat4,
}

impl DecodedMesh {
    pub fn has_indices(&self) -> bool {
        self.indices.is_some()
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    pub fn draw_mode(&self) -> DrawMode {
        match &self.indices {
            Some(_) => DrawMode::Indexed {
                index_count: self.index_count,
            },
            None => DrawMode::Arrays {
                vertex_count: self.vertex_count,
            },
        }
    }

    /// The interleaved vertex buffer as flat floats (stride 8).
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The interleaved vertex buffer as raw bytes, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(bytemuck::cast_slice)
    }

    /// The baked transform as 16 column-major floats.
    pub fn transform_array(&self) -> [f32; 16] {
        self.transform.to_cols_array()
    }

    /// Final model matrix for one placed instance: `instance * baked`.
    pub fn model_matrix(&self, instance: &Transform) -> Mat4 {
        math::mat_mul(instance.matrix(), self.transform)
    }

    /// Axis-aligned bounds of the untransformed positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut positions = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}
