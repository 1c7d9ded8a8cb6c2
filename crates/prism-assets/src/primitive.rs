//! Primitive decoding: accessor streams -> interleaved [`DecodedMesh`]

use glam::{Mat4, Vec3};
use prism_core::Color;
use tracing::debug;

use crate::mesh::DecodedMesh;
use crate::texture::TextureTable;
use crate::vertex::Vertex;

/// Normal written for vertices past the end of a short normal stream.
const FALLBACK_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Material inputs of one primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialInfo {
    pub base_color: Color,
    /// glTF texture index of the base color texture.
    pub base_color_texture: Option<usize>,
}

impl Default for MaterialInfo {
    fn default() -> Self {
        Self {
            base_color: Color::UNLIT_GRAY,
            base_color_texture: None,
        }
    }
}

impl MaterialInfo {
    /// Primitives without a material keep the defaults. An assigned material
    /// contributes its PBR base color factor and base color texture.
    pub fn from_gltf(material: &gltf::Material<'_>) -> Self {
        if material.index().is_none() {
            return Self::default();
        }

        let pbr = material.pbr_metallic_roughness();
        Self {
            base_color: Color::from_array(pbr.base_color_factor()),
            base_color_texture: pbr.base_color_texture().map(|info| info.texture().index()),
        }
    }
}

/// Raw attribute streams of one primitive, before interleaving.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Option<Vec<u32>>,
    pub material: MaterialInfo,
}

impl PrimitiveData {
    /// Read the streams of a glTF primitive. Only the position stream is
    /// required.
    pub fn read(
        primitive: &gltf::Primitive<'_>,
        buffers: &[gltf::buffer::Data],
    ) -> Result<Self, String> {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            debug!(
                "Primitive {} uses {:?}, decoding it as a triangle list",
                primitive.index(),
                primitive.mode()
            );
        }

        let reader =
            primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        if primitive.get(&gltf::Semantic::Positions).is_none() {
            return Err("missing POSITION attribute".to_string());
        }
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| "POSITION accessor unreadable".to_string())?
            .collect();

        let normals = reader.read_normals().map(|iter| iter.collect());
        let tex_coords = reader
            .read_tex_coords(0)
            .map(|tc| tc.into_f32().collect());
        let indices = reader
            .read_indices()
            .map(|idx| idx.into_u32().collect::<Vec<_>>())
            .filter(|idx| !idx.is_empty());

        Ok(Self {
            positions,
            normals,
            tex_coords,
            indices,
            material: MaterialInfo::from_gltf(&primitive.material()),
        })
    }

    /// Interleave into a [`DecodedMesh`], synthesizing flat normals when the
    /// primitive has none.
    pub fn into_mesh(
        self,
        name: &str,
        textures: &TextureTable,
        transform: Mat4,
    ) -> Result<DecodedMesh, String> {
        let vertex_count = self.positions.len();

        if let Some(indices) = &self.indices {
            if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(format!(
                    "index {} out of range for {} vertices",
                    bad, vertex_count
                ));
            }
        }

        let normals = match self.normals {
            Some(normals) => normals,
            None => generate_flat_normals(&self.positions, self.indices.as_deref()),
        };

        let vertices = interleave(&self.positions, &normals, self.tex_coords.as_deref());

        let texture = self
            .material
            .base_color_texture
            .and_then(|index| textures.handle(index));

        let index_count = self.indices.as_ref().map_or(0, Vec::len);

        Ok(DecodedMesh {
            name: name.to_string(),
            vertices,
            indices: self.indices,
            vertex_count,
            index_count,
            base_color: self.material.base_color,
            texture,
            transform,
        })
    }
}

/// Pack positions, normals and texcoords into one vertex per position.
/// Missing normals fall back to +Y and missing texcoords to (0, 0).
pub fn interleave(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    tex_coords: Option<&[[f32; 2]]>,
) -> Vec<Vertex> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            let normal = normals.get(i).copied().unwrap_or(FALLBACK_NORMAL);
            let tex_coord = tex_coords
                .and_then(|tc| tc.get(i).copied())
                .unwrap_or([0.0, 0.0]);
            Vertex::new(position, normal, tex_coord)
        })
        .collect()
}

/// Flat per-face normals.
///
/// Triangles come from `indices` when present, otherwise from consecutive
/// vertex triplets. Each triangle writes its face normal to all three of its
/// vertices, so a vertex shared between faces keeps the normal of the last
/// face that touched it. Degenerate faces write a zero normal. Indices must
/// already be in range.
pub fn generate_flat_normals(positions: &[[f32; 3]], indices: Option<&[u32]>) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0; 3]; positions.len()];

    let mut write_face = |i0: usize, i1: usize, i2: usize| {
        let p0 = Vec3::from_array(positions[i0]);
        let e1 = Vec3::from_array(positions[i1]) - p0;
        let e2 = Vec3::from_array(positions[i2]) - p0;

        let n = e1.cross(e2);
        let length = n.length();
        let n = if length > 0.0 { n / length } else { n };

        for i in [i0, i1, i2] {
            normals[i] = n.to_array();
        }
    };

    match indices {
        Some(indices) => {
            for tri in indices.chunks_exact(3) {
                write_face(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        }
        None => {
            for first in (0..positions.len()).step_by(3) {
                if first + 2 < positions.len() {
                    write_face(first, first + 1, first + 2);
                }
            }
        }
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::UNIT_TRIANGLE;
    use prism_core::math;

    fn data(positions: &[[f32; 3]], indices: Option<Vec<u32>>) -> PrimitiveData {
        PrimitiveData {
            positions: positions.to_vec(),
            indices,
            ..Default::default()
        }
    }

    #[test]
    fn flat_normal_of_unit_triangle_points_up_z() {
        let normals = generate_flat_normals(&UNIT_TRIANGLE, None);
        assert_eq!(normals, vec![[0.0, 0.0, 1.0]; 3]);

        let indexed = generate_flat_normals(&UNIT_TRIANGLE, Some(&[0, 1, 2][..]));
        assert_eq!(indexed, vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn shared_vertices_keep_last_face_normal() {
        // Two faces sharing the edge 0-1: one in XY (+Z), one in XZ (-Y).
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let normals = generate_flat_normals(&positions, Some(&[0, 1, 2, 0, 1, 3][..]));

        assert_eq!(normals[2], [0.0, 0.0, 1.0]);
        assert_eq!(normals[3], [0.0, -1.0, 0.0]);
        // Shared vertices: no averaging, the second face wins.
        assert_eq!(normals[0], [0.0, -1.0, 0.0]);
        assert_eq!(normals[1], [0.0, -1.0, 0.0]);
    }

    #[test]
    fn degenerate_face_gets_zero_normal() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]];
        assert_eq!(generate_flat_normals(&positions, None), vec![[0.0; 3]; 3]);
    }

    #[test]
    fn trailing_vertices_outside_a_triangle_stay_zero() {
        let mut positions = UNIT_TRIANGLE.to_vec();
        positions.push([5.0, 5.0, 5.0]);
        let normals = generate_flat_normals(&positions, None);
        assert_eq!(normals[3], [0.0; 3]);
    }

    #[test]
    fn interleave_fills_missing_streams() {
        let vertices = interleave(&UNIT_TRIANGLE, &[[1.0, 0.0, 0.0]], Some(&[[0.5, 0.25]][..]));
        assert_eq!(vertices[0], Vertex::new([0.0; 3], [1.0, 0.0, 0.0], [0.5, 0.25]));
        assert_eq!(vertices[1].normal, FALLBACK_NORMAL);
        assert_eq!(vertices[2].tex_coord, [0.0, 0.0]);
    }

    #[test]
    fn non_indexed_reports_vertex_count() {
        let mesh = data(&UNIT_TRIANGLE, None)
            .into_mesh("tri", &TextureTable::default(), Mat4::IDENTITY)
            .unwrap();
        assert!(!mesh.has_indices());
        assert_eq!(mesh.vertex_count, 3);
        assert_eq!(mesh.index_count, 0);
        assert_eq!(mesh.vertex_floats().len(), 24);
        assert_eq!(
            mesh.vertex_floats(),
            &[
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0,
            ]
        );
    }

    #[test]
    fn indexed_reports_index_count() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]];
        let mesh = data(&positions, Some(vec![0, 1, 2, 0, 2, 3]))
            .into_mesh("quad", &TextureTable::default(), Mat4::IDENTITY)
            .unwrap();
        assert!(mesh.has_indices());
        assert_eq!(mesh.index_count, 6);
        assert_eq!(mesh.indices.as_deref(), Some(&[0, 1, 2, 0, 2, 3][..]));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = data(&UNIT_TRIANGLE, Some(vec![0, 1, 7]))
            .into_mesh("tri", &TextureTable::default(), Mat4::IDENTITY)
            .unwrap_err();
        assert!(err.contains("index 7"));
    }

    #[test]
    fn no_material_is_gray_and_untextured() {
        let mesh = data(&UNIT_TRIANGLE, None)
            .into_mesh("tri", &TextureTable::default(), Mat4::IDENTITY)
            .unwrap();
        assert_eq!(mesh.base_color.to_array(), [0.8, 0.8, 0.8, 1.0]);
        assert!(!mesh.has_texture());
    }

    #[test]
    fn unresolved_texture_falls_back_to_base_color() {
        let mut primitive = data(&UNIT_TRIANGLE, None);
        primitive.material = MaterialInfo {
            base_color: Color::rgba(0.2, 0.4, 0.6, 1.0),
            base_color_texture: Some(0),
        };
        let mesh = primitive
            .into_mesh("tri", &TextureTable::default(), Mat4::IDENTITY)
            .unwrap();
        assert!(mesh.texture.is_none());
        assert_eq!(mesh.base_color, Color::rgba(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn provided_normals_are_kept() {
        let mut primitive = data(&UNIT_TRIANGLE, None);
        primitive.normals = Some(vec![[0.0, 0.0, -1.0]; 3]);
        let transform = math::mat_translate(Vec3::X);
        let mesh = primitive
            .into_mesh("tri", &TextureTable::default(), transform)
            .unwrap();
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 0.0, -1.0]));
        assert_eq!(mesh.transform, transform);
    }
}
