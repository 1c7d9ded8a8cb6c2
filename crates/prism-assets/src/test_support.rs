//! In-memory GLB fixtures for the loader tests

use std::io::Cursor;

use serde_json::{json, Value};

const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// Accumulates a binary chunk plus the buffer views and accessors that
/// describe it. Everything else (meshes, nodes, scenes, ...) is passed to
/// [`GlbBuilder::finish`] as JSON.
#[derive(Default)]
pub struct GlbBuilder {
    bin: Vec<u8>,
    views: Vec<Value>,
    accessors: Vec<Value>,
}

impl GlbBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes as a new buffer view and return the view index.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        let offset = self.bin.len();
        self.bin.extend_from_slice(bytes);
        while self.bin.len() % 4 != 0 {
            self.bin.push(0);
        }
        self.views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
        }));
        self.views.len() - 1
    }

    pub fn push_accessor(&mut self, accessor: Value) -> usize {
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    /// VEC3 float accessor with min/max, as POSITION requires.
    pub fn push_vec3(&mut self, data: &[[f32; 3]]) -> usize {
        let floats: Vec<f32> = data.iter().flatten().copied().collect();
        let view = self.push_bytes(bytemuck::cast_slice(&floats));

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in data {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }

        self.push_accessor(json!({
            "bufferView": view,
            "componentType": FLOAT,
            "count": data.len(),
            "type": "VEC3",
            "min": min,
            "max": max,
        }))
    }

    pub fn push_vec2(&mut self, data: &[[f32; 2]]) -> usize {
        let floats: Vec<f32> = data.iter().flatten().copied().collect();
        let view = self.push_bytes(bytemuck::cast_slice(&floats));
        self.push_accessor(json!({
            "bufferView": view,
            "componentType": FLOAT,
            "count": data.len(),
            "type": "VEC2",
        }))
    }

    pub fn push_indices(&mut self, indices: &[u32]) -> usize {
        let view = self.push_bytes(bytemuck::cast_slice(indices));
        self.push_accessor(json!({
            "bufferView": view,
            "componentType": UNSIGNED_INT,
            "count": indices.len(),
            "type": "SCALAR",
        }))
    }

    /// Serialize to a GLB container. `document` must be a JSON object; the
    /// asset header, buffer, views and accessors are filled in.
    pub fn finish(self, mut document: Value) -> Vec<u8> {
        let object = document
            .as_object_mut()
            .expect("document must be a JSON object");
        object.insert("asset".into(), json!({ "version": "2.0" }));
        if !self.bin.is_empty() {
            object.insert("buffers".into(), json!([{ "byteLength": self.bin.len() }]));
        }
        if !self.views.is_empty() {
            object.insert("bufferViews".into(), Value::Array(self.views));
        }
        if !self.accessors.is_empty() {
            object.insert("accessors".into(), Value::Array(self.accessors));
        }

        let mut json_chunk = serde_json::to_vec(&document).expect("serializable document");
        while json_chunk.len() % 4 != 0 {
            json_chunk.push(b' ');
        }

        let mut total = 12 + 8 + json_chunk.len();
        if !self.bin.is_empty() {
            total += 8 + self.bin.len();
        }

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());

        out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json_chunk);

        if !self.bin.is_empty() {
            out.extend_from_slice(&(self.bin.len() as u32).to_le_bytes());
            out.extend_from_slice(b"BIN\0");
            out.extend_from_slice(&self.bin);
        }

        out
    }
}

/// A solid-color PNG.
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("png encoding");
    out.into_inner()
}

/// Triangle in the XY plane with counter-clockwise winding, facing +Z.
pub const UNIT_TRIANGLE: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
