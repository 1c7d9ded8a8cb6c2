//! Prism Assets - glTF scene loading
//!
//! Turns a glTF 2.0 / GLB file into a flat list of render-ready meshes:
//! the node hierarchy is walked from the active scene's roots, every
//! primitive is decoded into an interleaved vertex buffer, and each mesh
//! carries the world transform of the node it came from. Embedded textures
//! are decoded to RGBA8 alongside.

mod error;
mod handle;
mod loader;
mod mesh;
mod model;
mod observer;
mod primitive;
mod server;
mod texture;
mod vertex;

#[cfg(test)]
mod test_support;

pub use error::{LoadError, LoadErrorKind};
pub use handle::TextureHandle;
pub use loader::{load_model, load_model_from_slice, load_model_with, local_transform};
pub use mesh::{DecodedMesh, DrawMode};
pub use model::{Model, ModelInstance, ModelManager};
pub use observer::{LoadEvent, LoadObserver, NullObserver, TracingObserver};
pub use primitive::{generate_flat_normals, interleave, MaterialInfo, PrimitiveData};
pub use server::AssetServer;
pub use texture::{
    decode_image_bytes, FilterMode, SamplerSettings, TextureAsset, TextureTable, WrapMode,
};
pub use vertex::{Vertex, FLOATS_PER_VERTEX};
