use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use prism_core::Transform;

use crate::handle::TextureHandle;
use crate::mesh::DecodedMesh;
use crate::texture::TextureAsset;

/// Everything decoded from one glTF file. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Model {
    pub name: String,
    /// Empty when the model was loaded from memory.
    pub path: PathBuf,
    /// Meshes in traversal order.
    pub meshes: Vec<DecodedMesh>,
    pub textures: HashMap<TextureHandle, TextureAsset>,
}

impl Model {
    pub fn texture(&self, handle: TextureHandle) -> Option<&TextureAsset> {
        self.textures.get(&handle)
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count).sum()
    }

    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(|m| m.index_count).sum()
    }
}

/// A model placed in the scene.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    pub name: String,
    pub model: Arc<Model>,
    pub transform: Transform,
}

/// Ordered list of the models making up a scene.
#[derive(Debug, Default)]
pub struct ModelManager {
    instances: Vec<ModelInstance>,
}

impl ModelManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, model: Arc<Model>, transform: Transform) {
        self.instances.push(ModelInstance {
            name: name.into(),
            model,
            transform,
        });
    }

    pub fn models(&self) -> &[ModelInstance] {
        &self.instances
    }

    /// First instance with the given name.
    pub fn get(&self, name: &str) -> Option<&ModelInstance> {
        self.instances.iter().find(|i| i.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ModelInstance> {
        self.instances.iter_mut().find(|i| i.name == name)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
