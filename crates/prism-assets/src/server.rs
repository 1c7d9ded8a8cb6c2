use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::loader;
use crate::model::Model;
use crate::observer::{LoadObserver, TracingObserver};

/// Loads models relative to a base directory and caches them by path.
pub struct AssetServer {
    base_path: PathBuf,
    models: HashMap<PathBuf, Arc<Model>>,
}

impl AssetServer {
    /// Create a new AssetServer rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("AssetServer created with base path: {}", base_path.display());
        Self {
            base_path,
            models: HashMap::new(),
        }
    }

    /// Resolve a relative asset path against the base path.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Load a model, or return the cached one if this path was loaded before.
    pub fn load_model(&mut self, path: &Path) -> Result<Arc<Model>, LoadError> {
        self.load_model_with(path, &mut TracingObserver)
    }

    pub fn load_model_with(
        &mut self,
        path: &Path,
        observer: &mut dyn LoadObserver,
    ) -> Result<Arc<Model>, LoadError> {
        let full_path = self.resolve(path);

        if let Some(model) = self.models.get(&full_path) {
            debug!("Reusing cached model {}", full_path.display());
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(loader::load_model_with(&full_path, observer)?);
        self.models.insert(full_path, Arc::clone(&model));
        Ok(model)
    }

    /// Check whether a path has already been loaded.
    pub fn is_loaded(&self, path: &Path) -> bool {
        self.models.contains_key(&self.resolve(path))
    }

    /// The base path this server resolves relative paths against.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
