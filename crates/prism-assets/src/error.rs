use std::path::PathBuf;

/// Coarse classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The container could not be read or parsed.
    Open,
    /// An index points outside its table, or the node graph is not a tree.
    Structural,
    /// Traversal finished without producing a single mesh.
    EmptyResult,
    /// A primitive's required data is missing or malformed.
    Decode,
}

/// Errors that abort a model load. Texture problems never show up here; a
/// texture that fails to resolve is simply left out.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse glTF container '{0}': {1}")]
    Open(String, String),

    #[error("invalid glTF structure in '{0}': {1}")]
    Structural(String, String),

    #[error("no meshes found in '{0}'")]
    Empty(String),

    #[error("failed to decode primitive {primitive} of mesh '{mesh}': {reason}")]
    Decode {
        mesh: String,
        primitive: usize,
        reason: String,
    },
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Io(..) | LoadError::Open(..) => LoadErrorKind::Open,
            LoadError::Structural(..) => LoadErrorKind::Structural,
            LoadError::Empty(_) => LoadErrorKind::EmptyResult,
            LoadError::Decode { .. } => LoadErrorKind::Decode,
        }
    }

    /// Map a gltf crate error. Index validation failures are structural;
    /// everything else means the container itself is unusable.
    pub(crate) fn from_gltf(source: &str, err: gltf::Error) -> Self {
        match err {
            gltf::Error::Validation(errors) => {
                let details = errors
                    .iter()
                    .map(|(path, error)| format!("{}: {}", path, error))
                    .collect::<Vec<_>>()
                    .join("; ");
                LoadError::Structural(source.to_string(), details)
            }
            other => LoadError::Open(source.to_string(), other.to_string()),
        }
    }
}
