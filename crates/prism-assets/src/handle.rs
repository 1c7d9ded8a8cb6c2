use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TEXTURE: AtomicU64 = AtomicU64::new(1);

/// Opaque reference to a decoded texture inside a [`Model`](crate::Model).
///
/// Handles are unique across every load in the process, so textures from
/// different models never collide when a renderer keys GPU objects by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub(crate) fn next() -> Self {
        Self(NEXT_TEXTURE.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id behind this handle.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}
