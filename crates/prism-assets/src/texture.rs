//! Texture resolution: glTF texture index -> decoded RGBA8 image
//!
//! Only images carried inside the asset are resolved (buffer views and
//! `data:` URIs). Rows are kept in decode order; glTF puts UV (0,0) at the
//! top-left of the image, which is the first decoded row, so no flip is done.

use std::collections::HashMap;

use base64::Engine;
use gltf::image::Source;

use crate::handle::TextureHandle;
use crate::observer::{LoadEvent, LoadObserver};

/// Texture coordinate wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// Texture filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
    LinearMipmapLinear,
}

/// How the renderer should sample a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    pub wrap_s: WrapMode,
    pub wrap_t: WrapMode,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub generate_mipmaps: bool,
}

impl Default for SamplerSettings {
    /// Repeat wrapping with trilinear filtering.
    fn default() -> Self {
        Self {
            wrap_s: WrapMode::Repeat,
            wrap_t: WrapMode::Repeat,
            min_filter: FilterMode::LinearMipmapLinear,
            mag_filter: FilterMode::Linear,
            generate_mipmaps: true,
        }
    }
}

/// A decoded texture, always 8 bits per channel RGBA.
#[derive(Debug, Clone)]
pub struct TextureAsset {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub sampler: SamplerSettings,
}

/// Decode PNG or JPEG bytes into an RGBA8 texture.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<TextureAsset, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureAsset {
        width,
        height,
        data: rgba.into_raw(),
        sampler: SamplerSettings::default(),
    })
}

/// Resolved textures of one document.
#[derive(Debug, Default)]
pub struct TextureTable {
    by_texture: HashMap<usize, TextureHandle>,
    assets: HashMap<TextureHandle, TextureAsset>,
}

impl TextureTable {
    /// Handle for a glTF texture index, if it resolved.
    pub fn handle(&self, texture_index: usize) -> Option<TextureHandle> {
        self.by_texture.get(&texture_index).copied()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub(crate) fn into_assets(self) -> HashMap<TextureHandle, TextureAsset> {
        self.assets
    }
}

/// Resolve every texture of `document`. Failures are reported to `observer`
/// and leave that texture index unmapped.
pub(crate) fn resolve_textures(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    observer: &mut dyn LoadObserver,
) -> TextureTable {
    let mut table = TextureTable::default();
    // Several textures may share one image; decode it once.
    let mut by_image: HashMap<usize, TextureHandle> = HashMap::new();

    for texture in document.textures() {
        let image = texture.source();

        if let Some(&handle) = by_image.get(&image.index()) {
            table.by_texture.insert(texture.index(), handle);
            continue;
        }

        let bytes = match image_bytes(image.source(), buffers) {
            Ok(bytes) => bytes,
            Err(reason) => {
                observer.on_event(&LoadEvent::TextureSkipped {
                    texture: texture.index(),
                    reason,
                });
                continue;
            }
        };

        match decode_image_bytes(&bytes) {
            Ok(asset) => {
                observer.on_event(&LoadEvent::TextureResolved {
                    texture: texture.index(),
                    width: asset.width,
                    height: asset.height,
                });
                let handle = TextureHandle::next();
                table.assets.insert(handle, asset);
                table.by_texture.insert(texture.index(), handle);
                by_image.insert(image.index(), handle);
            }
            Err(e) => observer.on_event(&LoadEvent::TextureSkipped {
                texture: texture.index(),
                reason: format!("image {} failed to decode: {}", image.index(), e),
            }),
        }
    }

    table
}

/// Locate the encoded bytes of an image without touching the filesystem.
fn image_bytes(source: Source<'_>, buffers: &[gltf::buffer::Data]) -> Result<Vec<u8>, String> {
    match source {
        Source::View { view, .. } => {
            let buffer = buffers
                .get(view.buffer().index())
                .ok_or_else(|| format!("buffer {} is not loaded", view.buffer().index()))?;
            let start = view.offset();
            let end = start + view.length();
            buffer
                .get(start..end)
                .map(<[u8]>::to_vec)
                .ok_or_else(|| {
                    format!(
                        "buffer view {} ({}..{}) exceeds buffer of {} bytes",
                        view.index(),
                        start,
                        end,
                        buffer.len()
                    )
                })
        }
        Source::Uri { uri, .. } if uri.starts_with("data:") => decode_data_uri(uri),
        Source::Uri { uri, .. } => Err(format!("external image uri '{}' is not supported", uri)),
    }
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let (header, data) = uri
        .split_once(',')
        .ok_or_else(|| "malformed data uri".to_string())?;

    if !header.ends_with(";base64") {
        return Err("only base64 data uris are supported".to_string());
    }

    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| format!("base64 decode error: {}", e))
}
