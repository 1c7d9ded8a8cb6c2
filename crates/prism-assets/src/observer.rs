//! Load progress reporting
//!
//! The loader never logs directly. It reports what it is doing to a
//! [`LoadObserver`]; [`TracingObserver`] turns those reports into `tracing`
//! events and is what [`load_model`](crate::load_model) uses.

use glam::{Mat4, Vec3};
use tracing::{debug, info, warn};

/// A single step of a model load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent<'a> {
    /// The container parsed and its buffers are resident.
    Opened {
        source: &'a str,
        meshes: usize,
        nodes: usize,
        textures: usize,
    },
    /// A texture decoded to RGBA8.
    TextureResolved {
        texture: usize,
        width: u32,
        height: u32,
    },
    /// A texture was left out; meshes using it render untextured.
    TextureSkipped { texture: usize, reason: String },
    /// The document declares no scene; every mesh is loaded untransformed.
    NoScene,
    /// One primitive was decoded and placed.
    MeshDecoded {
        mesh: &'a str,
        node: Option<&'a str>,
        vertices: usize,
        indices: usize,
        bounds: Option<(Vec3, Vec3)>,
        transform: Mat4,
    },
    /// The load succeeded.
    Finished { source: &'a str, meshes: usize },
}

/// Receives [`LoadEvent`]s while a model loads.
pub trait LoadObserver {
    fn on_event(&mut self, event: &LoadEvent<'_>);
}

impl<F> LoadObserver for F
where
    F: FnMut(&LoadEvent<'_>),
{
    fn on_event(&mut self, event: &LoadEvent<'_>) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl LoadObserver for NullObserver {
    fn on_event(&mut self, _event: &LoadEvent<'_>) {}
}

/// Forwards load events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn on_event(&mut self, event: &LoadEvent<'_>) {
        match event {
            LoadEvent::Opened {
                source,
                meshes,
                nodes,
                textures,
            } => debug!(
                "Opened '{}': {} meshes, {} nodes, {} textures",
                source, meshes, nodes, textures
            ),
            LoadEvent::TextureResolved {
                texture,
                width,
                height,
            } => debug!("Texture {} decoded ({}x{})", texture, width, height),
            LoadEvent::TextureSkipped { texture, reason } => {
                warn!("Skipping texture {}: {}", texture, reason)
            }
            LoadEvent::NoScene => {
                debug!("No scene declared, loading every mesh with an identity transform")
            }
            LoadEvent::MeshDecoded {
                mesh,
                node,
                vertices,
                indices,
                bounds,
                transform,
            } => {
                debug!(
                    "Mesh '{}' (node {:?}): {} vertices, {} indices, translation {:?}",
                    mesh,
                    node,
                    vertices,
                    indices,
                    transform.w_axis.truncate()
                );
                if let Some((min, max)) = bounds {
                    debug!("  bounds min={:?} max={:?}", min, max);
                }
            }
            LoadEvent::Finished { source, meshes } => {
                info!("Loaded '{}' with {} meshes", source, meshes)
            }
        }
    }
}
