use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glam::{Mat4, Quat, Vec3};
use prism_core::math;

use crate::error::LoadError;
use crate::mesh::DecodedMesh;
use crate::model::Model;
use crate::observer::{LoadEvent, LoadObserver, TracingObserver};
use crate::primitive::PrimitiveData;
use crate::texture::{self, TextureTable};

/// Load a glTF 2.0 file (.gltf or .glb), reporting progress through `tracing`.
pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    load_model_with(path, &mut TracingObserver)
}

/// Load a glTF 2.0 file, reporting progress to `observer`.
///
/// External buffers are resolved relative to the file's directory.
pub fn load_model_with(path: &Path, observer: &mut dyn LoadObserver) -> Result<Model, LoadError> {
    let bytes = std::fs::read(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unnamed".to_string());

    load(&name, path.to_path_buf(), &bytes, path.parent(), observer)
}

/// Load a self-contained glTF container held in memory. Buffers must be
/// embedded (GLB binary chunk or `data:` URIs).
pub fn load_model_from_slice(
    name: &str,
    bytes: &[u8],
    observer: &mut dyn LoadObserver,
) -> Result<Model, LoadError> {
    load(name, PathBuf::new(), bytes, None, observer)
}

fn load(
    name: &str,
    path: PathBuf,
    bytes: &[u8],
    base: Option<&Path>,
    observer: &mut dyn LoadObserver,
) -> Result<Model, LoadError> {
    let source = if path.as_os_str().is_empty() {
        name.to_string()
    } else {
        path.display().to_string()
    };

    let gltf::Gltf { document, blob } = open(&source, bytes)?;
    let buffers =
        gltf::import_buffers(&document, base, blob).map_err(|e| LoadError::from_gltf(&source, e))?;

    observer.on_event(&LoadEvent::Opened {
        source: &source,
        meshes: document.meshes().len(),
        nodes: document.nodes().len(),
        textures: document.textures().len(),
    });

    let textures = texture::resolve_textures(&document, &buffers, observer);

    let scene = SceneLoader {
        source: &source,
        buffers: &buffers,
        textures: &textures,
    };
    let meshes = scene.load_document(&document, observer)?;

    if meshes.is_empty() {
        return Err(LoadError::Empty(source));
    }

    observer.on_event(&LoadEvent::Finished {
        source: &source,
        meshes: meshes.len(),
    });

    Ok(Model {
        name: name.to_string(),
        path,
        meshes,
        textures: textures.into_assets(),
    })
}

/// Parse and validate the container.
///
/// The gltf crate rejects a primitive without POSITION during validation;
/// that case is reported against the primitive rather than the file.
fn open(source: &str, bytes: &[u8]) -> Result<gltf::Gltf, LoadError> {
    let errors = match gltf::Gltf::from_slice(bytes) {
        Ok(gltf) => return Ok(gltf),
        Err(gltf::Error::Validation(errors)) => errors,
        Err(e) => return Err(LoadError::from_gltf(source, e)),
    };

    let missing = errors
        .iter()
        .map(|(path, error)| missing_position(path.as_str(), error))
        .collect::<Option<Vec<_>>>();

    match missing.as_deref() {
        Some(&[(mesh, primitive), ..]) => Err(LoadError::Decode {
            mesh: mesh_name(bytes, mesh),
            primitive,
            reason: "missing POSITION attribute".to_string(),
        }),
        _ => Err(LoadError::from_gltf(source, gltf::Error::Validation(errors))),
    }
}

/// `(mesh, primitive)` if `path` reports an absent POSITION attribute.
fn missing_position(
    path: &str,
    error: &gltf::json::validation::Error,
) -> Option<(usize, usize)> {
    if !matches!(error, gltf::json::validation::Error::Missing) {
        return None;
    }
    let (mesh, rest) = path.strip_prefix("meshes[")?.split_once(']')?;
    let (primitive, rest) = rest.strip_prefix(".primitives[")?.split_once(']')?;
    if rest != ".attributes[\"POSITION\"]" {
        return None;
    }
    Some((mesh.parse().ok()?, primitive.parse().ok()?))
}

fn mesh_name(bytes: &[u8], index: usize) -> String {
    let Ok(gltf) = gltf::Gltf::from_slice_without_validation(bytes) else {
        return "unnamed".to_string();
    };
    let name = gltf
        .document
        .meshes()
        .nth(index)
        .and_then(|mesh| mesh.name().map(str::to_string));
    name.unwrap_or_else(|| "unnamed".to_string())
}

/// Local transform of a node.
///
/// The gltf crate reports whether `matrix` was present in the source, so an
/// explicit matrix (identity included) always wins over translation,
/// rotation and scale.
pub fn local_transform(transform: &gltf::scene::Transform) -> Mat4 {
    match transform {
        gltf::scene::Transform::Matrix { matrix } => Mat4::from_cols_array_2d(matrix),
        gltf::scene::Transform::Decomposed {
            translation,
            rotation,
            scale,
        } => math::compose_trs(
            Vec3::from_array(*translation),
            Quat::from_array(*rotation),
            Vec3::from_array(*scale),
        ),
    }
}

/// Read-only context shared by the recursive walk.
struct SceneLoader<'a> {
    source: &'a str,
    buffers: &'a [gltf::buffer::Data],
    textures: &'a TextureTable,
}

impl SceneLoader<'_> {
    fn load_document(
        &self,
        document: &gltf::Document,
        observer: &mut dyn LoadObserver,
    ) -> Result<Vec<DecodedMesh>, LoadError> {
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());

        let Some(scene) = scene else {
            observer.on_event(&LoadEvent::NoScene);
            let mut meshes = Vec::new();
            for mesh in document.meshes() {
                meshes.extend(self.load_mesh(&mesh, None, Mat4::IDENTITY, observer)?);
            }
            return Ok(meshes);
        };

        let mut visited = HashSet::new();
        let mut meshes = Vec::new();
        for node in scene.nodes() {
            meshes.extend(self.load_node(&node, Mat4::IDENTITY, &mut visited, observer)?);
        }
        Ok(meshes)
    }

    /// Depth-first walk. Returns the meshes of `node` followed by those of its
    /// children, in declaration order.
    fn load_node(
        &self,
        node: &gltf::Node<'_>,
        parent: Mat4,
        visited: &mut HashSet<usize>,
        observer: &mut dyn LoadObserver,
    ) -> Result<Vec<DecodedMesh>, LoadError> {
        if !visited.insert(node.index()) {
            return Err(LoadError::Structural(
                self.source.to_string(),
                format!("node {} is reachable more than once", node.index()),
            ));
        }

        let world = math::mat_mul(parent, local_transform(&node.transform()));

        let mut meshes = match node.mesh() {
            Some(mesh) => self.load_mesh(&mesh, node.name(), world, observer)?,
            None => Vec::new(),
        };

        for child in node.children() {
            meshes.extend(self.load_node(&child, world, visited, observer)?);
        }

        Ok(meshes)
    }

    /// Decode every primitive of `mesh`, each tagged with `world`.
    fn load_mesh(
        &self,
        mesh: &gltf::Mesh<'_>,
        node: Option<&str>,
        world: Mat4,
        observer: &mut dyn LoadObserver,
    ) -> Result<Vec<DecodedMesh>, LoadError> {
        let name = mesh.name().unwrap_or("unnamed");

        mesh.primitives()
            .enumerate()
            .map(|(i, primitive)| -> Result<DecodedMesh, LoadError> {
                let decoded = PrimitiveData::read(&primitive, self.buffers)
                    .and_then(|data| data.into_mesh(name, self.textures, world))
                    .map_err(|reason| LoadError::Decode {
                        mesh: name.to_string(),
                        primitive: i,
                        reason,
                    })?;

                observer.on_event(&LoadEvent::MeshDecoded {
                    mesh: name,
                    node,
                    vertices: decoded.vertex_count,
                    indices: decoded.index_count,
                    bounds: decoded.bounds(),
                    transform: decoded.transform,
                });

                Ok(decoded)
            })
            .collect()
    }
}
