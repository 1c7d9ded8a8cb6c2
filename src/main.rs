//! Prism - glTF scene inspector
//!
//! Loads every model listed in a scene manifest (or a single .gltf/.glb given
//! on the command line), places it, and prints what a renderer would upload
//! and draw for each mesh.

mod config;

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use prism_assets::{AssetServer, DrawMode, ModelManager};
use prism_core::math;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::SceneConfig;

const DEFAULT_MANIFEST: &str = "scene.toml";

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let config = match std::env::args().nth(1) {
        Some(arg) if is_model_file(Path::new(&arg)) => SceneConfig::single(arg),
        Some(arg) => SceneConfig::load(Path::new(&arg)),
        None => SceneConfig::load(Path::new(DEFAULT_MANIFEST)),
    };

    if config.models.is_empty() {
        anyhow::bail!("No models to load; pass a .glb/.gltf file or a scene manifest");
    }

    let mut server = AssetServer::new(&config.asset_dir);
    let mut manager = ModelManager::new();

    for entry in &config.models {
        let model = server
            .load_model(&entry.path)
            .with_context(|| format!("Failed to load model '{}'", entry.name))?;
        manager.add(entry.name.clone(), model, entry.transform());
    }

    let view = config.camera.view();
    let projection = config.camera.projection();
    let view_projection = math::mat_mul(projection, view);
    info!(
        "Camera at {:?}, light direction {:?}",
        config.camera.eye, config.light_direction
    );

    for instance in manager.models() {
        let model = &instance.model;
        println!(
            "{} ({}): {} meshes, {} vertices, {} indices, {} textures",
            instance.name,
            model.path.display(),
            model.meshes.len(),
            model.vertex_count(),
            model.index_count(),
            model.textures.len()
        );

        for mesh in &model.meshes {
            let model_matrix = mesh.model_matrix(&instance.transform);
            let clip_origin =
                math::transform_point(math::mat_mul(view_projection, model_matrix), Vec3::ZERO);

            let draw = match mesh.draw_mode() {
                DrawMode::Indexed { index_count } => format!("indexed x{}", index_count),
                DrawMode::Arrays { vertex_count } => format!("arrays x{}", vertex_count),
            };
            let texture = match mesh.texture.and_then(|h| model.texture(h).map(|t| (h, t))) {
                Some((handle, t)) => format!("{} {}x{}", handle, t.width, t.height),
                None => "untextured".to_string(),
            };

            println!(
                "  {:<24} {:<14} color {:?} {} origin(ndc) {:?}",
                mesh.name,
                draw,
                mesh.base_color.to_array(),
                texture,
                clip_origin.to_array()
            );
        }
    }

    Ok(())
}

fn is_model_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("glb") || ext.eq_ignore_ascii_case("gltf"))
        .unwrap_or(false)
}
