//! Scene manifest
//!
//! Lists the models to load and how to place them, plus the camera and light
//! the renderer would use. Read from a TOML file; a missing or broken file
//! falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use prism_core::{math, Transform};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Whole scene description
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Directory model paths are resolved against
    pub asset_dir: PathBuf,
    pub camera: CameraConfig,
    /// World-space direction the light travels in
    pub light_direction: [f32; 3],
    pub models: Vec<ModelEntry>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            camera: CameraConfig::default(),
            light_direction: [-0.3, -0.8, -0.5],
            models: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Load a manifest from disk, or return defaults if it can't be read
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!("No scene manifest at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    info!("Loaded scene manifest from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse scene manifest: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read scene manifest: {}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// A scene holding just one model at the origin.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        Self {
            models: vec![ModelEntry {
                name,
                path,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}

/// One placed model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelEntry {
    pub name: String,
    pub path: PathBuf,
    pub position: [f32; 3],
    /// Uniform scale
    pub scale: f32,
    /// Unit axis of the initial rotation
    pub rotation_axis: [f32; 3],
    pub rotation_degrees: f32,
}

impl Default for ModelEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: PathBuf::new(),
            position: [0.0; 3],
            scale: 1.0,
            rotation_axis: [0.0, 1.0, 0.0],
            rotation_degrees: 0.0,
        }
    }
}

impl ModelEntry {
    pub fn transform(&self) -> Transform {
        let mut transform =
            Transform::from_position_scale(Vec3::from_array(self.position), self.scale);
        transform.rotate_axis_angle(
            Vec3::from_array(self.rotation_axis),
            self.rotation_degrees.to_radians(),
        );
        transform
    }
}

/// Camera and viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub center: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.8, 3.0],
            center: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            width: 800,
            height: 600,
        }
    }
}

impl CameraConfig {
    pub fn view(&self) -> Mat4 {
        math::mat_look_at(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.center),
            Vec3::from_array(self.up),
        )
    }

    pub fn projection(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        math::mat_perspective(self.fov.to_radians(), aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_manifest_with_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            asset_dir = "assets"

            [camera]
            fov = 60.0

            [[models]]
            name = "Eleven"
            path = "dead_by_daylight_-_eleven.glb"
            scale = 0.01

            [[models]]
            name = "Shield"
            path = "shield.glb"
            position = [2.0, 0.0, 0.0]
            rotation_degrees = 90.0
            "#,
        )
        .unwrap();

        assert_eq!(config.asset_dir, PathBuf::from("assets"));
        assert_eq!(config.camera.fov, 60.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.light_direction, [-0.3, -0.8, -0.5]);
        assert_eq!(config.models.len(), 2);
        assert_eq!(config.models[0].scale, 0.01);
        assert_eq!(config.models[1].scale, 1.0);
        assert_eq!(config.models[1].rotation_axis, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn entry_transform_places_model() {
        let entry = ModelEntry {
            position: [2.0, 0.0, 0.0],
            scale: 0.5,
            ..Default::default()
        };
        let m = entry.transform().matrix();
        assert_eq!(math::transform_point(m, Vec3::ZERO), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(math::transform_point(m, Vec3::X), Vec3::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn missing_manifest_falls_back_to_defaults() {
        let config = SceneConfig::load(Path::new("/nonexistent/scene.toml"));
        assert!(config.models.is_empty());
        assert_eq!(config.camera.width, 800);
    }

    #[test]
    fn single_names_model_after_file() {
        let config = SceneConfig::single("models/shield.glb");
        assert_eq!(config.models[0].name, "shield");
        assert_eq!(config.models[0].scale, 1.0);
    }
}
