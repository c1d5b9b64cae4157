//! Scene description file loading.
//!
//! Scenes are JSON: an optional `camera` block and a `surfaces` array of
//! sphere records with tagged material kinds. Missing material fields
//! take the usual defaults (grey reflectance, polished metal, glass at
//! index 1.5). Out-of-range values are accepted with a warning.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::camera::Camera;
use crate::material::{Color, Material};
use crate::scene::Scene;
use crate::surface::Sphere;
use glint_math::Vec3;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    camera: CameraFile,
    surfaces: Vec<SurfaceFile>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CameraFile {
    origin: [f64; 3],
    aspect_ratio: f64,
    viewport_height: f64,
}

impl Default for CameraFile {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            aspect_ratio: 16.0 / 9.0,
            viewport_height: 2.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
enum SurfaceFile {
    Sphere {
        center: [f64; 3],
        radius: f64,
        #[serde(default)]
        hollow: bool,
        material: MaterialFile,
    },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum MaterialFile {
    Matte {
        #[serde(default = "default_reflectance")]
        reflectance: [f64; 3],
    },
    Metal {
        #[serde(default = "default_reflectance")]
        reflectance: [f64; 3],
        #[serde(default)]
        fuzz: f64,
    },
    Glass {
        #[serde(default = "default_glass_reflectance")]
        reflectance: [f64; 3],
        #[serde(default = "default_refractive_index")]
        refractive_index: f64,
    },
}

fn default_reflectance() -> [f64; 3] {
    [0.5, 0.5, 0.5]
}

fn default_glass_reflectance() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

fn default_refractive_index() -> f64 {
    1.5
}

/// Load a scene description file.
///
/// Returns the scene and the camera the file specifies, or the default
/// camera when the file has no `camera` block.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<(Scene, Camera)> {
    let text = fs::read_to_string(path)?;
    let file: SceneFile = serde_json::from_str(&text)?;
    Ok(build_scene(file))
}

fn build_scene(file: SceneFile) -> (Scene, Camera) {
    let camera = Camera::new(
        Vec3::from(file.camera.origin),
        file.camera.aspect_ratio,
        file.camera.viewport_height,
    );

    let mut scene = Scene::new();
    for surface in file.surfaces {
        match surface {
            SurfaceFile::Sphere {
                center,
                radius,
                hollow,
                material,
            } => {
                let material = convert_material(material);
                let sphere = if hollow {
                    Sphere::hollow(Vec3::from(center), radius, material)
                } else {
                    Sphere::new(Vec3::from(center), radius, material)
                };
                scene.add(sphere);
            }
        }
    }

    log::info!("Loaded scene with {} surfaces", scene.len());
    (scene, camera)
}

fn convert_material(file: MaterialFile) -> Material {
    match file {
        MaterialFile::Matte { reflectance } => Material::matte(Color::from(reflectance)),
        MaterialFile::Metal { reflectance, fuzz } => {
            if !(0.0..=1.0).contains(&fuzz) {
                log::warn!("metal fuzz {} outside [0, 1], keeping as-is", fuzz);
            }
            Material::metal(Color::from(reflectance), fuzz)
        }
        MaterialFile::Glass {
            reflectance,
            refractive_index,
        } => {
            if refractive_index < 1.0 {
                log::warn!("refractive index {} below 1, keeping as-is", refractive_index);
            }
            Material::Glass {
                reflectance: Color::from(reflectance),
                refractive_index,
            }
        }
    }
}
