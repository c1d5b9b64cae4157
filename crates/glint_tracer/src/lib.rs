//! Glint - CPU Path Tracing
//!
//! A Monte Carlo path tracer for sphere scenes with matte, metal, and
//! glass materials. Rays scatter recursively up to a bounce budget and
//! terminate against a sky gradient.

mod camera;
mod film;
mod loader;
mod material;
mod renderer;
mod scene;
mod surface;

pub use camera::Camera;
pub use film::Film;
pub use loader::{load_scene, SceneError, SceneResult};
pub use material::{Color, Material};
pub use renderer::{radiance, render, render_pixel, RenderConfig, HIT_EPSILON};
pub use scene::Scene;
pub use surface::{Sphere, Surface};

/// Re-export math types from glint_math
pub use glint_math::{vec3, Ray, Vec3};
