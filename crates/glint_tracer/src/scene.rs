//! Surface registry and nearest-hit resolution.

use crate::surface::Surface;
use glint_math::Ray;

/// An ordered collection of surfaces.
///
/// Built once before rendering and read-only afterwards, so it can be
/// shared across worker threads without synchronization.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    surfaces: Vec<Surface>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }

    /// Add a surface to the registry.
    pub fn add(&mut self, surface: impl Into<Surface>) {
        self.surfaces.push(surface.into());
    }

    /// Number of surfaces in the scene.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Find the nearest surface the ray hits past `t_min`.
    ///
    /// Exact ties on the hit parameter go to the surface added first.
    pub fn nearest_hit(&self, ray: &Ray, t_min: f64) -> Option<(&Surface, f64)> {
        let mut nearest = None;
        let mut closest_so_far = f64::INFINITY;

        for surface in &self.surfaces {
            if let Some(t) = surface.intersect(ray, t_min) {
                if t < closest_so_far {
                    closest_so_far = t;
                    nearest = Some((surface, t));
                }
            }
        }

        nearest
    }
}
