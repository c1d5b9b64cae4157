//! Sphere primitive and the surface variants a scene can hold.

use crate::material::Material;
use glint_math::{Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    /// Marks the sphere as the boundary of an inner cavity rather than a
    /// solid body; dielectric refraction ratios invert across it.
    pub hollow: bool,
    pub material: Material,
}

impl Sphere {
    /// Create a new solid sphere.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            hollow: false,
            material,
        }
    }

    /// Create a hollow sphere, the inner wall of a shell.
    pub fn hollow(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            hollow: true,
            material,
        }
    }

    /// Solve for the nearest intersection parameter past `t_min`.
    ///
    /// Uses the half-b simplified quadratic. The near root is preferred;
    /// when it does not clear `t_min` the far root is tried, so a ray
    /// starting inside the sphere still finds its exit point.
    pub fn intersect(&self, ray: &Ray, t_min: f64) -> Option<f64> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        let mut root = (-half_b - sqrtd) / a;
        if root <= t_min {
            root = (-half_b + sqrtd) / a;
            if root <= t_min {
                return None;
            }
        }
        Some(root)
    }

    /// Outward unit normal at a point on the sphere.
    #[inline]
    pub fn outward_normal(&self, point: Vec3) -> Vec3 {
        (point - self.center) / self.radius
    }
}

/// A surface in the scene registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Sphere(Sphere),
}

impl Surface {
    /// Nearest intersection parameter past `t_min`, if any.
    pub fn intersect(&self, ray: &Ray, t_min: f64) -> Option<f64> {
        match self {
            Surface::Sphere(sphere) => sphere.intersect(ray, t_min),
        }
    }

    /// Outward unit normal at a point on the surface.
    pub fn outward_normal(&self, point: Vec3) -> Vec3 {
        match self {
            Surface::Sphere(sphere) => sphere.outward_normal(point),
        }
    }

    /// The surface's material.
    pub fn material(&self) -> &Material {
        match self {
            Surface::Sphere(sphere) => &sphere.material,
        }
    }

    /// Whether the surface bounds an inner cavity.
    pub fn is_hollow(&self) -> bool {
        match self {
            Surface::Sphere(sphere) => sphere.hollow,
        }
    }
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}
