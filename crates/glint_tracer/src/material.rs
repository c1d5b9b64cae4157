//! Material models for surface scattering.

use glint_math::{Ray, Vec3};
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How a surface scatters incoming light.
///
/// A closed set of scattering models, dispatched by pattern matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse: bounce directions biased toward the normal.
    Matte { reflectance: Color },
    /// Specular reflection with roughness. `fuzz` perturbs the mirror
    /// direction; a perturbed ray may point below the surface and is
    /// kept as-is.
    Metal { reflectance: Color, fuzz: f64 },
    /// Dielectric splitting between reflection and refraction by the
    /// Schlick approximation of Fresnel reflectance.
    Glass {
        reflectance: Color,
        refractive_index: f64,
    },
}

impl Material {
    /// Create a matte (Lambertian diffuse) material.
    pub fn matte(reflectance: Color) -> Self {
        Self::Matte { reflectance }
    }

    /// Create a metal material.
    ///
    /// - `reflectance`: the color of the metal
    /// - `fuzz`: roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(reflectance: Color, fuzz: f64) -> Self {
        Self::Metal { reflectance, fuzz }
    }

    /// Create a clear glass material.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn glass(refractive_index: f64) -> Self {
        Self::Glass {
            reflectance: Color::ONE,
            refractive_index,
        }
    }

    /// Per-bounce attenuation color.
    pub fn reflectance(&self) -> Color {
        match *self {
            Material::Matte { reflectance }
            | Material::Metal { reflectance, .. }
            | Material::Glass { reflectance, .. } => reflectance,
        }
    }

    /// Scatter an incoming ray at a hit point.
    ///
    /// `normal` is the outward unit normal at `point`; the glass model
    /// reorients it when the ray is leaving the surface. `hollow`
    /// marks a surface bounding an inner cavity, which inverts the
    /// refraction ratio a dielectric crossing uses.
    ///
    /// The returned ray starts at `point` and its direction is unit
    /// length (within 1e-9).
    pub fn scatter(
        &self,
        ray: &Ray,
        point: Vec3,
        normal: Vec3,
        hollow: bool,
        rng: &mut dyn RngCore,
    ) -> Ray {
        match *self {
            Material::Matte { .. } => {
                let direction = (normal + random_unit_vector(rng)).normalize();
                Ray::new(point, direction)
            }
            Material::Metal { fuzz, .. } => {
                let reflected = reflect(ray.direction, normal);
                let direction = (reflected + fuzz * random_unit_vector(rng)).normalize();
                Ray::new(point, direction)
            }
            Material::Glass {
                refractive_index, ..
            } => {
                let exiting = normal.dot(ray.direction) > 0.0;
                let normal = if exiting { -normal } else { normal };
                if exiting {
                    log::trace!("dielectric interior exit at {:?}", point);
                }
                let ratio = refraction_ratio(!exiting, hollow, refractive_index);

                let unit_direction = ray.direction.normalize();
                let cos_theta = (-unit_direction).dot(normal);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Total internal reflection leaves no choice; otherwise
                // split stochastically by the Fresnel reflectance
                let cannot_refract = ratio * sin_theta > 1.0;
                let direction = if cannot_refract || rng.gen::<f64>() < schlick(cos_theta, ratio) {
                    reflect(unit_direction, normal)
                } else {
                    refract(unit_direction, normal, ratio)
                };

                Ray::new(point, direction)
            }
        }
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Effective refraction ratio at a dielectric boundary.
///
/// Crossings into the dense medium (entering a solid surface, or leaving
/// the cavity of a hollow one) use the inverse index; crossings out of it
/// use the index itself.
#[inline]
fn refraction_ratio(entering: bool, hollow: bool, refractive_index: f64) -> f64 {
    if entering != hollow {
        1.0 / refractive_index
    } else {
        refractive_index
    }
}

/// Reflect a vector about a normal.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface boundary.
#[inline]
fn refract(uv: Vec3, n: Vec3, ratio: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n);
    let r_out_perp = ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation for reflectance.
#[inline]
fn schlick(cos_theta: f64, ratio: f64) -> f64 {
    let r0 = ((1.0 - ratio) / (1.0 + ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_theta).powi(5)
}

/// Sample a uniformly distributed direction on the unit sphere.
///
/// Three standard normal coordinates normalized onto the sphere.
fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(
        rng.sample(StandardNormal),
        rng.sample(StandardNormal),
        rng.sample(StandardNormal),
    )
    .normalize()
}
