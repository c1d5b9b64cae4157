//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray propagation with a fixed bounce budget
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Row-parallel rendering with one random stream per row

use crate::camera::Camera;
use crate::film::Film;
use crate::material::Color;
use crate::scene::Scene;
use glint_math::Ray;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;

/// Minimum hit distance, so scattered rays do not re-hit the surface
/// they start on.
pub const HIT_EPSILON: f64 = 1e-3;

/// Per-row random stream for parallel rendering.
type WorkerRng = rand_xoshiro::Xoshiro256Plus;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed for the per-row random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            samples_per_pixel: 4,
            max_depth: 5,
            seed: 0,
        }
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It resolves the nearest hit,
/// scatters off the hit surface's material, and recurses with one less
/// bounce, attenuating by the surface reflectance at each step. A ray
/// that misses every surface terminates against the sky gradient; an
/// exhausted bounce budget terminates as black.
pub fn radiance(ray: &Ray, scene: &Scene, bounces: u32, rng: &mut dyn RngCore) -> Color {
    if bounces == 0 {
        return Color::ZERO;
    }

    match scene.nearest_hit(ray, HIT_EPSILON) {
        Some((surface, t)) => {
            // The last bounce is absorbed without scattering
            if bounces == 1 {
                return Color::ZERO;
            }

            let point = ray.at(t);
            let normal = surface.outward_normal(point);
            let scattered = surface
                .material()
                .scatter(ray, point, normal, surface.is_hollow(), rng);

            surface.material().reflectance() * radiance(&scattered, scene, bounces - 1, rng)
        }
        None => sky_gradient(ray),
    }
}

/// Compute the sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction.normalize();
    let s = 0.5 * (unit_direction.z + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let sky = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - s) + sky * s
}

/// Render a single pixel with jittered multi-sampling.
///
/// Pixel (0, 0) is the top-left corner of the frame; `y` must be less
/// than `config.height`.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let u = (x as f64 + rng.gen::<f64>()) / config.width as f64;
        let v = ((config.height - 1 - y) as f64 + rng.gen::<f64>()) / config.height as f64;

        let ray = camera.ray(u, v);
        pixel_color += radiance(&ray, scene, config.max_depth, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

/// Render the scene to a film buffer.
///
/// Rows render in parallel, each with its own random stream derived from
/// the base seed, so a render is reproducible for a given configuration
/// regardless of thread scheduling. A zero-sized configuration yields an
/// empty film.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> Film {
    let start = std::time::Instant::now();
    log::info!(
        "Rendering {}x{} at {} spp, depth {}",
        config.width,
        config.height,
        config.samples_per_pixel,
        config.max_depth
    );

    let mut film = Film::new(config.width, config.height);
    if film.pixels.is_empty() {
        return film;
    }
    film.pixels
        .par_chunks_mut(config.width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = WorkerRng::seed_from_u64(config.seed.wrapping_add(y as u64));
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, scene, x as u32, y as u32, config, &mut rng);
            }
        });

    log::info!("Rendered in {:?}", start.elapsed());
    film
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::surface::Sphere;
    use glint_math::{vec3, Vec3};
    use rand::rngs::StdRng;
    use rand_distr::StandardNormal;

    fn ground_scene(reflectance: Color) -> Scene {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            vec3(0.0, 0.0, -100.0),
            100.0,
            Material::matte(reflectance),
        ));
        scene
    }

    #[test]
    fn test_zero_bounces_is_black() {
        let scene = ground_scene(Color::new(0.8, 0.8, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        // Black regardless of whether the ray would hit or miss
        let hitting = Ray::new(vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, -1.0));
        let missing = Ray::new(vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, 1.0));

        assert_eq!(radiance(&hitting, &scene, 0, &mut rng), Color::ZERO);
        assert_eq!(radiance(&missing, &scene, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_last_bounce_absorbs_before_scattering() {
        let scene = ground_scene(Color::new(0.8, 0.8, 0.0));
        let hitting = Ray::new(vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, -1.0));

        let mut rng = StdRng::seed_from_u64(7);
        let mut replay = rng.clone();

        assert_eq!(radiance(&hitting, &scene, 1, &mut rng), Color::ZERO);
        // No entropy was drawn for the absorbed bounce
        assert_eq!(rng.gen::<u64>(), replay.gen::<u64>());

        // A miss with one bounce left still sees the sky
        let missing = Ray::new(vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, 1.0));
        let expected = sky_gradient(&missing);
        assert_eq!(radiance(&missing, &scene, 1, &mut rng), expected);
    }

    #[test]
    fn test_background_gradient_endpoints() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);

        let up = Ray::new(Vec3::ZERO, vec3(0.0, 0.0, 1.0));
        assert_eq!(radiance(&up, &scene, 5, &mut rng), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(Vec3::ZERO, vec3(0.0, 0.0, -1.0));
        assert_eq!(radiance(&down, &scene, 5, &mut rng), Color::ONE);
    }

    #[test]
    fn test_single_bounce_matches_background_product() {
        let reflectance = Color::new(0.7, 0.3, 0.3);
        let scene = ground_scene(reflectance);

        // Straight down from height 1 onto the top of the ground sphere:
        // hit at the origin with normal +z
        let ray = Ray::new(vec3(0.0, 0.0, 1.0), vec3(0.0, 0.0, -1.0));

        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&ray, &scene, 2, &mut rng);

        // Replay the matte scatter draws to rebuild the bounce direction
        let mut replay = StdRng::seed_from_u64(42);
        let sample = Vec3::new(
            replay.sample(StandardNormal),
            replay.sample(StandardNormal),
            replay.sample(StandardNormal),
        )
        .normalize();
        let direction = (vec3(0.0, 0.0, 1.0) + sample).normalize();
        let expected = reflectance * sky_gradient(&Ray::new(Vec3::ZERO, direction));

        assert_eq!(result, expected);
    }

    #[test]
    fn test_glass_sphere_passes_straight_through() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            vec3(0.0, 3.0, 0.0),
            1.0,
            Material::Glass {
                reflectance: Color::ONE,
                refractive_index: 1.0,
            },
        ));

        // An index-matched sphere does not bend the ray: enter at t=2,
        // leave through the far root at t=2, then escape to the sky
        let ray = Ray::new(Vec3::ZERO, vec3(0.0, 1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);
        let result = radiance(&ray, &scene, 8, &mut rng);

        let expected = sky_gradient(&Ray::new(Vec3::ZERO, vec3(0.0, 1.0, 0.0)));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_no_bounce_amplifies_energy() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            vec3(0.0, 1.0, -100.5),
            100.0,
            Material::matte(Color::new(0.8, 0.8, 0.0)),
        ));
        scene.add(Sphere::new(
            vec3(0.0, 1.0, 0.0),
            0.5,
            Material::matte(Color::new(0.7, 0.3, 0.3)),
        ));
        scene.add(Sphere::new(
            vec3(1.0, 1.0, 0.0),
            0.5,
            Material::metal(Color::new(0.8, 0.6, 0.2), 0.3),
        ));
        scene.add(Sphere::new(
            vec3(-1.0, 1.0, 0.0),
            0.5,
            Material::glass(1.5),
        ));

        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..10 {
            for j in 0..10 {
                let direction = vec3(
                    (i as f64 - 5.0) / 5.0,
                    1.0,
                    (j as f64 - 5.0) / 5.0,
                );
                let color = radiance(&Ray::new(Vec3::ZERO, direction), &scene, 8, &mut rng);

                // Reflectances and the background stay within [0, 1], so
                // every path must too
                assert!(color.x >= 0.0 && color.x <= 1.0 + 1e-12);
                assert!(color.y >= 0.0 && color.y <= 1.0 + 1e-12);
                assert!(color.z >= 0.0 && color.z <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn test_render_is_reproducible() {
        let mut scene = Scene::new();
        scene.add(Sphere::new(
            vec3(0.0, 1.0, 0.0),
            0.5,
            Material::matte(Color::new(0.7, 0.3, 0.3)),
        ));

        let camera = Camera::default();
        let config = RenderConfig {
            width: 8,
            height: 6,
            samples_per_pixel: 2,
            max_depth: 4,
            seed: 99,
        };

        let first = render(&camera, &scene, &config);
        let second = render(&camera, &scene, &config);

        assert_eq!(first.width, 8);
        assert_eq!(first.height, 6);
        assert_eq!(first.pixels, second.pixels);
    }

    #[test]
    fn test_film_rows_run_top_to_bottom() {
        // With no surfaces the image is the sky gradient: row 0 must
        // look up toward the sky color, the last row down toward white
        let scene = Scene::new();
        let camera = Camera::default();
        let config = RenderConfig {
            width: 4,
            height: 6,
            samples_per_pixel: 2,
            max_depth: 3,
            seed: 7,
        };

        let film = render(&camera, &scene, &config);
        let top = film.get(0, 0);
        let bottom = film.get(0, 5);

        // The sky endpoint has less red and green than the white one
        assert!(top.x < bottom.x);
        assert!(top.y < bottom.y);
    }

    #[test]
    fn test_render_empty_dimensions_yield_empty_film() {
        let scene = Scene::new();
        let camera = Camera::default();

        let config = RenderConfig {
            width: 0,
            height: 4,
            samples_per_pixel: 1,
            max_depth: 2,
            seed: 0,
        };
        let film = render(&camera, &scene, &config);
        assert_eq!(film.width, 0);
        assert_eq!(film.height, 4);
        assert!(film.pixels.is_empty());

        let config = RenderConfig {
            width: 3,
            height: 0,
            ..config
        };
        let film = render(&camera, &scene, &config);
        assert!(film.pixels.is_empty());
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        // With no surfaces every sample is the deterministic sky, so the
        // average equals a single sample through the same jitter
        let scene = Scene::new();
        let camera = Camera::default();
        let config = RenderConfig {
            width: 16,
            height: 9,
            samples_per_pixel: 8,
            max_depth: 3,
            seed: 0,
        };

        let mut rng = StdRng::seed_from_u64(5);
        let color = render_pixel(&camera, &scene, 3, 2, &config, &mut rng);

        // Pixel (3, 2) looks upward, so the sky there is strongly blue
        assert!(color.x > 0.0 && color.x < 1.0);
        assert!(color.z > 0.9);
        assert!(color.z >= color.x);
    }
}
