use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use glint_tracer::{
    load_scene, render, vec3, Camera, Color, Material, RenderConfig, Scene, Sphere, Vec3,
};

#[derive(Parser, Debug)]
#[clap(about = "Offline Monte Carlo path tracer for sphere scenes")]
struct CliArguments {
    /// Scene description file (JSON); the built-in demo scene if omitted
    #[clap(long)]
    scene: Option<PathBuf>,

    #[clap(short = 'w', long, default_value = "1920")]
    width: u32,

    #[clap(long, default_value = "1080")]
    height: u32,

    #[clap(short = 's', long, default_value = "4")]
    samples: u32,

    /// Maximum ray bounce depth
    #[clap(short = 'b', long, default_value = "5")]
    bounces: u32,

    /// Base seed for the per-row random streams
    #[clap(long, default_value = "0")]
    seed: u64,

    #[clap(short = 'o', long, default_value = "render.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = CliArguments::parse();
    ensure!(args.width > 0 && args.height > 0, "image dimensions must be positive");
    ensure!(args.samples > 0, "need at least one sample per pixel");

    let (scene, camera) = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the built-in demo scene");
            demo_scene(args.width as f64 / args.height as f64)
        }
    };

    let config = RenderConfig {
        width: args.width,
        height: args.height,
        samples_per_pixel: args.samples,
        max_depth: args.bounces,
        seed: args.seed,
    };

    let film = render(&camera, &scene, &config);

    film.save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}

/// Build the demo scene: a matte ground, a matte and a metal sphere, and
/// a glass shell with a hollow cavity.
fn demo_scene(aspect_ratio: f64) -> (Scene, Camera) {
    let mut scene = Scene::new();

    // Ground
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

    // Glass shell: solid outer wall, hollow inner wall
    scene.add(Sphere::new(vec3(-1.0, 1.0, 0.0), 0.5, Material::glass(1.5)));
    scene.add(Sphere::hollow(vec3(-1.0, 1.0, 0.0), 0.4, Material::glass(1.5)));

    let camera = Camera::new(Vec3::ZERO, aspect_ratio, 2.0);
    (scene, camera)
}
