use clap::Parser;
use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

mod cli;
mod logger;
mod output;

use cli::Args;
use logger::init_logger;
use lumenpath::camera::{Camera, Viewport};
use lumenpath::random;
use lumenpath::scene::{Light, Material, Scene, SceneObject, Sphere};
use lumenpath::tracer::radiance_for_ray;
use output::{save_image_as_exr, save_image_as_png};

/// Build a randomized demo scene in front of the fixed camera.
///
/// A large ground sphere, a field of small diffuse spheres with randomized
/// albedos, three larger feature spheres, and two point lights overhead.
fn demo_scene() -> Scene {
    let mut scene = Scene::new(Camera::new(60.0_f32.to_radians()));

    let ground_albedo = Vec3A::splat(0.5);
    scene.add_material("ground", Material { albedo: ground_albedo });
    scene.add(SceneObject::Sphere(Sphere::new(
        Vec3A::new(0.0, -1000.5, -10.0),
        1000.0,
        "ground",
    )));

    let feature_centers = [
        Vec3A::new(-2.6, 0.5, -7.0),
        Vec3A::new(0.0, 0.5, -5.5),
        Vec3A::new(2.6, 0.5, -8.5),
    ];

    // Field of small diffuse spheres resting on the ground
    for a in -4..5 {
        for b in 3..12 {
            let center = Vec3A::new(
                a as f32 * 1.3 + random::random_f32_range(-0.3, 0.3),
                -0.1,
                -(b as f32) * 1.6 + random::random_f32_range(-0.3, 0.3),
            );

            // Keep clear of the large feature spheres
            if feature_centers.iter().any(|&f| (center - f).length() < 1.6) {
                continue;
            }

            // Mostly deep saturated albedos, with the occasional pastel
            let albedo = if random::random_f32() < 0.8 {
                random::random_color() * random::random_color()
            } else {
                random::random_color_range(0.5, 0.95)
            };

            let name = format!("diffuse_{}_{}", a, b);
            scene.add_material(name.clone(), Material { albedo });
            scene.add(SceneObject::Sphere(Sphere::new(center, 0.4, name)));
        }
    }

    // Three larger feature spheres
    scene.add_material("matte_red", Material { albedo: Vec3A::new(0.8, 0.15, 0.1) });
    scene.add_material("matte_blue", Material { albedo: Vec3A::new(0.15, 0.25, 0.8) });
    scene.add_material("matte_cream", Material { albedo: Vec3A::new(0.85, 0.8, 0.65) });
    scene.add(SceneObject::Sphere(Sphere::new(feature_centers[0], 1.0, "matte_red")));
    scene.add(SceneObject::Sphere(Sphere::new(feature_centers[1], 1.0, "matte_cream")));
    scene.add(SceneObject::Sphere(Sphere::new(feature_centers[2], 1.0, "matte_blue")));

    // Point lights above the field
    scene.add(SceneObject::Light(Light::new(Vec3A::new(5.0, 7.0, -5.0), 4000.0)));
    scene.add(SceneObject::Light(Light::new(Vec3A::new(-4.0, 6.0, -10.0), 2500.0)));

    scene
}

/// Render the scene into a linear HDR image buffer.
///
/// One primary ray per pixel through the viewport; each pixel's estimate is
/// independent, so the loop runs pixel-parallel on Rayon with the
/// thread-local uniform source feeding the estimator.
fn render(scene: &Scene, args: &Args) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
    let viewport = Viewport::new(args.width, args.height, &scene.camera);
    let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(args.width, args.height);

    info!("Rendering using {} CPU cores...", rayon::current_num_threads());
    let generation_start = std::time::Instant::now();
    let pb = ProgressBar::new((args.width * args.height) as u64);
    pb.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} ETA: {eta}").unwrap());

    image.enumerate_pixels_mut().par_bridge().for_each(|(x, y, pixel)| {
        let ray = viewport.ray_for_pixel(x, y);
        let radiance = random::with_rng(|rng| {
            radiance_for_ray(&ray, scene, args.depth, args.indirect_samples, rng)
        })
        .unwrap_or(Vec3A::ZERO);

        *pixel = Rgb([radiance.x, radiance.y, radiance.z]);
        pb.inc(1);
    });

    pb.finish();
    info!("Image generated in {:.2?}", generation_start.elapsed());

    image
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("LumenPath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let scene = match &args.scene {
        Some(path) => match Scene::from_path(path) {
            Ok(scene) => {
                info!("Loaded scene from {}", path);
                scene
            }
            Err(e) => {
                log::error!("Failed to load scene '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No scene file given, generating a randomized demo scene");
            demo_scene()
        }
    };

    info!(
        "Image resolution: {}x{}, depth: {}, indirect samples per bounce: {}",
        args.width, args.height, args.depth, args.indirect_samples
    );

    let image = render(&scene, &args);

    // Save image based on file extension
    if args.output.ends_with(".exr") {
        save_image_as_exr(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .png and .exr formats are supported.",
            std::path::Path::new(&args.output).extension().unwrap_or_default().to_string_lossy()
        );
        std::process::exit(1);
    }
}
