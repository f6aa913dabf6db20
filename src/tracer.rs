//! Recursive Monte Carlo radiance estimator.
//!
//! Ties the collision kernel, shading, and scene model together: find the
//! nearest surface along a ray, evaluate direct lighting through shadow
//! probes, and estimate indirect lighting by cosine-importance-sampled
//! recursion.

use glam::Vec3A;
use log::warn;
use rand::Rng;

use crate::collision::{self, Contact};
use crate::ray::{Ray, Segment};
use crate::sampling::cosine_weighted_hemisphere;
use crate::scene::{Color, Scene, Sphere};
use crate::shading::evaluate_point_light;

/// Offset applied along the surface normal to bounce-ray origins, keeping
/// them clear of their own surface despite floating-point error.
const SURFACE_BIAS: f32 = 0.001;

/// Estimate the outgoing radiance along a ray.
///
/// Returns None when the recursion budget is exhausted, when the ray escapes
/// to the background, or when the hit sphere references an unknown material;
/// callers treat all three as "no radiance", never as errors. Once a surface
/// is hit and its material resolves, the result is always Some, even if the
/// radiance is zero.
///
/// Worst-case work is O(indirect_samples ^ depth) ray evaluations, so both
/// parameters should be chosen conservatively.
pub fn radiance_for_ray<R: Rng>(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    indirect_samples: u32,
    rng: &mut R,
) -> Option<Color> {
    if depth == 0 {
        return None;
    }

    let (contact, sphere) = nearest_contact(ray, scene)?;

    let Some(material) = scene.material(&sphere.material) else {
        warn!(
            "sphere at {:?} references unknown material '{}', treating as no hit",
            sphere.center, sphere.material
        );
        return None;
    };

    // Direct lighting: binary visibility per light, no partial shadowing
    let mut direct = Vec3A::ZERO;
    for light in scene.lights() {
        if !occluded(&contact, light.position, scene) {
            direct += evaluate_point_light(light, &contact, material);
        }
    }

    // Indirect lighting: cosine-weighted hemisphere samples. The sampling
    // pdf cos(theta)/pi cancels the BRDF's cosine and 1/pi factors, leaving
    // the albedo as the full per-sample weight.
    let mut indirect = Vec3A::ZERO;
    if indirect_samples > 0 {
        for _ in 0..indirect_samples {
            let direction = cosine_weighted_hemisphere(contact.normal, rng);
            let bounce = Ray::new(contact.position + contact.normal * SURFACE_BIAS, direction);
            if let Some(radiance) = radiance_for_ray(&bounce, scene, depth - 1, indirect_samples, rng)
            {
                indirect += radiance * material.albedo;
            }
        }
        indirect /= indirect_samples as f32;
    }

    Some(direct + indirect)
}

/// Find the nearest sphere contact along a ray, if any.
fn nearest_contact<'a>(ray: &Ray, scene: &'a Scene) -> Option<(Contact, &'a Sphere)> {
    let nearest = collision::closest_to(ray.origin);
    scene
        .spheres()
        .filter_map(|(index, sphere)| {
            collision::intersect_ray_sphere(ray, sphere, index).map(|contact| (contact, sphere))
        })
        .min_by(|a, b| nearest(&a.0, &b.0))
}

/// Test whether any sphere blocks the segment from a contact to a light.
///
/// The contact's own sphere is excluded by index identity; without that, the
/// probe's start point lying on the surface would shadow itself.
fn occluded(contact: &Contact, light_position: Vec3A, scene: &Scene) -> bool {
    let shadow = Segment::new(contact.position, light_position);
    scene
        .spheres()
        .filter(|(index, _)| *index != contact.geometry)
        .any(|(index, sphere)| collision::intersect_seg_sphere(&shadow, sphere, index).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::scene::{Light, Material, SceneObject};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    /// One red sphere straight down the view axis, lit from the upper right.
    fn red_sphere_scene(light_position: Vec3A) -> Scene {
        let mut scene = Scene::new(Camera::new(FRAC_PI_2));
        scene.add_material(
            "red",
            Material {
                albedo: Vec3A::new(1.0, 0.0, 0.0),
            },
        );
        scene.add(SceneObject::Sphere(Sphere::new(
            Vec3A::new(0.0, 0.0, -3.0),
            1.0,
            "red",
        )));
        scene.add(SceneObject::Light(Light::new(light_position, 1000.0)));
        scene
    }

    fn view_ray() -> Ray {
        Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn test_depth_zero_is_no_radiance() {
        let scene = red_sphere_scene(Vec3A::new(2.0, 2.0, -1.0));
        assert!(radiance_for_ray(&view_ray(), &scene, 0, 4, &mut rng()).is_none());
    }

    #[test]
    fn test_escaped_ray_is_no_radiance() {
        let scene = red_sphere_scene(Vec3A::new(2.0, 2.0, -1.0));
        let up = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert!(radiance_for_ray(&up, &scene, 3, 4, &mut rng()).is_none());
    }

    #[test]
    fn test_unknown_material_degrades_to_no_radiance() {
        let mut scene = red_sphere_scene(Vec3A::new(2.0, 2.0, -1.0));
        scene.materials.clear();
        assert!(radiance_for_ray(&view_ray(), &scene, 3, 4, &mut rng()).is_none());
    }

    #[test]
    fn test_direct_lighting_down_view_axis() {
        // The view ray enters the sphere at (0, 0, -2) where the normal is
        // +Z; the light sits in front of that tangent plane.
        let light_position = Vec3A::new(2.0, 2.0, -1.0);
        let scene = red_sphere_scene(light_position);

        let radiance = radiance_for_ray(&view_ray(), &scene, 1, 0, &mut rng()).unwrap();

        // Analytic value at the contact: |to_light|^2 = 9, n.l = 1/3
        let expected = (1.0 / PI) * (1.0 / 3.0) * (1000.0 / (4.0 * PI)) / 9.0;
        assert!((radiance.x - expected).abs() < 1e-4, "red was {}", radiance.x);
        assert_eq!(radiance.y, 0.0);
        assert_eq!(radiance.z, 0.0);
    }

    #[test]
    fn test_occlusion_is_binary() {
        let light_position = Vec3A::new(2.0, 0.0, -1.0);
        let mut scene = red_sphere_scene(light_position);

        // Unoccluded: positive red contribution
        let open = radiance_for_ray(&view_ray(), &scene, 1, 0, &mut rng()).unwrap();
        assert!(open.x > 0.0);

        // Interpose a small sphere on the shadow segment from (0, 0, -2) to
        // the light. It sits off the view axis, so the camera ray still hits
        // the red sphere first.
        scene.add_material(
            "grey",
            Material {
                albedo: Vec3A::splat(0.5),
            },
        );
        scene.add(SceneObject::Sphere(Sphere::new(
            Vec3A::new(1.0, 0.0, -1.5),
            0.3,
            "grey",
        )));

        let blocked = radiance_for_ray(&view_ray(), &scene, 1, 0, &mut rng()).unwrap();
        assert_eq!(blocked, Vec3A::ZERO);
    }

    #[test]
    fn test_self_occlusion_excluded() {
        // The shadow probe starts exactly on the hit sphere's surface; only
        // the identity exclusion keeps the sphere from shadowing itself.
        let scene = red_sphere_scene(Vec3A::new(2.0, 2.0, -1.0));
        let radiance = radiance_for_ray(&view_ray(), &scene, 1, 0, &mut rng()).unwrap();
        assert!(radiance.x > 0.0);
    }

    #[test]
    fn test_nearest_sphere_wins() {
        let mut scene = red_sphere_scene(Vec3A::new(2.0, 2.0, -1.0));
        // A second sphere behind the first on the same axis; the estimator
        // must shade the near one (green would stay zero either way, so
        // distinguish through the red channel's analytic value).
        scene.add(SceneObject::Sphere(Sphere::new(
            Vec3A::new(0.0, 0.0, -8.0),
            1.0,
            "red",
        )));

        let near_only = red_sphere_scene(Vec3A::new(2.0, 2.0, -1.0));
        let with_far = radiance_for_ray(&view_ray(), &scene, 1, 0, &mut rng()).unwrap();
        let reference = radiance_for_ray(&view_ray(), &near_only, 1, 0, &mut rng()).unwrap();
        assert_eq!(with_far, reference);
    }

    /// Ground sphere plus a small lit sphere above it: bounce rays from the
    /// ground hit the sphere on some samples and escape on others, so the
    /// indirect term genuinely varies between trials.
    fn bounce_scene() -> Scene {
        let mut scene = Scene::new(Camera::new(FRAC_PI_2));
        scene.add_material(
            "grey",
            Material {
                albedo: Vec3A::splat(0.8),
            },
        );
        scene.add_material(
            "red",
            Material {
                albedo: Vec3A::new(0.9, 0.1, 0.1),
            },
        );
        scene.add(SceneObject::Sphere(Sphere::new(
            Vec3A::new(0.0, -100.5, -2.0),
            100.0,
            "grey",
        )));
        scene.add(SceneObject::Sphere(Sphere::new(
            Vec3A::new(0.8, 0.2, -2.0),
            0.5,
            "red",
        )));
        scene.add(SceneObject::Light(Light::new(Vec3A::new(0.0, 5.0, -2.0), 2000.0)));
        scene
    }

    #[test]
    fn test_indirect_variance_shrinks_with_samples() {
        let scene = bounce_scene();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -0.5, -2.0));

        let variance_with = |samples: u32| {
            let trials: Vec<f32> = (0..50)
                .map(|seed| {
                    let mut rng = ChaCha20Rng::seed_from_u64(seed);
                    radiance_for_ray(&ray, &scene, 2, samples, &mut rng)
                        .expect("ray must hit the ground")
                        .x
                })
                .collect();
            let mean = trials.iter().sum::<f32>() / trials.len() as f32;
            trials.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / trials.len() as f32
        };

        let coarse = variance_with(1);
        let fine = variance_with(16);
        assert!(coarse > 0.0, "single-sample estimate should be noisy");
        assert!(
            fine < coarse * 0.5,
            "variance did not shrink: 1 sample {coarse}, 16 samples {fine}"
        );
    }

    #[test]
    fn test_indirect_bounce_carries_albedo() {
        // With plenty of samples the ground point picks up red bounce light;
        // averaged over many samples the green channel stays far below red
        // because the bounce surface is mostly red.
        let scene = bounce_scene();
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, -0.5, -2.0));

        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let lit = radiance_for_ray(&ray, &scene, 2, 64, &mut rng).unwrap();
        let direct_only = radiance_for_ray(&ray, &scene, 1, 0, &mut rng).unwrap();

        let indirect = lit - direct_only;
        assert!(indirect.x > 0.0, "expected red bounce light");
        assert!(indirect.x > indirect.y);
    }
}
