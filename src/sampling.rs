//! Importance-sampled hemisphere direction generation.
//!
//! Generic over any [`rand::Rng`] so production code can pass the thread-local
//! ChaCha20 source while tests inject a seeded one.

use glam::Vec3A;
use rand::Rng;

/// Build an orthonormal basis whose third axis is the given unit normal.
///
/// The reference axis is world Y unless the normal is nearly parallel to it
/// (|n.y| >= 0.9), in which case world X is used to keep the cross products
/// well-conditioned. The 0.9 threshold is a tuning choice, not a physical
/// constant.
fn orthonormal_basis(normal: Vec3A) -> (Vec3A, Vec3A) {
    let reference = if normal.y.abs() >= 0.9 {
        Vec3A::X
    } else {
        Vec3A::Y
    };
    let tangent = normal.cross(reference).normalize();
    let bitangent = normal.cross(tangent);
    (tangent, bitangent)
}

/// Sample a cosine-weighted direction on the hemisphere around `normal`.
///
/// Malley's method: a uniform point on the unit disk (r = sqrt(U1),
/// theta = 2*pi*U2) lifted onto the hemisphere, then rotated from local
/// Z-up space into world space around the normal. The resulting pdf is
/// cos(theta) / pi, which cancels analytically against the Lambertian
/// cosine and 1/pi factors in the light transport estimator.
pub fn cosine_weighted_hemisphere<R: Rng>(normal: Vec3A, rng: &mut R) -> Vec3A {
    let r = rng.random::<f32>().sqrt();
    let theta = 2.0 * std::f32::consts::PI * rng.random::<f32>();

    let x = r * theta.cos();
    let y = r * theta.sin();
    let z = (1.0 - x * x - y * y).max(0.0).sqrt();

    let (tangent, bitangent) = orthonormal_basis(normal);
    x * tangent + y * bitangent + z * normal
}
