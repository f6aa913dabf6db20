//! Radiometric evaluation and tone mapping.
//!
//! Everything here works in linear HDR space: radiance values are
//! non-negative and free to exceed 1.0 until [`tonemap_reinhard`] compresses
//! them into a displayable range.

use std::f32::consts::PI;

use glam::Vec3A;

use crate::collision::Contact;
use crate::scene::{Color, Light, Material};

/// Lambertian BRDF times the clamped cosine term.
///
/// `albedo / pi` keeps the diffuse lobe energy-conserving; the max with zero
/// kills back-facing (self-shadowed) contributions. `unit_to_light` must be
/// normalized.
pub fn lambert_term(unit_to_light: Vec3A, normal: Vec3A, material: &Material) -> Color {
    material.albedo / PI * unit_to_light.dot(normal).max(0.0)
}

/// Outgoing radiance at a contact due to one point light, ignoring occlusion.
///
/// An isotropic emitter of power P has radiant intensity P / 4pi; irradiance
/// at the surface falls off with the squared distance. Occlusion is the
/// caller's job (the tracer probes a shadow segment first). A light placed
/// exactly on the surface point divides by zero; scenes must not do that.
pub fn evaluate_point_light(light: &Light, contact: &Contact, material: &Material) -> Color {
    let to_light = light.position - contact.position;
    let falloff = 1.0 / to_light.length_squared();
    let intensity = light.radiant_power / (4.0 * PI);
    let irradiance = intensity * falloff;

    lambert_term(to_light.normalize(), contact.normal, material) * irradiance
}

/// Reinhard tone mapping, per channel c -> c / (1 + c).
///
/// Maps 0 to 0 and approaches 1 monotonically as c grows, so any
/// non-negative HDR input lands in [0, 1) without clamping. No gamma
/// correction is applied here.
pub fn tonemap_reinhard(color: Color) -> Color {
    color / (Vec3A::ONE + color)
}
