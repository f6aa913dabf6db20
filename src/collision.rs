//! Ray/segment-sphere intersection kernel.
//!
//! Pure functions solving the quadratic |o + t*d - c|^2 = r^2 and turning
//! accepted roots into surface contacts, plus the nearest-hit ordering used
//! to pick among candidate contacts.

use std::cmp::Ordering;

use glam::Vec3A;

use crate::ray::{Ray, Segment};
use crate::scene::Sphere;

/// Result of a successful intersection.
///
/// `geometry` is the index of the hit sphere in the scene's object list, a
/// stable identifier rather than a live reference so contacts stay cheap to
/// copy across parallel per-pixel tasks. It is used to look up the sphere's
/// material and to exclude the sphere from its own shadow tests.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Intersection point in world coordinates.
    pub position: Vec3A,
    /// Unit surface normal, pointing outward from the sphere center.
    pub normal: Vec3A,
    /// Index of the intersected sphere in the scene's object list.
    pub geometry: usize,
}

/// Solve the ray-sphere quadratic for the near root.
///
/// Returns None when the discriminant is negative (the sphere is missed
/// entirely; tangential grazes resolve by discriminant sign alone, with no
/// epsilon margin). Otherwise returns the near root only -- intersection from
/// inside a sphere is not meaningfully defined here. The sign of t is not
/// validated; callers decide which parameter ranges they accept.
pub fn ray_sphere_t(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()) / (2.0 * a))
}

/// Intersect a ray with a sphere.
///
/// Roots behind the ray origin (t < 0) are treated as non-hits; a visibility
/// ray cannot see backwards. `geometry` is the sphere's index in the scene
/// object list, recorded in the returned contact.
pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere, geometry: usize) -> Option<Contact> {
    let t = ray_sphere_t(ray, sphere)?;
    if t < 0.0 {
        return None;
    }

    let position = ray.at(t);
    let normal = (position - sphere.center).normalize();
    Some(Contact {
        position,
        normal,
        geometry,
    })
}

/// Intersect a bounded segment with a sphere.
///
/// The segment is parametrized as a ray from `start` with direction
/// `end - start`, so t in [0, 1] spans exactly the segment; intersections at
/// the very endpoints still count as occluding. Used for shadow probes
/// between a surface point and a light position.
pub fn intersect_seg_sphere(seg: &Segment, sphere: &Sphere, geometry: usize) -> Option<Contact> {
    let ray = Ray::new(seg.start, seg.end - seg.start);
    let t = ray_sphere_t(&ray, sphere)?;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    let position = ray.at(t);
    let normal = (position - sphere.center).normalize();
    Some(Contact {
        position,
        normal,
        geometry,
    })
}

/// Ordering of contacts by squared Euclidean distance from a point.
///
/// Deliberately compares distance from the ray origin to each contact
/// position rather than intersection parameters; for convex non-overlapping
/// spheres both give a correct nearest hit. Ties keep input order when used
/// with `Iterator::min_by`, which returns the first of equal elements.
pub fn closest_to(point: Vec3A) -> impl Fn(&Contact, &Contact) -> Ordering {
    move |a, b| {
        let da = (a.position - point).length_squared();
        let db = (b.position - point).length_squared();
        da.total_cmp(&db)
    }
}
