//! Ray and segment primitives for intersection testing.
//!
//! A ray is defined as r(t) = origin + t * direction, representing a semi-infinite
//! line in 3D space. A segment is the bounded counterpart between two endpoints,
//! used for occlusion tests.

use glam::Vec3A;

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// This is the camera position for primary rays or an offset surface
    /// point for bounce rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Must be non-zero but is not required to be normalized; the
    /// intersection math is normalization-agnostic.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

/// Bounded line between two points.
///
/// Used as a shadow probe between a surface point and a light position:
/// any geometry cutting the segment occludes the light.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    /// First endpoint, the surface point being shaded.
    pub start: Vec3A,
    /// Second endpoint, typically a light position.
    pub end: Vec3A,
}

impl Segment {
    /// Create a new segment between two endpoints.
    pub fn new(start: Vec3A, end: Vec3A) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -1.0));

        assert_eq!(ray.at(0.0), Vec3A::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(2.0), Vec3A::new(1.0, 2.0, 1.0));
        assert_eq!(ray.at(-1.0), Vec3A::new(1.0, 2.0, 4.0));
    }
}
