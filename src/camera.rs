//! Camera model and per-pixel ray generation.
//!
//! The camera sits at the world origin looking down the -Z axis; the only
//! free parameter is the vertical field of view. The viewport derives the
//! image-plane dimensions once per render and maps pixel indices to rays.

use glam::Vec3A;
use serde::{Deserialize, Serialize};

use crate::ray::Ray;

/// Perspective camera fixed at the origin, looking down -Z.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Camera {
    /// Create a camera with the given vertical field of view in radians.
    pub fn new(fov_y: f32) -> Self {
        Self { fov_y }
    }
}

/// Per-render ray generator.
///
/// Holds the dimensions of an image plane placed at distance 1 along the
/// view direction, computed once from the pixel resolution and the camera
/// field of view. Immutable after construction.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    width: u32,
    height: u32,
    plane_width: f32,
    plane_height: f32,
}

impl Viewport {
    /// Derive the image plane from pixel dimensions and a camera.
    pub fn new(width: u32, height: u32, camera: &Camera) -> Self {
        let plane_height = 2.0 * (camera.fov_y / 2.0).tan();
        let plane_width = plane_height * (width as f32 / height as f32);

        Self {
            width,
            height,
            plane_width,
            plane_height,
        }
    }

    /// Width of the image plane in world units.
    pub fn plane_width(&self) -> f32 {
        self.plane_width
    }

    /// Height of the image plane in world units.
    pub fn plane_height(&self) -> f32 {
        self.plane_height
    }

    /// Build the world-space ray through the center of pixel (x, y).
    ///
    /// Pixel row 0 is the top of the image while world Y increases upward,
    /// so the screen-space Y coordinate is flipped. The direction is the
    /// image-plane point itself, left unnormalized; magnitude is irrelevant
    /// for a visibility ray.
    pub fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        let sx = (2 * x + 1) as f32 / self.width as f32 - 1.0;
        let sy = 1.0 - (2 * y + 1) as f32 / self.height as f32;

        let target = Vec3A::new(
            sx * self.plane_width / 2.0,
            sy * self.plane_height / 2.0,
            -1.0,
        );
        Ray::new(Vec3A::ZERO, target)
    }
}
