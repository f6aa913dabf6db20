//! Image encoding and writing.
//!
//! The renderer hands this module an unclamped linear HDR buffer. Two
//! encodings are supported:
//!
//! - PNG: Reinhard tone mapping compresses the HDR estimate into [0, 1),
//!   then the sRGB transfer curve and 8-bit quantization make it displayable.
//! - EXR: the linear values are written as-is at full f32 precision, for
//!   viewing with an HDR-aware tool or downstream grading.
//!
//! I/O failures are logged as warnings rather than aborting; by the time an
//! image is being written the render itself has already succeeded.

use image::{ImageBuffer, Rgb};
use log::{info, warn};

use glam::Vec3A;
use lumenpath::shading::tonemap_reinhard;

/// Save an f32 HDR image as an 8-bit PNG.
///
/// Applies Reinhard tone mapping followed by the sRGB transfer curve
/// (linear segment below 0.0031308, power curve above) before quantizing to
/// bytes. Tone mapping already bounds every channel below 1.0, so no clamp
/// is needed on the way in.
pub fn save_image_as_png(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let linear_to_srgb = |linear: f32| -> f32 {
        if linear <= 0.0 {
            0.0
        } else if linear <= 0.0031308 {
            12.92 * linear
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        }
    };

    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            let mapped = tonemap_reinhard(Vec3A::new(pixel[0], pixel[1], pixel[2]));

            Rgb([
                (linear_to_srgb(mapped.x) * 255.0) as u8,
                (linear_to_srgb(mapped.y) * 255.0) as u8,
                (linear_to_srgb(mapped.z) * 255.0) as u8,
            ])
        });

    match u8_image.save(output_path) {
        Ok(_) => info!("Image saved as {}", output_path),
        Err(e) => warn!("Failed to save image: {}", e),
    }
}

/// Save an f32 HDR image as EXR with full linear precision.
///
/// No tone mapping and no gamma: the file carries the raw radiance
/// estimates so the display transform can be chosen later.
pub fn save_image_as_exr(image: &ImageBuffer<Rgb<f32>, Vec<f32>>, output_path: &str) {
    let width = image.width() as usize;
    let pixels = image
        .pixels()
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect::<Vec<(f32, f32, f32)>>();

    let result = exr::prelude::write_rgb_file(
        output_path,
        width,
        image.height() as usize,
        |x, y| pixels[y * width + x],
    );

    match result {
        Ok(_) => info!("HDR image saved as EXR: {}", output_path),
        Err(e) => warn!("Failed to save EXR image: {}", e),
    }
}
