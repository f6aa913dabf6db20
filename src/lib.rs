//! LumenPath path tracer
//!
//! Renders still images of scenes made of spheres and point lights by
//! recursive Monte Carlo light transport. The library exposes the collision
//! kernel, the shading functions, and the radiance estimator; the binary
//! wraps them with scene loading, a parallel pixel loop, and PNG/EXR output.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod collision;
pub mod random;
pub mod ray;
pub mod sampling;
pub mod scene;
pub mod shading;
pub mod tracer;
