//! Scene data model and JSON scene loading.
//!
//! A scene is a camera, a name→material mapping, and an ordered list of
//! objects (spheres and point lights sharing one list). Scenes are built once
//! by the loader or the demo generator and are read-only during rendering.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3A;
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Diffuse surface material.
///
/// The only material model: a single-albedo Lambertian surface. One material
/// may be shared by any number of spheres through the scene's name mapping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Material {
    /// Surface reflectance per channel, each component in [0, 1].
    pub albedo: Color,
}

/// Sphere primitive defined by center, radius, and material name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    pub radius: f32,

    /// Name of the material in the scene's material mapping.
    pub material: String,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material: material.into(),
        }
    }
}

/// Isotropic point light source.
///
/// Lights emit uniformly in all directions and are not occluders themselves:
/// shadow probes pass through them freely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Light {
    /// Position of the emitter in world coordinates.
    pub position: Vec3A,

    /// Total emitted radiant power in watts.
    pub radiant_power: f32,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3A, radiant_power: f32) -> Self {
        Self {
            position,
            radiant_power,
        }
    }
}

/// Scene object: a sphere or a point light.
///
/// Spheres and lights share one ordered list; each consumer filters the
/// variant it cares about (the nearest-hit search scans spheres, the direct
/// lighting loop scans lights).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneObject {
    /// Solid geometry that rays intersect.
    Sphere(Sphere),
    /// Emitter evaluated by the direct lighting loop.
    Light(Light),
}

/// Complete scene description.
///
/// Read-only input to the tracer; nothing mutates a scene during a render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Perspective camera settings.
    pub camera: Camera,

    /// Named materials referenced by spheres.
    pub materials: HashMap<String, Material>,

    /// Ordered list of spheres and lights.
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Create an empty scene with the given camera.
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            materials: HashMap::new(),
            objects: Vec::new(),
        }
    }

    /// Register a material under a name.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.insert(name.into(), material);
    }

    /// Append an object to the scene.
    pub fn add(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Iterate over the spheres in the scene, with their object-list indices.
    ///
    /// The index is the stable identifier carried by [`crate::collision::Contact`]
    /// to refer back to the hit sphere.
    pub fn spheres(&self) -> impl Iterator<Item = (usize, &Sphere)> {
        self.objects.iter().enumerate().filter_map(|(index, object)| match object {
            SceneObject::Sphere(sphere) => Some((index, sphere)),
            SceneObject::Light(_) => None,
        })
    }

    /// Iterate over the point lights in the scene.
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(|object| match object {
            SceneObject::Light(light) => Some(light),
            SceneObject::Sphere(_) => None,
        })
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Parse a scene from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file.
    ///
    /// A sphere referencing a material missing from the mapping is not a load
    /// error; the tracer degrades that sphere to black at render time.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
