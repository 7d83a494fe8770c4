//! Box-based 3D models.
//!
//! A model is a list of coloured boxes in model space, stored as JSON:
//!
//! ```json
//! { "name": "bird", "parts": [ { "min": [-3, -3, -4], "max": [3, 3, 4], "color": [245, 200, 66] } ] }
//! ```
//!
//! Models face +Z; the game yaws the bird by a quarter turn so it faces +X.

use super::aabb::Aabb;
use super::lighting::Rgb;
use super::mesh::{Geometry, Mesh, Transform};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPart {
    pub min: [f64; 3],
    pub max: [f64; 3],
    pub color: [u8; 3],
}

impl ModelPart {
    fn new(min: [f64; 3], max: [f64; 3], color: u32) -> Self {
        Self {
            min,
            max,
            color: Rgb::from_hex(color).to_bytes(),
        }
    }

    pub fn local_bounds(&self) -> Aabb {
        Aabb::new(Point3::from(self.min), Point3::from(self.max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub parts: Vec<ModelPart>,
}

impl Model {
    /// Reads a model from a JSON file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> io::Result<Self> {
        let model: Self = serde_json::from_str(text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if model.parts.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("model '{}' has no parts", model.name),
            ));
        }
        if let Some(bad) = model
            .parts
            .iter()
            .flat_map(|p| p.min.iter().chain(p.max.iter()))
            .find(|v| !v.is_finite())
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("model '{}' has a non-finite coordinate: {}", model.name, bad),
            ));
        }
        Ok(model)
    }

    /// Loads `path` if given, falling back to the built-in bird on any error.
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin_bird();
        };
        match Self::load(path) {
            Ok(model) => {
                log::info!(
                    "loaded model '{}' ({} parts) from {}",
                    model.name,
                    model.parts.len(),
                    path.display()
                );
                model
            }
            Err(e) => {
                log::error!(
                    "failed to load model {}: {}; using built-in bird",
                    path.display(),
                    e
                );
                Self::builtin_bird()
            }
        }
    }

    /// The default bird, about 12 units long before scaling.
    pub fn builtin_bird() -> Self {
        Self {
            name: "bird".to_string(),
            parts: vec![
                // Body
                ModelPart::new([-3.5, -3.5, -4.5], [3.5, 3.5, 4.5], 0xf5c842),
                // Belly
                ModelPart::new([-3.0, -4.5, -3.0], [3.0, -3.0, 3.5], 0xf8e6a0),
                // Wings
                ModelPart::new([3.5, -1.0, -2.5], [4.5, 1.5, 2.0], 0xd7a523),
                ModelPart::new([-4.5, -1.0, -2.5], [-3.5, 1.5, 2.0], 0xd7a523),
                // Eyes
                ModelPart::new([1.0, 1.0, 4.5], [3.0, 3.0, 5.0], 0xffffff),
                ModelPart::new([-3.0, 1.0, 4.5], [-1.0, 3.0, 5.0], 0xffffff),
                ModelPart::new([1.8, 1.5, 5.0], [2.6, 2.5, 5.3], 0x141414),
                ModelPart::new([-2.6, 1.5, 5.0], [-1.8, 2.5, 5.3], 0x141414),
                // Beak
                ModelPart::new([-1.5, -1.5, 4.5], [1.5, 0.5, 7.0], 0xe14b23),
                // Tail
                ModelPart::new([-1.5, 0.0, -6.0], [1.5, 2.5, -4.5], 0xd7a523),
            ],
        }
    }

    /// Union of all parts in model space.
    pub fn local_bounds(&self) -> Aabb {
        self.parts
            .iter()
            .fold(Aabb::empty(), |acc, part| acc.union(&part.local_bounds()))
    }

    pub fn meshes(&self, transform: &Transform) -> Vec<Mesh> {
        self.parts
            .iter()
            .map(|part| Mesh {
                geometry: Geometry::Cuboid(part.local_bounds()),
                transform: *transform,
                color: Rgb::from_bytes(part.color),
            })
            .collect()
    }

    /// World bounding box of the whole model under `transform`.
    pub fn bounds(&self, transform: &Transform) -> Aabb {
        self.meshes(transform)
            .iter()
            .fold(Aabb::empty(), |acc, mesh| acc.union(&mesh.world_bounds()))
    }
}
