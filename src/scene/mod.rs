//! 3D scene primitives: bounding boxes, camera, lights, meshes and models.

pub mod aabb;
pub mod camera;
pub mod lighting;
pub mod mesh;
pub mod model;

pub use aabb::Aabb;
pub use camera::PerspectiveCamera;
pub use lighting::{Lighting, Rgb};
pub use mesh::{Face, Geometry, Mesh, Transform};
pub use model::{Model, ModelPart};
