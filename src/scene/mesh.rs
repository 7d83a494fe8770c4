//! Box and plane meshes placed in the world by a transform.

use super::aabb::Aabb;
use super::lighting::Rgb;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Scale, then rotate, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub scale: Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: UnitQuaternion<f64>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_uniform_scale(mut self, scale: f64) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn apply_point(&self, p: &Point3<f64>) -> Point3<f64> {
        let scaled = self.scale.component_mul(&p.coords);
        Point3::from(self.rotation * scaled + self.position)
    }

    /// Transforms a surface normal (inverse-transpose of scale, then rotation).
    pub fn apply_normal(&self, n: &Vector3<f64>) -> Vector3<f64> {
        let inv_scaled = Vector3::new(
            safe_div(n.x, self.scale.x),
            safe_div(n.y, self.scale.y),
            safe_div(n.z, self.scale.z),
        );
        (self.rotation * inv_scaled)
            .try_normalize(f64::EPSILON)
            .unwrap_or(*n)
    }
}

fn safe_div(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Box given by its local-space corners.
    Cuboid(Aabb),
    /// Flat rectangle in the local XZ plane, facing +Y.
    Plane { width: f64, depth: f64 },
}

/// A flat-shaded quad in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub corners: [Point3<f64>; 4],
    pub normal: Vector3<f64>,
    pub color: Rgb,
}

impl Face {
    pub fn center(&self) -> Point3<f64> {
        let sum = self.corners.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / 4.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub transform: Transform,
    pub color: Rgb,
}

impl Mesh {
    pub fn cuboid(size: Vector3<f64>, transform: Transform, color: Rgb) -> Self {
        Self {
            geometry: Geometry::Cuboid(Aabb::from_center_size(Point3::origin(), size)),
            transform,
            color,
        }
    }

    pub fn plane(width: f64, depth: f64, transform: Transform, color: Rgb) -> Self {
        Self {
            geometry: Geometry::Plane { width, depth },
            transform,
            color,
        }
    }

    fn local_points(&self) -> Vec<Point3<f64>> {
        match self.geometry {
            Geometry::Cuboid(aabb) => aabb.corners().to_vec(),
            Geometry::Plane { width, depth } => plane_corners(width, depth).to_vec(),
        }
    }

    /// World-space bounding box of the transformed geometry.
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_points(
            self.local_points()
                .iter()
                .map(|p| self.transform.apply_point(p)),
        )
    }

    /// World-space quads with world normals.
    pub fn faces(&self) -> Vec<Face> {
        let local: Vec<([Point3<f64>; 4], Vector3<f64>)> = match self.geometry {
            Geometry::Cuboid(aabb) => cuboid_quads(&aabb).to_vec(),
            Geometry::Plane { width, depth } => vec![(plane_corners(width, depth), Vector3::y())],
        };

        local
            .into_iter()
            .map(|(corners, normal)| Face {
                corners: corners.map(|p| self.transform.apply_point(&p)),
                normal: self.transform.apply_normal(&normal),
                color: self.color,
            })
            .collect()
    }
}

fn plane_corners(width: f64, depth: f64) -> [Point3<f64>; 4] {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    [
        Point3::new(-hw, 0.0, -hd),
        Point3::new(hw, 0.0, -hd),
        Point3::new(hw, 0.0, hd),
        Point3::new(-hw, 0.0, hd),
    ]
}

fn cuboid_quads(aabb: &Aabb) -> [([Point3<f64>; 4], Vector3<f64>); 6] {
    let (a, b) = (aabb.min, aabb.max);
    let p = Point3::new;
    [
        (
            [p(b.x, a.y, a.z), p(b.x, b.y, a.z), p(b.x, b.y, b.z), p(b.x, a.y, b.z)],
            Vector3::x(),
        ),
        (
            [p(a.x, a.y, a.z), p(a.x, a.y, b.z), p(a.x, b.y, b.z), p(a.x, b.y, a.z)],
            -Vector3::x(),
        ),
        (
            [p(a.x, b.y, a.z), p(a.x, b.y, b.z), p(b.x, b.y, b.z), p(b.x, b.y, a.z)],
            Vector3::y(),
        ),
        (
            [p(a.x, a.y, a.z), p(b.x, a.y, a.z), p(b.x, a.y, b.z), p(a.x, a.y, b.z)],
            -Vector3::y(),
        ),
        (
            [p(a.x, a.y, b.z), p(b.x, a.y, b.z), p(b.x, b.y, b.z), p(a.x, b.y, b.z)],
            Vector3::z(),
        ),
        (
            [p(a.x, a.y, a.z), p(a.x, b.y, a.z), p(b.x, b.y, a.z), p(b.x, a.y, a.z)],
            -Vector3::z(),
        ),
    ]
}
