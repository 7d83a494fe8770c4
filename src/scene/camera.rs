//! Perspective camera.

use crate::core::constants::{CAMERA_FAR, CAMERA_NEAR, CAMERA_TARGET};
use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f64,
    /// Width over height of the viewport.
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Point3<f64>,
    pub target: Point3<f64>,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f64, aspect: f64, position: [f64; 3]) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Self {
            fov_deg,
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Point3::from(position),
            target: Point3::from(CAMERA_TARGET),
        }
    }

    pub fn fov_rad(&self) -> f64 {
        self.fov_deg.to_radians()
    }

    /// World-to-camera transform, +Y up.
    pub fn view(&self) -> Isometry3<f64> {
        Isometry3::look_at_rh(&self.position, &self.target, &Vector3::y())
    }

    pub fn projection(&self) -> Perspective3<f64> {
        Perspective3::new(self.aspect, self.fov_rad(), self.near, self.far)
    }

    /// Updates the aspect ratio after a viewport resize.
    ///
    /// Non-finite or non-positive values are ignored.
    pub fn set_aspect(&mut self, aspect: f64) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Distance of `point` in front of the camera along its view direction.
    pub fn view_depth(&self, point: &Point3<f64>) -> f64 {
        -self.view().transform_point(point).z
    }

    /// Projects a world point into normalized device coordinates.
    ///
    /// Returns `None` for points that are not in front of the near plane.
    pub fn project(&self, point: &Point3<f64>) -> Option<Point3<f64>> {
        let view_point = self.view().transform_point(point);
        if -view_point.z < self.near {
            return None;
        }
        Some(self.projection().project_point(&view_point))
    }

    /// Width and height of the visible slice at `distance` from the camera.
    pub fn visible_extent(&self, distance: f64) -> (f64, f64) {
        let height = 2.0 * (self.fov_rad() / 2.0).tan() * distance;
        (height * self.aspect, height)
    }
}
