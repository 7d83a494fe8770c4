//! Software rasteriser.
//!
//! Projects flat-shaded quads through the camera into a colour buffer with a
//! depth buffer. Faces with a corner behind the near plane are skipped rather
//! than clipped; nothing in the game gets that close to the camera.

use crate::scene::{Face, Lighting, Mesh, PerspectiveCamera, Rgb};
use nalgebra::Point3;

/// Screen-space vertex: pixel x, pixel y, NDC depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    color: Vec<Rgb>,
    depth: Vec<f64>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![Rgb::BLACK; width * height],
            depth: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.color = vec![Rgb::BLACK; width * height];
        self.depth = vec![f64::INFINITY; width * height];
    }

    pub fn clear(&mut self, background: Rgb) {
        self.color.fill(background);
        self.depth.fill(f64::INFINITY);
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.color[y * self.width + x])
        } else {
            None
        }
    }

    /// NDC to pixel coordinates (y grows downward).
    pub fn to_screen(&self, ndc: &Point3<f64>) -> ScreenVertex {
        ScreenVertex {
            x: (ndc.x + 1.0) * 0.5 * self.width as f64,
            y: (1.0 - ndc.y) * 0.5 * self.height as f64,
            z: ndc.z,
        }
    }

    /// Fills a triangle, sampling at pixel centres, keeping the nearest depth.
    pub fn fill_triangle(&mut self, v: [ScreenVertex; 3], color: Rgb) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let area = edge(&v[0], &v[1], v[2].x, v[2].y);
        if area.abs() < f64::EPSILON {
            return;
        }

        let min_x = v.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor().max(0.0);
        let max_x = v
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(self.width as f64 - 1.0);
        let min_y = v.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor().max(0.0);
        let max_y = v
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max)
            .ceil()
            .min(self.height as f64 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        for py in min_y as usize..=max_y as usize {
            for px in min_x as usize..=max_x as usize {
                let (sx, sy) = (px as f64 + 0.5, py as f64 + 0.5);
                let w0 = edge(&v[1], &v[2], sx, sy) / area;
                let w1 = edge(&v[2], &v[0], sx, sy) / area;
                let w2 = edge(&v[0], &v[1], sx, sy) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let z = w0 * v[0].z + w1 * v[1].z + w2 * v[2].z;
                let idx = py * self.width + px;
                if z < self.depth[idx] {
                    self.depth[idx] = z;
                    self.color[idx] = color;
                }
            }
        }
    }

    fn draw_face(&mut self, camera: &PerspectiveCamera, lighting: &Lighting, face: &Face) {
        let mut projected = [ScreenVertex { x: 0.0, y: 0.0, z: 0.0 }; 4];
        for (slot, corner) in projected.iter_mut().zip(face.corners.iter()) {
            match camera.project(corner) {
                Some(ndc) => *slot = self.to_screen(&ndc),
                None => return,
            }
        }

        let shaded = lighting.shade(face.color, &face.normal);
        let color = lighting.apply_fog(shaded, camera.view_depth(&face.center()));

        self.fill_triangle([projected[0], projected[1], projected[2]], color);
        self.fill_triangle([projected[0], projected[2], projected[3]], color);
    }

    /// Clears to the background and draws every mesh.
    pub fn draw_scene(&mut self, camera: &PerspectiveCamera, lighting: &Lighting, meshes: &[Mesh]) {
        self.clear(lighting.background);
        for mesh in meshes {
            for face in mesh.faces() {
                self.draw_face(camera, lighting, &face);
            }
        }
    }
}

/// Twice the signed area of (a, b, p).
fn edge(a: &ScreenVertex, b: &ScreenVertex, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}
