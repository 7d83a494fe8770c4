//! Colours, lights and fog.

use crate::core::constants::*;
use nalgebra::Vector3;

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// From a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        Self::from_bytes([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(
            bytes[0] as f64 / 255.0,
            bytes[1] as f64 / 255.0,
            bytes[2] as f64 / 255.0,
        )
    }

    pub fn to_bytes(self) -> [u8; 3] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn add(self, other: Rgb) -> Self {
        Self::new(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    /// Component-wise product (surface colour times light colour).
    pub fn modulate(self, other: Rgb) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    pub fn lerp(self, other: Rgb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

/// Light arriving from a fixed direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vector3<f64>,
    pub color: Rgb,
    pub intensity: f64,
}

impl DirectionalLight {
    pub fn new(direction: [f64; 3], color: Rgb, intensity: f64) -> Self {
        let direction = Vector3::from(direction)
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::y);
        Self {
            direction,
            color,
            intensity,
        }
    }
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Rgb,
    pub near: f64,
    pub far: f64,
}

impl Fog {
    /// Blend factor toward the fog colour at `depth`.
    pub fn factor(&self, depth: f64) -> f64 {
        if self.far <= self.near {
            return if depth >= self.far { 1.0 } else { 0.0 };
        }
        ((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub background: Rgb,
    pub ambient: Rgb,
    pub directionals: Vec<DirectionalLight>,
    pub fog: Option<Fog>,
}

impl Lighting {
    /// Sky background, dim ambient, a key light from the upper left and a
    /// weaker fill from below.
    pub fn standard() -> Self {
        let sky = Rgb::from_hex(BACKGROUND_COLOR);
        Self {
            background: sky,
            ambient: Rgb::from_hex(AMBIENT_COLOR).scale(AMBIENT_INTENSITY),
            directionals: vec![
                DirectionalLight::new(KEY_LIGHT_DIRECTION, Rgb::WHITE, KEY_LIGHT_INTENSITY),
                DirectionalLight::new(FILL_LIGHT_DIRECTION, Rgb::WHITE, FILL_LIGHT_INTENSITY),
            ],
            fog: Some(Fog {
                color: sky,
                near: FOG_NEAR,
                far: FOG_FAR,
            }),
        }
    }

    /// Lambert shading of a surface with the given unit normal.
    pub fn shade(&self, base: Rgb, normal: &Vector3<f64>) -> Rgb {
        let mut light = self.ambient;
        for dir in &self.directionals {
            let lambert = normal.dot(&dir.direction).max(0.0);
            light = light.add(dir.color.scale(lambert * dir.intensity));
        }
        base.modulate(light).clamped()
    }

    pub fn apply_fog(&self, color: Rgb, depth: f64) -> Rgb {
        match &self.fog {
            Some(fog) => color.lerp(fog.color, fog.factor(depth)),
            None => color,
        }
    }
}
