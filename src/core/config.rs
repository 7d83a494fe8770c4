//! User-tunable game configuration.
//!
//! Read from `config.json` in the platform config directory. Every field has a
//! default, so a partial file (or no file at all) is valid.

use super::constants::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Gravity and flap impulse, both in world units per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f64,
    pub flap_strength: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_strength: FLAP_STRENGTH,
        }
    }
}

/// Obstacle geometry, scroll speed and spawn cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    pub width: f64,
    pub height: f64,
    pub gap: f64,
    pub speed: f64,
    pub spawn_interval: u32,
    pub spawn_x: f64,
    pub despawn_x: f64,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            width: OBSTACLE_WIDTH,
            height: OBSTACLE_HEIGHT,
            gap: OBSTACLE_GAP,
            speed: OBSTACLE_SPEED,
            spawn_interval: OBSTACLE_INTERVAL_FRAMES,
            spawn_x: OBSTACLE_SPAWN_X,
            despawn_x: OBSTACLE_DESPAWN_X,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f64,
    pub position: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: CAMERA_FOV_DEG,
            position: CAMERA_POSITION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Play sound cues. Off starts the session muted.
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub obstacles: ObstacleConfig,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
    pub frame_ms: u64,
    /// Bird model to load instead of the built-in one.
    pub model_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            obstacles: ObstacleConfig::default(),
            camera: CameraConfig::default(),
            audio: AudioConfig::default(),
            frame_ms: FRAME_MS,
            model_path: None,
        }
    }
}

impl GameConfig {
    /// Location of the config file for this platform.
    pub fn default_path() -> io::Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "flappy3d").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config directory",
            )
        })?;
        Ok(project_dirs.config_dir().join("config.json"))
    }

    /// Loads and validates the config at `path`.
    ///
    /// A missing file yields the defaults. Malformed JSON and values that fail
    /// [`GameConfig::validate`] are reported as `InvalidData`.
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };

        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> io::Result<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config
            .validate()
            .map_err(|msg| io::Error::new(io::ErrorKind::InvalidData, msg))?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Rejects values that would make the game unplayable or panic.
    pub fn validate(&self) -> Result<(), String> {
        let p = &self.physics;
        let o = &self.obstacles;

        if !(p.gravity < 0.0) {
            return Err(format!("physics.gravity must be negative, got {}", p.gravity));
        }
        if !(p.flap_strength > 0.0) {
            return Err(format!(
                "physics.flap_strength must be positive, got {}",
                p.flap_strength
            ));
        }
        for (name, value) in [
            ("obstacles.width", o.width),
            ("obstacles.height", o.height),
            ("obstacles.gap", o.gap),
            ("obstacles.speed", o.speed),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }
        if o.spawn_interval == 0 {
            return Err("obstacles.spawn_interval must be at least 1".to_string());
        }
        if !(o.spawn_x > o.despawn_x) {
            return Err(format!(
                "obstacles.spawn_x ({}) must be greater than obstacles.despawn_x ({})",
                o.spawn_x, o.despawn_x
            ));
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(format!(
                "camera.fov must be between 0 and 180 degrees, got {}",
                self.camera.fov
            ));
        }
        let position = self.camera.position;
        if position.iter().any(|v| !v.is_finite()) {
            return Err(format!("camera.position must be finite, got {:?}", position));
        }
        if position == CAMERA_TARGET {
            return Err(format!(
                "camera.position must differ from the look-at target {:?}",
                CAMERA_TARGET
            ));
        }
        // Boundaries are measured at the camera's distance from the z = 0 plane
        if !(position[2] > 0.0) {
            return Err(format!(
                "camera.position z must be in front of the play plane (> 0), got {}",
                position[2]
            ));
        }
        if self.frame_ms == 0 {
            return Err("frame_ms must be at least 1".to_string());
        }
        Ok(())
    }
}
