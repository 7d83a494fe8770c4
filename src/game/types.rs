//! Game state for the 3D flappy bird.
//!
//! World units: +X scrolls toward the player's right, +Y is up, and all
//! physics quantities are per fixed frame.

use crate::core::config::{GameConfig, ObstacleConfig};
use crate::core::constants::*;
use crate::scene::{Aabb, Mesh, Model, PerspectiveCamera, Rgb, Transform};
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Vertical play limits derived from what the camera can see.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub y_min: f64,
    pub y_max: f64,
    pub visible_width: f64,
    pub visible_height: f64,
}

impl Boundaries {
    /// Visible slice at the camera's distance from the z = 0 plane.
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        let distance = camera.position.z;
        let (visible_width, visible_height) = camera.visible_extent(distance);
        Self {
            y_min: -visible_height / 2.0,
            y_max: visible_height / 2.0,
            visible_width,
            visible_height,
        }
    }

    /// Ground plane at `y_min`, facing up.
    pub fn ground_mesh(&self) -> Mesh {
        Mesh::plane(
            self.visible_width,
            BOUNDARY_DEPTH,
            Transform::at(0.0, self.y_min, 0.0),
            Rgb::from_hex(BOUNDARY_COLOR),
        )
    }

    /// Ceiling plane at `y_max`, facing down.
    pub fn ceiling_mesh(&self) -> Mesh {
        let flip = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI);
        Mesh::plane(
            self.visible_width,
            BOUNDARY_DEPTH,
            Transform::at(0.0, self.y_max, 0.0).with_rotation(flip),
            Rgb::from_hex(BOUNDARY_COLOR),
        )
    }
}

/// The player.
#[derive(Debug, Clone)]
pub struct Bird {
    pub model: Model,
    pub position: Vector3<f64>,
    /// Vertical velocity in units/frame (positive = up).
    pub velocity: f64,
    /// Half the largest dimension of the placed model.
    pub radius: f64,
    /// Model bounds with scale and yaw applied, centered on the bird's origin.
    local_bounds: Aabb,
}

impl Bird {
    pub fn new(model: Model) -> Self {
        let at_origin = Self::placement(Vector3::zeros());
        let local_bounds = model.bounds(&at_origin);
        let radius = if local_bounds.is_empty() || local_bounds.max_dimension() <= 0.0 {
            DEFAULT_BIRD_RADIUS
        } else {
            local_bounds.max_dimension() / 2.0
        };
        Self {
            model,
            position: Vector3::new(BIRD_START_X, BIRD_START_Y, 0.0),
            velocity: 0.0,
            radius,
            local_bounds,
        }
    }

    fn placement(position: Vector3<f64>) -> Transform {
        Transform {
            position,
            ..Transform::default()
        }
        .with_uniform_scale(BIRD_SCALE)
        .with_rotation(UnitQuaternion::from_axis_angle(&Vector3::y_axis(), BIRD_YAW))
    }

    pub fn transform(&self) -> Transform {
        Self::placement(self.position)
    }

    /// World bounding box at the current position.
    pub fn bounds(&self) -> Aabb {
        self.local_bounds.translated(self.position)
    }

    pub fn meshes(&self) -> Vec<Mesh> {
        self.model.meshes(&self.transform())
    }
}

/// A top/bottom obstacle pair with a vertical gap.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstaclePair {
    /// Horizontal center of both boxes.
    pub x: f64,
    /// Vertical center of the gap.
    pub gap_position: f64,
    /// Whether the bird has already scored this pair.
    pub passed: bool,
}

impl ObstaclePair {
    pub fn new(x: f64, gap_position: f64) -> Self {
        Self {
            x,
            gap_position,
            passed: false,
        }
    }

    pub fn top_center_y(&self, cfg: &ObstacleConfig) -> f64 {
        self.gap_position + cfg.gap / 2.0 + cfg.height / 2.0
    }

    pub fn bottom_center_y(&self, cfg: &ObstacleConfig) -> f64 {
        self.gap_position - cfg.gap / 2.0 - cfg.height / 2.0
    }

    fn size(cfg: &ObstacleConfig) -> Vector3<f64> {
        Vector3::new(cfg.width, cfg.height, OBSTACLE_DEPTH)
    }

    pub fn top_bounds(&self, cfg: &ObstacleConfig) -> Aabb {
        Aabb::from_center_size(
            Point3::new(self.x, self.top_center_y(cfg), 0.0),
            Self::size(cfg),
        )
    }

    pub fn bottom_bounds(&self, cfg: &ObstacleConfig) -> Aabb {
        Aabb::from_center_size(
            Point3::new(self.x, self.bottom_center_y(cfg), 0.0),
            Self::size(cfg),
        )
    }

    pub fn meshes(&self, cfg: &ObstacleConfig) -> [Mesh; 2] {
        let color = Rgb::from_hex(OBSTACLE_COLOR);
        [
            Mesh::cuboid(
                Self::size(cfg),
                Transform::at(self.x, self.top_center_y(cfg), 0.0),
                color,
            ),
            Mesh::cuboid(
                Self::size(cfg),
                Transform::at(self.x, self.bottom_center_y(cfg), 0.0),
                color,
            ),
        ]
    }
}

/// Input actions understood by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// Space or left click. Flaps while alive, restarts after a crash.
    Flap,
    TogglePause,
    /// Viewport resized to the given terminal cell size.
    Resize { cols: u16, rows: u16 },
}

/// Things that happened during input handling or a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flapped,
    /// A pair was passed; carries the new score.
    Scored(u32),
    ObstacleSpawned,
    Died { score: u32 },
    Restarted,
    Paused,
    Resumed,
}

/// Sound effects the frontend may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Wing,
    Point,
    Die,
    Swoosh,
}

impl GameEvent {
    pub fn sound(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Flapped => Some(SoundCue::Wing),
            GameEvent::Scored(_) => Some(SoundCue::Point),
            GameEvent::ObstacleSpawned => Some(SoundCue::Swoosh),
            GameEvent::Died { .. } => Some(SoundCue::Die),
            GameEvent::Restarted | GameEvent::Paused | GameEvent::Resumed => None,
        }
    }
}

/// Main game state.
#[derive(Debug, Clone)]
pub struct FlappyGame {
    pub config: GameConfig,
    pub camera: PerspectiveCamera,
    pub boundaries: Boundaries,
    pub bird: Bird,
    pub obstacles: Vec<ObstaclePair>,
    /// Frames since the last spawn.
    pub obstacle_timer: u32,
    pub score: u32,
    /// Halts physics and spawning until restart.
    pub game_over: bool,
    pub paused: bool,
    /// Total simulated frames.
    pub frame_count: u64,
    /// Wall time not yet consumed by a whole frame.
    pub accumulated_time_ms: u64,
}

impl FlappyGame {
    /// Create a new game for a viewport with the given pixel aspect ratio.
    pub fn new(config: GameConfig, model: Model, aspect: f64) -> Self {
        let camera = PerspectiveCamera::new(config.camera.fov, aspect, config.camera.position);
        let boundaries = Boundaries::from_camera(&camera);
        log::debug!(
            "new game: aspect {:.3}, y range [{:.3}, {:.3}]",
            camera.aspect,
            boundaries.y_min,
            boundaries.y_max
        );
        Self {
            config,
            camera,
            boundaries,
            bird: Bird::new(model),
            obstacles: Vec::new(),
            obstacle_timer: 0,
            score: 0,
            game_over: false,
            paused: false,
            frame_count: 0,
            accumulated_time_ms: 0,
        }
    }

    /// Everything to draw this frame.
    pub fn scene_meshes(&self) -> Vec<Mesh> {
        let mut meshes = vec![self.boundaries.ground_mesh(), self.boundaries.ceiling_mesh()];
        for pair in &self.obstacles {
            meshes.extend(pair.meshes(&self.config.obstacles));
        }
        meshes.extend(self.bird.meshes());
        meshes
    }
}
