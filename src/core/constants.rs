// Timing
pub const FRAME_MS: u64 = 16; // ~60 FPS fixed step
pub const MAX_FRAMES_PER_ADVANCE: u32 = 5;

// Sky
pub const BACKGROUND_COLOR: u32 = 0x70c5ce;
pub const FOG_NEAR: f64 = 0.0;
pub const FOG_FAR: f64 = 1000.0;

// Camera
pub const CAMERA_FOV_DEG: f64 = 75.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 1000.0;
pub const CAMERA_POSITION: [f64; 3] = [-2.0, 1.0, 5.0];
pub const CAMERA_TARGET: [f64; 3] = [0.0, 0.0, 0.0];

// Lights
pub const AMBIENT_COLOR: u32 = 0x404040;
pub const AMBIENT_INTENSITY: f64 = 0.8;
pub const KEY_LIGHT_DIRECTION: [f64; 3] = [-2.0, 2.0, 3.0];
pub const KEY_LIGHT_INTENSITY: f64 = 1.5;
pub const FILL_LIGHT_DIRECTION: [f64; 3] = [2.0, -2.0, -3.0];
pub const FILL_LIGHT_INTENSITY: f64 = 0.5;

// Bird
pub const BIRD_SCALE: f64 = 0.08;
pub const BIRD_YAW: f64 = std::f64::consts::FRAC_PI_2;
pub const BIRD_START_X: f64 = -2.0;
pub const BIRD_START_Y: f64 = 0.0;
pub const DEFAULT_BIRD_RADIUS: f64 = 0.5;

// Physics (per frame)
pub const GRAVITY: f64 = -0.001;
pub const FLAP_STRENGTH: f64 = 0.03;

// Obstacles
pub const OBSTACLE_WIDTH: f64 = 1.0;
pub const OBSTACLE_HEIGHT: f64 = 10.0;
pub const OBSTACLE_DEPTH: f64 = 1.0;
pub const OBSTACLE_GAP: f64 = 2.0;
pub const OBSTACLE_SPEED: f64 = 0.02;
pub const OBSTACLE_INTERVAL_FRAMES: u32 = 150;
pub const OBSTACLE_SPAWN_X: f64 = 10.0;
pub const OBSTACLE_DESPAWN_X: f64 = -10.0;
pub const OBSTACLE_COLOR: u32 = 0x00ff00;

// Ground and ceiling
pub const BOUNDARY_COLOR: u32 = 0x228b22;
pub const BOUNDARY_DEPTH: f64 = 1.0;

// Score file
pub const SCORE_FILE_MAGIC: u64 = 0x464C_4150_3344_0001; // "FLAP3D" v1

// Logging
pub const LOG_ENV_VAR: &str = "FLAPPY3D_LOG";
pub const LOG_FILE_NAME: &str = "flappy3d.log";
