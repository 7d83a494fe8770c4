//! flappy3d - a flappy bird game rendered as a 3D scene in the terminal.
//!
//! The library holds everything except terminal setup and the main loop, so
//! the game can be driven from tests.

pub mod audio;
pub mod build_info;
pub mod cli;
pub mod core;
pub mod game;
pub mod input;
pub mod render;
pub mod scene;
pub mod scores;
pub mod ui;

pub use crate::core::constants::FRAME_MS;
pub use crate::core::GameConfig;
pub use game::{FlappyGame, GameEvent, GameInput};
