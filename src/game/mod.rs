//! The flappy bird game: state, input handling and the per-frame update.
//!
//! A bird falls under gravity, gets an upward impulse on input, and must pass
//! through the gaps between scrolling obstacle pairs without touching them,
//! the ground or the ceiling.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
