//! Constants, configuration and logging shared by the rest of the crate.

pub mod config;
pub mod constants;
pub mod logging;

pub use config::GameConfig;
