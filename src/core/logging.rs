//! File-backed logger.
//!
//! The terminal is owned by the renderer while the game runs, so log records
//! are appended to a file in the data directory instead of stderr.

use super::constants::{LOG_ENV_VAR, LOG_FILE_NAME};
use directories::ProjectDirs;
use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Default log file location for this platform.
pub fn default_log_path() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "flappy3d").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
    })?;
    Ok(project_dirs.data_dir().join(LOG_FILE_NAME))
}

/// Installs the global logger, appending to `path`.
///
/// The filter is read from `FLAPPY3D_LOG` (default `info`). Calling this more
/// than once keeps the first logger.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let result = env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV_VAR, "info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    if result.is_ok() {
        log::info!("logging to {}", path.display());
    }
    Ok(())
}
