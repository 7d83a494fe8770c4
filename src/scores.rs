use crate::core::constants::SCORE_FILE_MAGIC;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Persistent best score and run statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub best: u32,
    pub runs: u32,
    /// Unix timestamp of the last finished run.
    pub last_played: i64,
}

impl ScoreBoard {
    /// Records a finished run. Returns true if it set a new best.
    pub fn record_run(&mut self, score: u32, now: i64) -> bool {
        self.runs = self.runs.saturating_add(1);
        self.last_played = now;
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

/// Saves and loads the score board with a checksummed binary format
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Score file in the platform data directory (created if needed).
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "flappy3d").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine data directory")
        })?;

        let data_dir = project_dirs.data_dir();
        fs::create_dir_all(data_dir)?;

        Ok(Self {
            path: data_dir.join("scores.dat"),
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the board to disk
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - Serialized board (variable length)
    /// - SHA256 checksum of everything before it (32 bytes)
    pub fn save(&self, board: &ScoreBoard) -> io::Result<()> {
        let data =
            bincode::serialize(board).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SCORE_FILE_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        // Write beside the target, then rename, so a crash never leaves half a file
        let tmp_path = self.path.with_extension("dat.tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&SCORE_FILE_MAGIC.to_le_bytes())?;
            file.write_all(&data_len.to_le_bytes())?;
            file.write_all(&data)?;
            file.write_all(&checksum)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("saved scores to {}", self.path.display());
        Ok(())
    }

    /// Reads the board, verifying magic and checksum.
    ///
    /// A missing file is a fresh board, not an error.
    pub fn load(&self) -> io::Result<ScoreBoard> {
        let mut file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScoreBoard::default()),
            Err(e) => return Err(e),
        };

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SCORE_FILE_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid score file version: expected 0x{:016X}, got 0x{:016X}",
                    SCORE_FILE_MAGIC, magic
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        // The board is a few dozen bytes; anything large is corruption
        if data_len > 4096 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Score data length {} is implausible", data_len),
            ));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Deletes the score file if present.
    pub fn reset(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
