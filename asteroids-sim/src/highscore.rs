//! High-score persistence.
//!
//! The best score is kept as a single decimal number in a text file.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::HighScoreError;

/// Default high-score file name, relative to the working directory.
pub const DEFAULT_HIGHSCORE_FILE: &str = "highscore.txt";

/// File-backed high-score store.
#[derive(Clone, Debug)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl Default for HighScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHSCORE_FILE)
    }
}

impl HighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored high score.
    ///
    /// A missing or unreadable file counts as 0.
    pub fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No high score file at {}", self.path.display());
                return 0;
            }
            Err(e) => {
                warn!("Failed to read high score from {}: {}", self.path.display(), e);
                return 0;
            }
        };

        match text.trim().parse::<u32>() {
            Ok(score) => score,
            Err(e) => {
                warn!("Ignoring corrupt high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    /// Write `score` as the new high score.
    pub fn save(&self, score: u32) -> Result<(), HighScoreError> {
        fs::write(&self.path, score.to_string()).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved high score {} to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join(DEFAULT_HIGHSCORE_FILE));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.txt"));

        store.save(12_340).unwrap();
        assert_eq!(store.load(), 12_340);
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "12340");

        store.save(50).unwrap();
        assert_eq!(store.load(), 50);
    }

    #[test]
    fn test_corrupt_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        fs::write(&path, "lots").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 0);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        fs::write(&path, "  700\n").unwrap();
        assert_eq!(HighScoreStore::new(&path).load(), 700);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("nope").join("scores.txt"));
        assert!(matches!(store.save(10), Err(HighScoreError::Io { .. })));
    }
}
