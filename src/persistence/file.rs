//! JSON file backend for native builds

use std::fs;
use std::path::{Path, PathBuf};

use super::{Saved, Store};

/// Persists [`Saved`] as a single JSON file, rewritten on every change
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    saved: Saved,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let saved = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(saved) => {
                    log::info!("Loaded save file {}", path.display());
                    saved
                }
                Err(e) => {
                    log::warn!("Corrupt save file {}: {} - starting fresh", path.display(), e);
                    Saved::default()
                }
            },
            Err(_) => {
                log::info!("No save file at {}, starting fresh", path.display());
                Saved::default()
            }
        };
        Self { path, saved }
    }

    /// Save file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.saved) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode save data: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            log::warn!("Failed to write {}: {}", self.path.display(), e);
        }
    }
}

impl Store for JsonFileStore {
    fn best_score(&self) -> u32 {
        self.saved.best_score
    }

    fn set_best_score(&mut self, score: u32) {
        self.saved.best_score = score;
        self.flush();
    }

    fn muted(&self) -> bool {
        self.saved.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.saved.muted = muted;
        self.flush();
    }
}
