//! Best score and mute flag persistence
//!
//! The game only needs two values to survive a restart. Backends:
//! - [`MemoryStore`]: process-local, used by tests and throwaway runs
//! - [`JsonFileStore`]: one JSON document on disk (native)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm)
//!
//! Storage failures never reach the game: backends log and fall back to
//! defaults (best score 0, sound on).

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use serde::{Deserialize, Serialize};

/// Key-value store that outlives the process
pub trait Store {
    fn best_score(&self) -> u32;
    fn set_best_score(&mut self, score: u32);
    fn muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);
}

/// Everything that gets persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Saved {
    pub best_score: u32,
    pub muted: bool,
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub saved: Saved,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn best_score(&self) -> u32 {
        self.saved.best_score
    }

    fn set_best_score(&mut self, score: u32) {
        self.saved.best_score = score;
    }

    fn muted(&self) -> bool {
        self.saved.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.saved.muted = muted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.best_score(), 0);
        assert!(!store.muted());
    }

    #[test]
    fn test_saved_tolerates_missing_fields() {
        let saved: Saved = serde_json::from_str(r#"{ "best_score": 12 }"#).unwrap();
        assert_eq!(
            saved,
            Saved {
                best_score: 12,
                muted: false
            }
        );
    }
}
