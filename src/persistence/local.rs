//! Browser LocalStorage backend

use web_sys::Storage;

use super::Store;

/// Reads and writes the `bestScore` and `gameMuted` keys
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorageStore {
    const BEST_SCORE_KEY: &'static str = "bestScore";
    const MUTED_KEY: &'static str = "gameMuted";

    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores will not persist");
        }
        Self { storage }
    }

    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {} to LocalStorage", key);
            }
        }
    }
}

impl Store for LocalStorageStore {
    fn best_score(&self) -> u32 {
        self.get(Self::BEST_SCORE_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    fn set_best_score(&mut self, score: u32) {
        self.set(Self::BEST_SCORE_KEY, &score.to_string());
    }

    fn muted(&self) -> bool {
        self.get(Self::MUTED_KEY).as_deref() == Some("true")
    }

    fn set_muted(&mut self, muted: bool) {
        self.set(Self::MUTED_KEY, if muted { "true" } else { "false" });
    }
}
