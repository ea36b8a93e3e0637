//! Key-value storage backends
//!
//! Native builds keep a small JSON object on disk next to the executable;
//! the browser build uses LocalStorage. Either way the game only sees a
//! [`KeyValueStore`].

use crate::highscores::KeyValueStore;

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStore;

/// The platform's persistent store
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn KeyValueStore> {
    Box::new(FileStore::new(FileStore::default_path()))
}

/// The platform's persistent store
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn KeyValueStore> {
    Box::new(LocalStore)
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use crate::highscores::{KeyValueStore, StoreError};

    /// JSON object file, rewritten atomically (tmp file + rename) on each set
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `breakout.json` beside the executable, else in the working directory
        pub fn default_path() -> PathBuf {
            if let Ok(exe) = std::env::current_exe() {
                if let Some(dir) = exe.parent() {
                    return dir.join("breakout.json");
                }
            }
            PathBuf::from("breakout.json")
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
            let json = match fs::read_to_string(&self.path) {
                Ok(json) => json,
                Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
                Err(e) => return Err(e.into()),
            };
            serde_json::from_str(&json).map_err(|e| StoreError::Corrupt(e.to_string()))
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.read_all()?.remove(key))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            // A corrupt file is replaced rather than blocking every write
            let mut entries = self.read_all().unwrap_or_default();
            entries.insert(key.to_string(), value.to_string());
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;

            let tmp = self.path.with_extension("json.tmp");
            fs::write(&tmp, json)?;
            fs::rename(&tmp, &self.path)?;
            log::debug!("Stored {} in {}", key, self.path.display());
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::highscores::{KeyValueStore, StoreError};

    /// Browser LocalStorage
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStore;

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            storage()?
                .get_item(key)
                .map_err(|_| StoreError::Unavailable)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            storage()?
                .set_item(key, value)
                .map_err(|_| StoreError::Unavailable)
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::consts::HIGH_SCORE_KEY;
    use crate::highscores::{HighScoreKeeper, StoreError};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("breakout-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = FileStore::new(temp_path("missing.json"));
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_then_get_across_instances() {
        let path = temp_path("roundtrip.json");
        let mut store = FileStore::new(&path);
        store.set(HIGH_SCORE_KEY, "12").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY).unwrap(), Some("12".to_string()));
        assert_eq!(reopened.get("other").unwrap(), Some("x".to_string()));
    }

    #[test]
    fn test_corrupt_file() {
        let path = temp_path("corrupt.json");
        std::fs::write(&path, "{{{").unwrap();
        let mut store = FileStore::new(&path);
        assert!(matches!(store.get(HIGH_SCORE_KEY), Err(StoreError::Corrupt(_))));

        // Keeper degrades to 0 and a new best overwrites the junk
        let mut keeper = HighScoreKeeper::new(Box::new(store.clone()));
        assert_eq!(keeper.best(), 0);
        keeper.record(9);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), Some("9".to_string()));

        store.set(HIGH_SCORE_KEY, "10").unwrap();
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), Some("10".to_string()));
    }
}
