use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};

/// Per-field JSON key-value store. Each field lives under its own stable
/// key (`<key>.json`); there is no versioning or migration — a malformed or
/// absent value falls back to the caller's default.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("firstread");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.file_path(key);
        if !path.exists() {
            return default;
        }
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(err) => {
                    warn!("discarding malformed value for {key:?}: {err}");
                    default
                }
            },
            Err(err) => {
                warn!("failed to read {key:?}: {err}");
                default
            }
        }
    }

    /// Best-effort write: failures are logged and swallowed, in-memory state
    /// stays authoritative for the session.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.write(key, value) {
            warn!("failed to persist {key:?}: {err}");
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.file_path(key);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(value)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_key_returns_default() {
        let (_dir, store) = make_test_store();
        let value: Vec<char> = store.get("selection", vec!['a', 'b']);
        assert_eq!(value, vec!['a', 'b']);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let (_dir, store) = make_test_store();
        store.set("selection", &vec!['c', 'a', 't']);
        let value: Vec<char> = store.get("selection", Vec::new());
        assert_eq!(value, vec!['c', 'a', 't']);
    }

    #[test]
    fn test_malformed_value_falls_back_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path("game_mode"), "{not json").unwrap();
        let value: String = store.get("game_mode", "letters".to_string());
        assert_eq!(value, "letters");
    }

    #[test]
    fn test_write_leaves_no_tmp_files() {
        let (dir, store) = make_test_store();
        store.set("history", &vec![1u64, 2, 3]);
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let (_dir, store) = make_test_store();
        store.set("word_lengths", &vec![3usize, 4, 5]);
        store.set("word_lengths", &vec![4usize]);
        let value: Vec<usize> = store.get("word_lengths", Vec::new());
        assert_eq!(value, vec![4]);
    }
}
