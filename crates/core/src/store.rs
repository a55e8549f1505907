//! Persisted progress: the highest unlocked level.
//!
//! The save file is a small JSON object, `{"level": 3}`. A missing or
//! unreadable save means "no prior save" and starts at level 1; a failed
//! write on shutdown is reported to the caller.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub trait LevelStore {
    /// Raw stored level, `None` when nothing was saved yet.
    fn load_level(&self) -> Result<Option<i64>>;
    fn save_level(&mut self, level: u32) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SaveRecord {
    level: Option<i64>,
}

/// JSON file store at `objects.database`.
#[derive(Debug, Clone)]
pub struct JsonLevelStore {
    path: PathBuf,
}

impl JsonLevelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LevelStore for JsonLevelStore {
    fn load_level(&self) -> Result<Option<i64>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()))
            }
        };
        let record: SaveRecord = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(record.level)
    }

    fn save_level(&mut self, level: u32) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let json = serde_json::to_string(&SaveRecord {
            level: Some(level as i64),
        })?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        log::info!("saved level {} to {}", level, self.path.display());
        Ok(())
    }
}

/// Turn whatever the store returned into a playable level in
/// `1..=level_count`.
pub fn resolve_saved_level(loaded: Result<Option<i64>>, level_count: u32) -> u32 {
    let level_count = level_count.max(1);
    match loaded {
        Ok(None) => 1,
        Ok(Some(n)) if n < 1 => {
            log::warn!("saved level {} is below 1, starting at 1", n);
            1
        }
        Ok(Some(n)) if n > level_count as i64 => {
            log::warn!("saved level {} exceeds {}, clamping", n, level_count);
            level_count
        }
        Ok(Some(n)) => n as u32,
        Err(e) => {
            log::warn!("ignoring unreadable save: {:#}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir()
            .join(format!("tui-squash-{}-{}-{}", name, std::process::id(), nanos))
            .join("save.json")
    }

    #[test]
    fn test_missing_file_means_no_save() {
        let store = JsonLevelStore::new(scratch_path("missing"));
        assert_eq!(store.load_level().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("roundtrip");
        let mut store = JsonLevelStore::new(&path);
        store.save_level(4).unwrap();
        assert_eq!(store.load_level().unwrap(), Some(4));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"level":4}"#);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_absent_key_means_no_save() {
        let path = scratch_path("nokey");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"other": true}"#).unwrap();
        let store = JsonLevelStore::new(&path);
        assert_eq!(store.load_level().unwrap(), None);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_an_error_that_resolves_to_one() {
        let path = scratch_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let store = JsonLevelStore::new(&path);
        let loaded = store.load_level();
        assert!(loaded.is_err());
        assert_eq!(resolve_saved_level(loaded, 5), 1);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_resolve_saved_level_bounds() {
        assert_eq!(resolve_saved_level(Ok(None), 5), 1);
        assert_eq!(resolve_saved_level(Ok(Some(0)), 5), 1);
        assert_eq!(resolve_saved_level(Ok(Some(-3)), 5), 1);
        assert_eq!(resolve_saved_level(Ok(Some(3)), 5), 3);
        assert_eq!(resolve_saved_level(Ok(Some(9)), 5), 5);
    }
}
