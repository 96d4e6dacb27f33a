// game/progress.rs

use super::scoring::LevelResult;
use crate::error::{Result, ShopError};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Progress kept between runs
///
/// Field names match the save format of the browser version.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProgress {
    /// Next level to play
    #[serde(default = "default_current_level")]
    pub current_level: u32,
    #[serde(default)]
    pub total_score: u64,
    /// Best star rating per level
    #[serde(default)]
    pub level_stars: BTreeMap<u32, u8>,
}

fn default_current_level() -> u32 {
    1
}

impl Default for PersistedProgress {
    fn default() -> Self {
        Self {
            current_level: default_current_level(),
            total_score: 0,
            level_stars: BTreeMap::new(),
        }
    }
}

impl PersistedProgress {
    /// Fold a completed level into the running totals
    ///
    /// Score always accumulates. Stars and the next level only ever go up.
    pub fn record(&mut self, result: &LevelResult) {
        self.total_score += result.score;

        let best = self.level_stars.entry(result.level).or_insert(0);
        *best = (*best).max(result.stars);

        self.current_level = self.current_level.max(result.level.saturating_add(1));
    }

    pub fn best_stars(&self, level: u32) -> Option<u8> {
        self.level_stars.get(&level).copied()
    }

    /// Sum of best stars over all played levels
    pub fn total_stars(&self) -> u32 {
        self.level_stars.values().map(|&s| s as u32).sum()
    }

    /// Back to a fresh game
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Somewhere progress can be read from and written to
pub trait ProgressStore: Send + Sync {
    /// Stored progress, or the default when nothing has been saved yet
    fn load(&self) -> Result<PersistedProgress>;
    fn save(&self, progress: &PersistedProgress) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Keeps progress in memory only
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<PersistedProgress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<PersistedProgress> {
        let saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        Ok(saved.clone().unwrap_or_default())
    }

    fn save(&self, progress: &PersistedProgress) -> Result<()> {
        let mut saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        *saved = Some(progress.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        *saved = None;
        Ok(())
    }
}

/// Stores progress as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<PersistedProgress> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(PersistedProgress::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(|source| ShopError::Persistence {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, progress: &PersistedProgress) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(progress).map_err(|source| {
            ShopError::Persistence {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(level: u32, score: u64, stars: u8) -> LevelResult {
        LevelResult {
            level,
            score,
            stars,
            elapsed_seconds: 20.0,
            mistakes: 0,
            items_found: 2,
        }
    }

    #[test]
    fn test_default_progress() {
        let progress = PersistedProgress::default();
        assert_eq!(progress.current_level, 1);
        assert_eq!(progress.total_score, 0);
        assert!(progress.level_stars.is_empty());
    }

    #[test]
    fn test_record_accumulates_score() {
        let mut progress = PersistedProgress::default();
        progress.record(&result(1, 550, 3));
        progress.record(&result(2, 300, 2));

        assert_eq!(progress.total_score, 850);
        assert_eq!(progress.current_level, 3);
        assert_eq!(progress.best_stars(1), Some(3));
        assert_eq!(progress.best_stars(2), Some(2));
        assert_eq!(progress.best_stars(3), None);
        assert_eq!(progress.total_stars(), 5);
    }

    #[test]
    fn test_replay_never_lowers_stars() {
        let mut progress = PersistedProgress::default();
        progress.record(&result(1, 550, 3));
        progress.record(&result(1, 100, 1));

        assert_eq!(progress.best_stars(1), Some(3));
        // Score still counts on a worse replay
        assert_eq!(progress.total_score, 650);

        progress.record(&result(4, 100, 1));
        progress.record(&result(4, 100, 2));
        assert_eq!(progress.best_stars(4), Some(2));
    }

    #[test]
    fn test_replaying_old_level_keeps_current_level() {
        let mut progress = PersistedProgress::default();
        progress.record(&result(5, 100, 2));
        progress.record(&result(2, 100, 2));
        assert_eq!(progress.current_level, 6);
    }

    #[test]
    fn test_record_last_level_number() {
        let mut progress = PersistedProgress::default();
        progress.record(&result(u32::MAX, 100, 2));
        assert_eq!(progress.current_level, u32::MAX);
        assert_eq!(progress.best_stars(u32::MAX), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut progress = PersistedProgress::default();
        progress.record(&result(1, 550, 3));
        progress.reset();
        assert_eq!(progress, PersistedProgress::default());
    }

    #[test]
    fn test_save_format() {
        let mut progress = PersistedProgress::default();
        progress.record(&result(1, 550, 3));

        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "currentLevel": 2,
                "totalScore": 550,
                "levelStars": { "1": 3 }
            })
        );
    }

    #[test]
    fn test_partial_save_uses_defaults() {
        let progress: PersistedProgress = serde_json::from_str(r#"{"totalScore": 40}"#).unwrap();
        assert_eq!(progress.current_level, 1);
        assert_eq!(progress.total_score, 40);
        assert!(progress.level_stars.is_empty());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), PersistedProgress::default());

        let mut progress = PersistedProgress::default();
        progress.record(&result(1, 550, 3));
        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), progress);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), PersistedProgress::default());
    }

    #[test]
    fn test_json_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("saves").join("progress.json"));

        // Missing file loads as a fresh game
        assert_eq!(store.load().unwrap(), PersistedProgress::default());

        let mut progress = PersistedProgress::default();
        progress.record(&result(3, 900, 2));
        store.save(&progress).unwrap();
        assert_eq!(store.load().unwrap(), progress);

        store.clear().unwrap();
        assert!(!store.path().exists());
        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_json_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ShopError::Persistence { .. }));
    }
}
