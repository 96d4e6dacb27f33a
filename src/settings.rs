//! Runtime settings for the shop plugin.

use crate::error::{Result, ShopError};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShopSettings {
    /// Fixed seed for level generation; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
    /// Where progress is saved; `None` keeps it in memory
    #[serde(default)]
    pub save_path: Option<PathBuf>,
    /// Save after every completed level
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_autosave() -> bool {
    true
}

impl Default for ShopSettings {
    fn default() -> Self {
        Self {
            seed: None,
            save_path: None,
            autosave: default_autosave(),
        }
    }
}

impl ShopSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ShopError::Settings)
    }

    /// Read settings from a JSON file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(contents) => Self::from_json(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }
}
