// src/infrastructure/shared_data_file.rs
//
// Single JSON file behind /api/saveData and /api/loadData.
//
// One file for every caller: there is no per-user isolation.
// Tracking state does not go through here (see TrackingStore).

use std::path::{Path, PathBuf};

use log::info;
use serde_json::Value;

use crate::error::AppResult;

pub struct SharedDataFile {
    path: PathBuf,
}

impl SharedDataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with pretty-printed `data`
    pub async fn save(&self, data: &Value) -> AppResult<()> {
        let json = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, json).await?;
        info!("Data saved successfully to {}", self.path.display());
        Ok(())
    }

    /// Parse the file back; a missing file is an IO error
    pub async fn load(&self) -> AppResult<Value> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}
