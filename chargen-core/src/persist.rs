//! Roster persistence for save/load functionality.
//!
//! A roster is the catalog plus every stored character, written as a single
//! versioned JSON document.

use crate::catalog::Catalog;
use crate::character::Character;
use crate::store::{CharacterStore, MemoryStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current roster file version.
const ROSTER_VERSION: u32 = 1;

/// A saved catalog and its characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRoster {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the roster was saved.
    pub saved_at: DateTime<Utc>,

    pub catalog: Catalog,

    pub characters: Vec<Character>,
}

impl SavedRoster {
    /// Snapshot a catalog and store.
    pub fn new(catalog: &Catalog, store: &impl CharacterStore) -> Self {
        Self {
            version: ROSTER_VERSION,
            saved_at: Utc::now(),
            catalog: catalog.clone(),
            characters: store.list(),
        }
    }

    /// Split back into a catalog and an in-memory store.
    pub fn into_parts(self) -> (Catalog, MemoryStore) {
        (self.catalog, MemoryStore::from_characters(self.characters))
    }

    /// Save to a JSON file, creating parent directories as needed.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        info!(path = %path.display(), characters = self.characters.len(), "Saved roster");
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let saved: Self = serde_json::from_str(&content)?;

        if saved.version != ROSTER_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: ROSTER_VERSION,
                found: saved.version,
            });
        }

        Ok(saved)
    }

    /// Load a roster, or start an empty one if the file does not exist yet.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        if !fs::try_exists(path).await? {
            return Ok(Self::new(&Catalog::new(), &MemoryStore::new()));
        }
        Self::load_json(path).await
    }
}
