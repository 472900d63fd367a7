//! Durable string key-value storage, the client's equivalent of a browser's
//! `localStorage`.
//!
//! Items live in a single JSON object on disk. Every write rewrites the file
//! through a temporary sibling and a rename, so a crash never leaves a torn
//! file behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{ClientError, Result};

const STORAGE_FILE: &str = "local_storage.json";

pub struct LocalStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Open the storage file in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "buzzin", "buzzin").ok_or(ClientError::NoDataDir)?;
        Self::open(&project_dirs.data_dir().join(STORAGE_FILE))
    }

    /// Open (or lazily create) storage backed by `path`.
    ///
    /// A missing file is an empty store. An unreadable one is logged and
    /// treated as empty; it is replaced on the next write.
    pub fn open(path: &Path) -> Result<Self> {
        let items = match std::fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "corrupt local storage, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            items,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.items.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(&self.items)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
