use super::backend::FavoritesBackend;
use crate::error::{QuoteError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Name of the favorites document inside the data directory.
pub const FAVORITES_FILE: &str = "quotes-favorites.json";

/// File-backed favorites storage: one JSON document in the data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(FAVORITES_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(QuoteError::Io)?;
        }
        Ok(())
    }
}

impl FavoritesBackend for FsBackend {
    fn read(&self) -> Result<Option<String>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path).map_err(QuoteError::Io)?;
        Ok(Some(text))
    }

    fn write(&self, text: &str) -> Result<()> {
        self.ensure_dir(&self.root)?;

        // Atomic write
        let tmp_path = self.root.join(format!(".favorites-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, text).map_err(QuoteError::Io)?;
        fs::rename(&tmp_path, self.path()).map_err(QuoteError::Io)?;
        Ok(())
    }
}
