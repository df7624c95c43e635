//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::{RepositoryError, Result, SessionSnapshot, StateRepository};

/// Stores each slot as `<slot>.sav` (bincode) under a base directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-save leaves the previous save intact.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    const EXTENSION: &'static str = "sav";

    /// Create the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RepositoryError::InvalidSlot(slot.to_string()));
        }
        Ok(self
            .base_dir
            .join(format!("{slot}.{}", Self::EXTENSION)))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, slot: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.slot_path(slot)?;
        let temp_path = path.with_extension("sav.tmp");

        let bytes = snapshot.to_bytes()?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(slot, path = %path.display(), "saved session");
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SessionSnapshot>> {
        let path = self.slot_path(slot)?;
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let snapshot = SessionSnapshot::from_bytes(&bytes)?;
        tracing::debug!(slot, path = %path.display(), "loaded session");
        Ok(Some(snapshot))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_ok_and(|path| path.exists())
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(slot, "deleted session");
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(Self::EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slots.push(stem.to_string());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}
