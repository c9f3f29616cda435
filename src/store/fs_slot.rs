use super::slot::{Slot, SlotBackend};
use crate::error::{Result, ThoughtzError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem slot backend: one JSON file per slot in a data directory.
#[derive(Debug, Clone)]
pub struct FsSlots {
    root: PathBuf,
}

impl FsSlots {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, slot: Slot) -> PathBuf {
        self.root.join(format!("{}.json", slot.key()))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(ThoughtzError::Io)?;
        }
        Ok(())
    }
}

impl SlotBackend for FsSlots {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let value = fs::read_to_string(path).map_err(ThoughtzError::Io)?;
        Ok(Some(value))
    }

    fn write(&self, slot: Slot, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.slot_path(slot);

        // Atomic write
        let tmp = self
            .root
            .join(format!(".{}-{}.tmp", slot.key(), Uuid::new_v4()));
        fs::write(&tmp, value).map_err(ThoughtzError::Io)?;
        if let Err(e) = fs::rename(&tmp, target) {
            let _ = fs::remove_file(&tmp);
            return Err(ThoughtzError::Io(e));
        }

        Ok(())
    }

    fn clear(&self, slot: Slot) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(path).map_err(ThoughtzError::Io)?;
        }
        Ok(())
    }
}
