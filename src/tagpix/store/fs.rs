use super::{is_blank, SnapshotStore, EMPTY_SNAPSHOT};
use crate::error::{Result, TagpixError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use uuid::Uuid;

/// JSON snapshot files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn parent_dir(location: &Path) -> Result<&Path> {
        let parent = match location.parent() {
            Some(p) if p.as_os_str().is_empty() => Path::new("."),
            Some(p) => p,
            None => Path::new("."),
        };
        if !parent.is_dir() {
            return Err(TagpixError::Store(format!(
                "Snapshot directory does not exist: {}",
                parent.display()
            )));
        }
        Ok(parent)
    }

    fn write_atomic(location: &Path, content: &[u8]) -> Result<()> {
        let parent = Self::parent_dir(location)?;
        let stem = location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot".to_string());

        let tmp_file = parent.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(TagpixError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, location) {
            let _ = fs::remove_file(&tmp_file);
            return Err(TagpixError::Io(e));
        }
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn exists(&self, location: &Path) -> bool {
        location.is_file()
    }

    fn create(&mut self, location: &Path, overwrite: bool) -> Result<()> {
        if location.exists() && !overwrite {
            return Ok(());
        }
        Self::write_atomic(location, EMPTY_SNAPSHOT)
    }

    fn load<T: DeserializeOwned>(&mut self, location: &Path) -> Result<Vec<T>> {
        let bytes = match fs::read(location) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.create(location, true)?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(TagpixError::Io(e)),
        };

        if is_blank(&bytes) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice(&bytes) {
            Ok(items) => Ok(items),
            Err(e) => {
                log::warn!(
                    "Discarding unreadable snapshot {}: {}",
                    location.display(),
                    e
                );
                self.create(location, true)?;
                Ok(Vec::new())
            }
        }
    }

    fn save<T: Serialize>(&mut self, location: &Path, items: &[T]) -> Result<()> {
        let content = serde_json::to_vec_pretty(items).map_err(TagpixError::Serialization)?;
        Self::write_atomic(location, &content)?;
        log::debug!(
            "Saved {} record(s) to {}",
            items.len(),
            location.display()
        );
        Ok(())
    }
}
