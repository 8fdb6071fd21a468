use super::{is_blank, SnapshotStore, EMPTY_SNAPSHOT};
use crate::error::{Result, TagpixError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory storage for testing. Keeps serialized bytes per location.
/// Does NOT persist data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    snapshots: HashMap<PathBuf, Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a location with arbitrary bytes.
    pub fn put_raw(&mut self, location: &Path, bytes: Vec<u8>) {
        self.snapshots.insert(location.to_path_buf(), bytes);
    }

    pub fn raw(&self, location: &Path) -> Option<&[u8]> {
        self.snapshots.get(location).map(Vec::as_slice)
    }
}

impl SnapshotStore for InMemoryStore {
    fn exists(&self, location: &Path) -> bool {
        self.snapshots.contains_key(location)
    }

    fn create(&mut self, location: &Path, overwrite: bool) -> Result<()> {
        if overwrite || !self.exists(location) {
            self.put_raw(location, EMPTY_SNAPSHOT.to_vec());
        }
        Ok(())
    }

    fn load<T: DeserializeOwned>(&mut self, location: &Path) -> Result<Vec<T>> {
        let Some(bytes) = self.snapshots.get(location) else {
            self.create(location, true)?;
            return Ok(Vec::new());
        };
        if is_blank(bytes) {
            return Ok(Vec::new());
        }
        match serde_json::from_slice(bytes) {
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
        let bytes = serde_json::to_vec(items).map_err(TagpixError::Serialization)?;
        self.put_raw(location, bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_are_independent() {
        let mut store = InMemoryStore::new();
        let tags = PathBuf::from("tags.json");
        let log = PathBuf::from("log.json");

        store.save(&tags, &["@a".to_string()]).unwrap();
        store.save(&log, &["entry".to_string()]).unwrap();

        let loaded_tags: Vec<String> = store.load(&tags).unwrap();
        let loaded_log: Vec<String> = store.load(&log).unwrap();
        assert_eq!(loaded_tags, vec!["@a"]);
        assert_eq!(loaded_log, vec!["entry"]);
    }

    #[test]
    fn wrong_record_shape_counts_as_corruption() {
        let mut store = InMemoryStore::new();
        let location = PathBuf::from("pictures.json");
        store.save(&location, &[1u32, 2, 3]).unwrap();

        let loaded: Vec<String> = store.load(&location).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(store.raw(&location), Some(EMPTY_SNAPSHOT));
    }
}
