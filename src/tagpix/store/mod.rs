//! # Storage Layer
//!
//! Every durable collection in tagpix (the picture index, the tag vocabulary and
//! the change log) is an ordered sequence of records persisted as one flat
//! snapshot. The [`SnapshotStore`] trait is the whole contract: check, create,
//! load everything, replace everything.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One JSON array per snapshot location
//!   - Writes go through a temp file and a rename, so a crash mid-write leaves
//!     the previous snapshot intact
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - Keeps the serialized bytes per location, so corruption recovery can be
//!     exercised without a filesystem
//!
//! ## Recovery Semantics
//!
//! A snapshot that cannot be deserialized is **discarded**: `load` recreates it
//! empty and returns an empty collection. Corruption never blocks startup, at
//! the price of silently losing that collection's history.
//!
//! ## Scalability
//!
//! Callers save the entire collection after every mutation. This is fine for a
//! personal photo library and keeps recovery trivial, but cost grows linearly
//! with the number of records.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Abstract interface for whole-collection snapshot persistence.
pub trait SnapshotStore {
    /// Whether a snapshot exists at `location`.
    fn exists(&self, location: &Path) -> bool;

    /// Create an empty snapshot. An existing one is only replaced when
    /// `overwrite` is set.
    fn create(&mut self, location: &Path, overwrite: bool) -> Result<()>;

    /// Load the whole collection. Unreadable contents are replaced by an empty
    /// snapshot and an empty collection is returned.
    fn load<T: DeserializeOwned>(&mut self, location: &Path) -> Result<Vec<T>>;

    /// Replace the whole collection.
    fn save<T: Serialize>(&mut self, location: &Path, items: &[T]) -> Result<()>;
}

/// Startup sequence shared by every durable collection: load the snapshot if
/// there is one, create it otherwise, then write back what was loaded.
pub fn open_collection<S, T>(store: &mut S, location: &Path) -> Result<Vec<T>>
where
    S: SnapshotStore,
    T: Serialize + DeserializeOwned,
{
    let items = if store.exists(location) {
        store.load(location)?
    } else {
        store.create(location, false)?;
        Vec::new()
    };
    store.save(location, &items)?;
    Ok(items)
}

/// Snapshots of a collection with no records are written as an empty JSON
/// array; blank files are accepted as empty too.
pub(crate) const EMPTY_SNAPSHOT: &[u8] = b"[]";

pub(crate) fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| b.is_ascii_whitespace())
}
