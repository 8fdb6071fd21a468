//! The tag vocabulary.
//!
//! The vocabulary is the global, ordered, duplicate-free list of tags the user
//! may choose to apply. It is independent of the pictures: a tag can live here
//! without being attached to anything, and a picture may carry a tag the
//! vocabulary does not know (for example one discovered in a newly scanned
//! directory).
//!
//! ## Tag Grammar
//!
//! See [`validation`] for the full rules. In summary a tag starts with a single
//! `@`, has no other `@`, contains no `.`, `/` or `\`, and is not empty.
//!
//! Every mutation is written to the vocabulary snapshot before returning.

pub mod validation;

use crate::error::Result;
use crate::store::{open_collection, SnapshotStore};
use std::path::{Path, PathBuf};

pub use validation::{validate_tag, TagValidationError};

/// Outcome of adding a tag to the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddTagStatus {
    Added,
    AlreadyExists,
    Rejected(TagValidationError),
}

impl AddTagStatus {
    pub fn is_added(&self) -> bool {
        matches!(self, AddTagStatus::Added)
    }

    pub fn message(&self) -> String {
        match self {
            AddTagStatus::Added => "The tag was added successfully".to_string(),
            AddTagStatus::AlreadyExists => "The Tag already exist and was not added".to_string(),
            AddTagStatus::Rejected(reason) => reason.to_string(),
        }
    }
}

pub struct TagVocabulary<S: SnapshotStore> {
    store: S,
    location: PathBuf,
    tags: Vec<String>,
}

impl<S: SnapshotStore> TagVocabulary<S> {
    /// Load the vocabulary from `location`, creating an empty snapshot if none
    /// exists.
    pub fn open(mut store: S, location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();
        let tags = open_collection(&mut store, &location)?;
        Ok(Self {
            store,
            location,
            tags,
        })
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Validate and append `tag`. Duplicates are compared case-sensitively.
    pub fn add(&mut self, tag: &str) -> Result<AddTagStatus> {
        if let Err(reason) = validate_tag(tag) {
            return Ok(AddTagStatus::Rejected(reason));
        }
        if self.contains(tag) {
            return Ok(AddTagStatus::AlreadyExists);
        }
        self.tags.push(tag.to_string());
        self.persist()?;
        Ok(AddTagStatus::Added)
    }

    /// Remove the first exact match. Removing an unknown tag succeeds: the
    /// vocabulary ends up without it either way.
    pub fn remove(&mut self, tag: &str) -> Result<()> {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        }
        self.persist()
    }

    /// Bring tags containing `keyword` to the front.
    ///
    /// Each match is inserted at position 0 as it is scanned, so matches end up
    /// in reverse scan order: `[A, B, C, D]` with matches `B` and `D` becomes
    /// `[D, B, A, C]`. Non-matching tags keep their relative order.
    pub fn sort_by_keyword(&mut self, keyword: &str) -> Result<()> {
        let mut sorted = Vec::with_capacity(self.tags.len());
        for tag in self.tags.drain(..) {
            if tag.contains(keyword) {
                sorted.insert(0, tag);
            } else {
                sorted.push(tag);
            }
        }
        self.tags = sorted;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.location, &self.tags)
    }
}
