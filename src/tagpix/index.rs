//! # Picture Index
//!
//! The index owns every [`Picture`] ever discovered and is the only code that
//! renames picture files. Every mutation follows the same sequence:
//!
//! ```text
//! validate -> compute candidate path -> collision check -> rename file -> commit -> save
//! ```
//!
//! ## Identity
//!
//! Pictures are addressed by their stable `id`. Paths change with every rename,
//! so the path lookup is a derived map that is updated after each commit.
//!
//! ## Failure Semantics
//!
//! Expected outcomes (malformed tag, tag already applied, tag not attached,
//! name collision) are returned as [`TagChange`] values and leave everything untouched.
//! Filesystem failures are errors. The physical rename happens before the
//! in-memory commit, so a failed rename leaves the picture exactly as it was.
//!
//! ## Invariants
//!
//! - No two pictures share a `path`
//! - Pictures are never removed; a picture outside every scanned directory
//!   simply stops being visible

use crate::error::{Result, TagpixError};
use crate::model::{name_with_tag, Picture};
use crate::store::{open_collection, SnapshotStore};
use crate::tags::{validate_tag, TagValidationError};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Outcome of a single-picture rename operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChange {
    Renamed { from: PathBuf, to: PathBuf },
    /// The tag does not follow the tag grammar and was never encoded.
    Invalid(TagValidationError),
    AlreadyTagged,
    NotTagged,
    /// Another tracked picture already lives at the candidate path.
    Collision(PathBuf),
}

impl TagChange {
    pub fn is_renamed(&self) -> bool {
        matches!(self, TagChange::Renamed { .. })
    }
}

/// Outcome of relocating a picture to another directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: PathBuf, to: PathBuf },
    Occupied(PathBuf),
}

/// One element of a batch tag operation.
#[derive(Debug, Clone)]
pub struct BatchStep {
    pub tag: String,
    /// Filesystem failures are kept as their message; the batch moves on.
    pub result: std::result::Result<TagChange, String>,
}

impl BatchStep {
    pub fn is_renamed(&self) -> bool {
        matches!(&self.result, Ok(change) if change.is_renamed())
    }
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub id: Uuid,
    pub before: PathBuf,
    pub after: PathBuf,
    pub steps: Vec<BatchStep>,
}

impl BatchReport {
    pub fn changed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_renamed()).count()
    }
}

type TagStep<S> = fn(&mut PictureIndex<S>, Uuid, &str) -> Result<TagChange>;

pub struct PictureIndex<S: SnapshotStore> {
    store: S,
    location: PathBuf,
    pictures: Vec<Picture>,
    slots: HashMap<Uuid, usize>,
    by_path: HashMap<PathBuf, Uuid>,
}

impl<S: SnapshotStore> PictureIndex<S> {
    pub fn open(mut store: S, location: impl Into<PathBuf>) -> Result<Self> {
        let location = location.into();
        let loaded: Vec<Picture> = open_collection(&mut store, &location)?;

        let mut index = Self {
            store,
            location,
            pictures: Vec::with_capacity(loaded.len()),
            slots: HashMap::new(),
            by_path: HashMap::new(),
        };
        for picture in loaded {
            if index.by_path.contains_key(&picture.path) {
                log::warn!(
                    "Ignoring duplicate snapshot entry for {}",
                    picture.path.display()
                );
                continue;
            }
            index.insert(picture);
        }
        Ok(index)
    }

    pub fn pictures(&self) -> &[Picture] {
        &self.pictures
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn get(&self, id: Uuid) -> Option<&Picture> {
        self.slots.get(&id).map(|&slot| &self.pictures[slot])
    }

    pub fn id_at(&self, path: &Path) -> Option<Uuid> {
        self.by_path.get(path).copied()
    }

    pub fn find_by_path(&self, path: &Path) -> Option<&Picture> {
        self.id_at(path).and_then(|id| self.get(id))
    }

    /// Track every path not seen before. Returns how many pictures were added.
    pub fn register<I>(&mut self, paths: I) -> Result<usize>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        for path in paths {
            if self.by_path.contains_key(&path) {
                continue;
            }
            self.insert(Picture::new(path));
            added += 1;
        }
        self.persist()?;
        if added > 0 {
            log::info!("Tracking {} new picture(s)", added);
        }
        Ok(added)
    }

    /// Encode `tag` at the end of the picture's current name.
    pub fn add_tag(&mut self, id: Uuid, tag: &str) -> Result<TagChange> {
        let picture = self.picture(id)?;
        if let Err(reason) = validate_tag(tag) {
            return Ok(TagChange::Invalid(reason));
        }
        if picture.has_tag(tag) {
            return Ok(TagChange::AlreadyTagged);
        }

        let candidate = picture.dir().join(name_with_tag(&picture.name, tag));
        if self.occupied_by_other(id, &candidate) {
            return Ok(TagChange::Collision(candidate));
        }

        let mut tags = picture.tags.clone();
        tags.push(tag.to_string());
        self.commit(id, candidate, tags, true)
    }

    /// Drop `tag` and rebuild the name from the original stem and the
    /// remaining tags, so tag order in the name always matches `tags`.
    pub fn remove_tag(&mut self, id: Uuid, tag: &str) -> Result<TagChange> {
        let picture = self.picture(id)?;
        if !picture.has_tag(tag) {
            return Ok(TagChange::NotTagged);
        }

        let tags: Vec<String> = picture.tags.iter().filter(|t| *t != tag).cloned().collect();
        let candidate = picture.dir().join(picture.canonical_name_with(&tags));
        if self.occupied_by_other(id, &candidate) {
            return Ok(TagChange::Collision(candidate));
        }

        self.commit(id, candidate, tags, true)
    }

    pub fn add_tags<T: AsRef<str>>(&mut self, id: Uuid, tags: &[T]) -> Result<BatchReport> {
        self.apply_batch(id, tags, Self::add_tag)
    }

    pub fn remove_tags<T: AsRef<str>>(&mut self, id: Uuid, tags: &[T]) -> Result<BatchReport> {
        self.apply_batch(id, tags, Self::remove_tag)
    }

    /// Rename the picture to `name` within its current directory and re-derive
    /// its tags from that name.
    pub fn revert_name(&mut self, id: Uuid, name: &str) -> Result<TagChange> {
        if Path::new(name).file_name() != Some(OsStr::new(name)) {
            return Err(TagpixError::Api(format!("Invalid file name: {}", name)));
        }

        let picture = self.picture(id)?;
        let candidate = picture.dir().join(name);
        if self.occupied_by_other(id, &candidate) {
            return Ok(TagChange::Collision(candidate));
        }

        let tags = picture.tags_in_name(name);
        self.commit(id, candidate, tags, true)
    }

    /// Move the picture file into `dir`, keeping its name, tags and history.
    pub fn move_to(&mut self, id: Uuid, dir: &Path) -> Result<MoveOutcome> {
        if !dir.is_dir() {
            return Err(TagpixError::NotADirectory(dir.to_path_buf()));
        }
        let dir = fs::canonicalize(dir)?;

        let picture = self.picture(id)?;
        let candidate = dir.join(&picture.name);
        if self.occupied_by_other(id, &candidate) {
            return Ok(MoveOutcome::Occupied(candidate));
        }

        let tags = picture.tags.clone();
        match self.commit(id, candidate, tags, false)? {
            TagChange::Renamed { from, to } => Ok(MoveOutcome::Moved { from, to }),
            other => Err(TagpixError::Store(format!(
                "Unexpected move outcome: {:?}",
                other
            ))),
        }
    }

    fn apply_batch<T: AsRef<str>>(
        &mut self,
        id: Uuid,
        tags: &[T],
        step: TagStep<S>,
    ) -> Result<BatchReport> {
        let before = self.picture(id)?.path.clone();
        let history_before = self.picture(id)?.history.len();
        let mut steps = Vec::with_capacity(tags.len());
        let mut fatal = None;

        for tag in tags {
            let tag = tag.as_ref();
            let result = match step(self, id, tag) {
                Ok(change) => Ok(change),
                Err(e @ (TagpixError::Rename { .. } | TagpixError::TargetExists(_))) => {
                    log::warn!("Skipping {} for {}: {}", tag, before.display(), e);
                    Err(e.to_string())
                }
                Err(e) => {
                    fatal = Some(e);
                    break;
                }
            };
            steps.push(BatchStep {
                tag: tag.to_string(),
                result,
            });
        }

        let report = BatchReport {
            id,
            before,
            after: self.picture(id)?.path.clone(),
            steps,
        };

        // Steps that already renamed stay squashed even when a later one
        // aborts the batch. A step that failed while saving has already
        // committed in memory, so there the history growth is what counts.
        let changes = match fatal {
            None => report.changed_count(),
            Some(_) => self.picture(id)?.history.len().saturating_sub(history_before),
        };
        let squashed = self.squash_history(id, changes);
        if let Some(e) = fatal {
            if let Err(save_err) = squashed {
                log::warn!("Could not save squashed history: {}", save_err);
            }
            return Err(e);
        }
        squashed?;

        Ok(report)
    }

    /// Keep only the entry holding the pre-batch name. The count of successful
    /// steps decides how many entries to drop.
    fn squash_history(&mut self, id: Uuid, changes: usize) -> Result<()> {
        if changes <= 1 {
            return Ok(());
        }
        let slot = self.slot(id)?;
        for _ in 1..changes {
            self.pictures[slot].pop_history();
        }
        self.persist()
    }

    /// Physically rename, then update the picture and save.
    fn commit(
        &mut self,
        id: Uuid,
        to: PathBuf,
        tags: Vec<String>,
        record_history: bool,
    ) -> Result<TagChange> {
        let slot = self.slot(id)?;
        let from = self.pictures[slot].path.clone();

        if from != to {
            rename_file(&from, &to)?;
        }

        let picture = &mut self.pictures[slot];
        if record_history {
            picture.history.push(picture.name.clone());
        }
        picture.tags = tags;
        picture.set_path(to.clone());

        self.by_path.remove(&from);
        self.by_path.insert(to.clone(), id);
        self.persist()?;

        Ok(TagChange::Renamed { from, to })
    }

    fn occupied_by_other(&self, id: Uuid, candidate: &Path) -> bool {
        self.by_path
            .get(candidate)
            .is_some_and(|other| *other != id)
    }

    fn insert(&mut self, picture: Picture) {
        self.slots.insert(picture.id, self.pictures.len());
        self.by_path.insert(picture.path.clone(), picture.id);
        self.pictures.push(picture);
    }

    fn slot(&self, id: Uuid) -> Result<usize> {
        self.slots
            .get(&id)
            .copied()
            .ok_or_else(|| TagpixError::Store(format!("Unknown picture id {}", id)))
    }

    fn picture(&self, id: Uuid) -> Result<&Picture> {
        self.slot(id).map(|slot| &self.pictures[slot])
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.location, &self.pictures)
    }
}

/// Rename a file, refusing to clobber an untracked file at the target.
fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(TagpixError::TargetExists(to.to_path_buf()));
    }
    fs::rename(from, to).map_err(|source| TagpixError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    log::debug!("Renamed {} -> {}", from.display(), to.display());
    Ok(())
}
