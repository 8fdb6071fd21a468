//! # Command Layer
//!
//! One module per user action. Every command takes the [`Session`] explicitly,
//! performs its work through the domain types and returns a [`CmdResult`]:
//! structured data for the caller to render plus the status messages that are
//! the only feedback channel to the user.
//!
//! Commands never print. Expected outcomes such as collisions or invalid tags
//! become messages; only real failures are returned as errors.

use crate::changelog::{ChangeEntry, ChangeLog};
use crate::config::TagpixConfig;
use crate::error::{Result, TagpixError};
use crate::index::PictureIndex;
use crate::model::Picture;
use crate::selector::DisplayPicture;
use crate::store::SnapshotStore;
use crate::tags::TagVocabulary;
use crate::view::ViewState;
use std::path::Path;

pub mod changelog;
pub mod config;
pub mod directory;
pub mod filter;
pub mod helpers;
pub mod history;
pub mod relocate;
pub mod revert;
pub mod suggest;
pub mod tagging;
pub mod vocabulary;

pub const PICTURES_SNAPSHOT: &str = "pictures.json";
pub const TAGS_SNAPSHOT: &str = "tags.json";
pub const LOG_SNAPSHOT: &str = "log.json";

/// Everything a command may read or mutate.
pub struct Session<S: SnapshotStore> {
    pub index: PictureIndex<S>,
    pub vocabulary: TagVocabulary<S>,
    pub log: ChangeLog<S>,
    pub view: ViewState,
}

impl<S: SnapshotStore + Clone> Session<S> {
    /// Open the three snapshots under `data_dir`. The view starts unscoped.
    pub fn open(store: S, data_dir: &Path) -> Result<Self> {
        Ok(Self {
            index: PictureIndex::open(store.clone(), data_dir.join(PICTURES_SNAPSHOT))?,
            vocabulary: TagVocabulary::open(store.clone(), data_dir.join(TAGS_SNAPSHOT))?,
            log: ChangeLog::open(store, data_dir.join(LOG_SNAPSHOT))?,
            view: ViewState::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_pictures: Vec<Picture>,
    pub listed_pictures: Vec<DisplayPicture>,
    pub tags: Vec<String>,
    pub history: Vec<String>,
    pub log_entries: Vec<ChangeEntry>,
    pub suggestions: Vec<String>,
    pub config: Option<TagpixConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pictures(mut self, pictures: Vec<Picture>) -> Self {
        self.affected_pictures = pictures;
        self
    }

    pub fn with_listed_pictures(mut self, pictures: Vec<DisplayPicture>) -> Self {
        self.listed_pictures = pictures;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_config(mut self, config: TagpixConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The last message, which is the overall status of the action.
    pub fn status(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Whether an error is a filesystem failure the user should see as a status
/// message instead of an aborted command.
pub(crate) fn is_filesystem_failure(err: &TagpixError) -> bool {
    matches!(
        err,
        TagpixError::Rename { .. } | TagpixError::TargetExists(_) | TagpixError::NotADirectory(_)
    )
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::discovery::Scanner;
    use crate::store::memory::InMemoryStore;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use uuid::Uuid;

    /// A temporary picture tree with a session viewing its root.
    pub struct PictureTree {
        pub root: TempDir,
        /// `root` as the index stores it, with symlinks resolved.
        pub base: PathBuf,
        pub session: Session<InMemoryStore>,
    }

    impl PictureTree {
        pub fn new(files: &[&str]) -> Self {
            let root = TempDir::new().unwrap();
            for file in files {
                let path = root.path().join(file);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).unwrap();
                }
                fs::write(&path, b"img").unwrap();
            }

            let mut session = Session::open(InMemoryStore::new(), Path::new("data")).unwrap();
            directory::run(&mut session, &Scanner::default(), root.path().to_path_buf()).unwrap();
            let base = fs::canonicalize(root.path()).unwrap();
            Self {
                root,
                base,
                session,
            }
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.base.join(name)
        }

        pub fn id(&self, name: &str) -> Uuid {
            self.session
                .index
                .id_at(&self.path(name))
                .unwrap_or_else(|| panic!("no picture at {}", name))
        }

        pub fn picture(&self, id: Uuid) -> &Picture {
            self.session.index.get(id).unwrap()
        }
    }

    /// `target` spelled relative to `base` with `..` steps.
    pub fn relative_to(target: &Path, base: &Path) -> PathBuf {
        let target: Vec<_> = target.components().collect();
        let base: Vec<_> = base.components().collect();
        let common = target
            .iter()
            .zip(&base)
            .take_while(|(a, b)| a == b)
            .count();
        let mut relative = PathBuf::new();
        for _ in common..base.len() {
            relative.push("..");
        }
        for part in &target[common..] {
            relative.push(part.as_os_str());
        }
        relative
    }
}
