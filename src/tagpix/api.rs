//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for tagpix operations, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the session**: picture index, tag vocabulary, change log and the
//!   viewing-directory state, plus the discovery and recognition collaborators
//! - **Normalizes inputs** (display indexes or paths become picture ids)
//! - **Dispatches** to the appropriate command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic; that belongs in
//! `commands/*.rs`.
//!
//! ## Generic Over SnapshotStore
//!
//! - Production: `TagpixApi<FileStore>`
//! - Testing: `TagpixApi<InMemoryStore>`
//!
//! ## Ordering
//!
//! Picture operations act on what the current view shows, so a directory must
//! be chosen with [`TagpixApi::change_directory`] before indexes resolve to
//! anything.

use crate::commands::{self, Session};
use crate::config::TagpixConfig;
use crate::discovery::{Discover, Scanner};
use crate::error::{Result, TagpixError};
use crate::recognition::TagSuggester;
use crate::selector::PictureSelector;
use crate::store::SnapshotStore;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

pub struct TagpixApi<S: SnapshotStore> {
    session: Session<S>,
    data_dir: PathBuf,
    discover: Box<dyn Discover>,
    suggester: Option<Box<dyn TagSuggester>>,
}

impl<S: SnapshotStore + Clone> TagpixApi<S> {
    /// Open the snapshots in `data_dir` and scan with the configured
    /// extensions.
    pub fn new(store: S, data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = TagpixConfig::load(&data_dir)?;
        let session = Session::open(store, &data_dir)?;
        Ok(Self {
            session,
            data_dir,
            discover: Box::new(Scanner::new(&config.extensions)),
            suggester: None,
        })
    }
}

impl<S: SnapshotStore> TagpixApi<S> {
    pub fn with_discover(mut self, discover: Box<dyn Discover>) -> Self {
        self.discover = discover;
        self
    }

    pub fn with_suggester(mut self, suggester: Box<dyn TagSuggester>) -> Self {
        self.suggester = Some(suggester);
        self
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn viewing_directory(&self) -> Option<&Path> {
        self.session.view.dir()
    }

    /// Paths of the visible pictures, in display order.
    pub fn visible_paths(&self) -> Vec<PathBuf> {
        self.session
            .view
            .visible_pictures(&self.session.index)
            .into_iter()
            .map(|p| p.path.clone())
            .collect()
    }

    pub fn change_directory(&mut self, dir: impl Into<PathBuf>) -> Result<commands::CmdResult> {
        commands::directory::run(&mut self.session, self.discover.as_ref(), dir.into())
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::filter::list(&self.session)
    }

    pub fn hide_without_tags<T: AsRef<str>>(&mut self, tags: &[T]) -> Result<commands::CmdResult> {
        commands::filter::hide_without_tags(&mut self.session, tags)
    }

    pub fn hide_subdirectories(&mut self) -> Result<commands::CmdResult> {
        commands::filter::hide_subdirectories(&mut self.session)
    }

    pub fn show_hidden(&mut self) -> Result<commands::CmdResult> {
        commands::filter::show_hidden(&mut self.session)
    }

    pub fn add_tags<T: AsRef<str>>(
        &mut self,
        picture: &str,
        tags: &[T],
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::tagging::add(&mut self.session, id, tags)
    }

    pub fn remove_tags<T: AsRef<str>>(
        &mut self,
        picture: &str,
        tags: &[T],
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::tagging::remove(&mut self.session, id, tags)
    }

    pub fn history(&self, picture: &str) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::history::run(&self.session, id)
    }

    pub fn revert_name(&mut self, picture: &str, name: &str) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::revert::run(&mut self.session, id, name)
    }

    pub fn move_picture(&mut self, picture: &str, target_dir: &Path) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::relocate::run(&mut self.session, id, target_dir)
    }

    pub fn vocabulary(&self) -> Result<commands::CmdResult> {
        commands::vocabulary::list(&self.session)
    }

    pub fn add_vocabulary_tags<T: AsRef<str>>(&mut self, tags: &[T]) -> Result<commands::CmdResult> {
        commands::vocabulary::add(&mut self.session, tags)
    }

    pub fn remove_vocabulary_tags<T: AsRef<str>>(
        &mut self,
        tags: &[T],
    ) -> Result<commands::CmdResult> {
        commands::vocabulary::remove(&mut self.session, tags)
    }

    pub fn sort_vocabulary(&mut self, keyword: &str) -> Result<commands::CmdResult> {
        commands::vocabulary::sort(&mut self.session, keyword)
    }

    pub fn log(&self) -> Result<commands::CmdResult> {
        commands::changelog::run(&self.session)
    }

    pub fn suggest(&self, picture: &str) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::suggest::suggest(&self.session, self.suggester.as_deref(), id)
    }

    pub fn accept_suggestions<T: AsRef<str>>(
        &mut self,
        picture: &str,
        labels: &[T],
    ) -> Result<commands::CmdResult> {
        let id = self.resolve(picture)?;
        commands::suggest::accept(&mut self.session, id, labels)
    }

    /// Show or change configuration. A new extension list applies to the next
    /// directory change.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let changes = matches!(action, ConfigAction::Set(..));
        let result = commands::config::run(&self.data_dir, action)?;
        if changes {
            if let Some(config) = &result.config {
                self.discover = Box::new(Scanner::new(&config.extensions));
            }
        }
        Ok(result)
    }

    fn resolve(&self, picture: &str) -> Result<Uuid> {
        let selector = PictureSelector::from_str(picture).map_err(TagpixError::Api)?;
        commands::helpers::resolve(&self.session, &selector)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
