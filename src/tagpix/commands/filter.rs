use crate::commands::CmdResult;
use crate::commands::Session;
use crate::error::Result;
use crate::store::SnapshotStore;

use super::helpers::indexed_pictures;

/// The visible pictures, numbered.
pub fn list<S: SnapshotStore>(session: &Session<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_pictures(indexed_pictures(session)))
}

pub fn hide_without_tags<S: SnapshotStore, T: AsRef<str>>(
    session: &mut Session<S>,
    tags: &[T],
) -> Result<CmdResult> {
    session.view.hide_without_tags(tags, &session.index);
    list(session)
}

pub fn hide_subdirectories<S: SnapshotStore>(session: &mut Session<S>) -> Result<CmdResult> {
    session.view.hide_subdirectory_pictures(&session.index);
    list(session)
}

pub fn show_hidden<S: SnapshotStore>(session: &mut Session<S>) -> Result<CmdResult> {
    session.view.show_hidden();
    list(session)
}
