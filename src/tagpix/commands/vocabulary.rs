use crate::commands::{CmdMessage, CmdResult, Session};
use crate::error::Result;
use crate::store::SnapshotStore;

pub const ADDED_STATUS: &str = "Tag(s) that could be added were added to the set of all tags";
pub const REMOVED_STATUS: &str = "Tag(s) were deleted from the existing set of tags";
const TAG_REMOVED: &str = "Successfully removed the tag";

pub fn list<S: SnapshotStore>(session: &Session<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_tags(session.vocabulary.tags().to_vec()))
}

/// Add each tag to the vocabulary, reporting the outcome per tag.
pub fn add<S: SnapshotStore, T: AsRef<str>>(
    session: &mut Session<S>,
    tags: &[T],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for tag in tags {
        let tag = tag.as_ref();
        let status = session.vocabulary.add(tag)?;
        let message = format!("{}: {}", tag, status.message());
        result.add_message(if status.is_added() {
            CmdMessage::success(message)
        } else {
            CmdMessage::warning(message)
        });
    }
    result.add_message(CmdMessage::info(ADDED_STATUS));
    Ok(result.with_tags(session.vocabulary.tags().to_vec()))
}

/// Remove tags from the vocabulary. Pictures keep any tags they carry.
pub fn remove<S: SnapshotStore, T: AsRef<str>>(
    session: &mut Session<S>,
    tags: &[T],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for tag in tags {
        let tag = tag.as_ref();
        session.vocabulary.remove(tag)?;
        result.add_message(CmdMessage::success(format!("{}: {}", tag, TAG_REMOVED)));
    }
    result.add_message(CmdMessage::info(REMOVED_STATUS));
    Ok(result.with_tags(session.vocabulary.tags().to_vec()))
}

pub fn sort<S: SnapshotStore>(session: &mut Session<S>, keyword: &str) -> Result<CmdResult> {
    session.vocabulary.sort_by_keyword(keyword)?;
    list(session)
}
