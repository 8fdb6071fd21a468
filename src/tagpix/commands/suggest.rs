use crate::commands::{tagging, CmdMessage, CmdResult, Session};
use crate::error::Result;
use crate::recognition::{label_to_tag, TagSuggester, SUGGESTION_LIMIT};
use crate::store::SnapshotStore;
use crate::tags::AddTagStatus;
use uuid::Uuid;

use super::helpers::picture;

pub const NO_RECOGNIZER: &str = "No tag recognizer is configured";

/// Ask the recogniser for labels describing a picture.
pub fn suggest<S: SnapshotStore>(
    session: &Session<S>,
    suggester: Option<&dyn TagSuggester>,
    id: Uuid,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(suggester) = suggester else {
        result.add_message(CmdMessage::warning(NO_RECOGNIZER));
        return Ok(result);
    };

    let path = picture(session, id)?.path.clone();
    let mut labels = suggester.suggest(&path)?;
    labels.truncate(SUGGESTION_LIMIT);
    result.suggestions = labels;
    Ok(result)
}

/// Apply accepted labels: each goes through the vocabulary first and only
/// the ones the vocabulary holds afterwards are added to the picture.
pub fn accept<S: SnapshotStore, T: AsRef<str>>(
    session: &mut Session<S>,
    id: Uuid,
    labels: &[T],
) -> Result<CmdResult> {
    let mut messages = Vec::with_capacity(labels.len());
    let mut accepted = Vec::with_capacity(labels.len());

    for label in labels {
        let tag = label_to_tag(label.as_ref());
        let status = session.vocabulary.add(&tag)?;
        match status {
            AddTagStatus::Added | AddTagStatus::AlreadyExists => accepted.push(tag),
            AddTagStatus::Rejected(_) => {
                messages.push(CmdMessage::warning(format!("{}: {}", tag, status.message())))
            }
        }
    }

    let mut result = tagging::add(session, id, &accepted)?;
    messages.append(&mut result.messages);
    result.messages = messages;
    Ok(result)
}
