use crate::commands::{CmdMessage, CmdResult, Session};
use crate::error::{Result, TagpixError};
use crate::index::MoveOutcome;
use crate::store::SnapshotStore;
use std::path::Path;
use uuid::Uuid;

use super::helpers::picture;

pub const MOVED_STATUS: &str = "File movement was successful";
pub const OCCUPIED_STATUS: &str = "File already exists at target directory!";
pub const FAILED_STATUS: &str = "File movement was unsuccessful";

/// Move a picture into `target_dir`. Tags, history and the change log are
/// left alone; the view is rebuilt since the picture may have left it.
pub fn run<S: SnapshotStore>(
    session: &mut Session<S>,
    id: Uuid,
    target_dir: &Path,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match session.index.move_to(id, target_dir) {
        Ok(MoveOutcome::Moved { .. }) => {
            session.view.refresh(&session.index);
            result.add_message(CmdMessage::success(MOVED_STATUS));
        }
        Ok(MoveOutcome::Occupied(_)) | Err(TagpixError::TargetExists(_)) => {
            result.add_message(CmdMessage::warning(OCCUPIED_STATUS));
        }
        Err(e @ (TagpixError::Rename { .. } | TagpixError::NotADirectory(_))) => {
            log::warn!("Moving picture {} failed: {}", id, e);
            result.add_message(CmdMessage::error(FAILED_STATUS));
        }
        Err(e) => return Err(e),
    }

    let picture = picture(session, id)?.clone();
    Ok(result.with_affected_pictures(vec![picture]))
}
