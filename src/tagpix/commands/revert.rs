use crate::changelog::ChangeKind;
use crate::commands::{is_filesystem_failure, CmdMessage, CmdResult, Session};
use crate::error::Result;
use crate::index::TagChange;
use crate::store::SnapshotStore;
use uuid::Uuid;

use super::helpers::picture;

pub const REVERTED_STATUS: &str = "The file name was successfully reverted";
pub const NAME_TAKEN_STATUS: &str =
    "Unable to change the file name. Another picture may already have this file name";

/// Rename a picture back to `name`, usually one of its previous names.
pub fn run<S: SnapshotStore>(session: &mut Session<S>, id: Uuid, name: &str) -> Result<CmdResult> {
    let before = picture(session, id)?.path.clone();
    let mut result = CmdResult::default();

    match session.index.revert_name(id, name) {
        Ok(TagChange::Renamed { .. }) => {
            session.log.record(ChangeKind::NameReverted, &before, name)?;
            result.add_message(CmdMessage::success(REVERTED_STATUS));
        }
        Ok(_) => result.add_message(CmdMessage::warning(NAME_TAKEN_STATUS)),
        Err(e) if is_filesystem_failure(&e) => {
            log::warn!("Revert of {} failed: {}", before.display(), e);
            result.add_message(CmdMessage::error(e.to_string()));
        }
        Err(e) => return Err(e),
    }

    let picture = picture(session, id)?.clone();
    Ok(result.with_affected_pictures(vec![picture]))
}
