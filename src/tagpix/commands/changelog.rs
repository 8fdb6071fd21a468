use crate::commands::{CmdResult, Session};
use crate::error::Result;
use crate::store::SnapshotStore;

/// Every change log entry, oldest first.
pub fn run<S: SnapshotStore>(session: &Session<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.log_entries = session.log.entries().to_vec();
    Ok(result)
}
