use crate::changelog::ChangeKind;
use crate::commands::{CmdMessage, CmdResult, Session};
use crate::error::Result;
use crate::index::{BatchReport, BatchStep, TagChange};
use crate::store::SnapshotStore;
use uuid::Uuid;

use super::helpers::picture;

pub const ADDED_STATUS: &str = "Tags that could be added to the picture were added";
pub const REMOVED_STATUS: &str = "Tags that could be removed from the picture were removed";

const TAG_ADDED: &str = "Successfully added tag to the picture";
const TAG_NOT_ADDED: &str =
    "Unable to add tag to the picture. The tag may have already been applied to this picture";
const TAG_REMOVED: &str = "The tag was successfully removed from the picture";
const TAG_NOT_REMOVED: &str = "The tag was not able to be removed from the picture.";

pub fn add<S: SnapshotStore, T: AsRef<str>>(
    session: &mut Session<S>,
    id: Uuid,
    tags: &[T],
) -> Result<CmdResult> {
    let report = session.index.add_tags(id, tags)?;
    finish(session, report, ChangeKind::TagsAdded)
}

pub fn remove<S: SnapshotStore, T: AsRef<str>>(
    session: &mut Session<S>,
    id: Uuid,
    tags: &[T],
) -> Result<CmdResult> {
    let report = session.index.remove_tags(id, tags)?;
    finish(session, report, ChangeKind::TagsRemoved)
}

/// Report each step, log the batch as one change and add the overall status.
fn finish<S: SnapshotStore>(
    session: &mut Session<S>,
    report: BatchReport,
    kind: ChangeKind,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for step in &report.steps {
        result.add_message(step_message(step, kind));
    }

    // One entry per batch, even when nothing could be renamed.
    let picture = picture(session, report.id)?.clone();
    session.log.record(kind, &report.before, &picture.name)?;

    let status = match kind {
        ChangeKind::TagsRemoved => REMOVED_STATUS,
        _ => ADDED_STATUS,
    };
    result.add_message(CmdMessage::info(status));
    Ok(result.with_affected_pictures(vec![picture]))
}

fn step_message(step: &BatchStep, kind: ChangeKind) -> CmdMessage {
    let adding = kind != ChangeKind::TagsRemoved;
    match &step.result {
        Ok(TagChange::Renamed { .. }) => {
            let text = if adding { TAG_ADDED } else { TAG_REMOVED };
            CmdMessage::success(format!("{}: {}", step.tag, text))
        }
        Ok(TagChange::Invalid(reason)) => {
            CmdMessage::warning(format!("{}: {}", step.tag, reason))
        }
        Ok(TagChange::Collision(path)) => {
            let text = if adding { TAG_NOT_ADDED } else { TAG_NOT_REMOVED };
            CmdMessage::warning(format!(
                "{}: {} ({} is taken)",
                step.tag,
                text,
                path.display()
            ))
        }
        Ok(_) => {
            let text = if adding { TAG_NOT_ADDED } else { TAG_NOT_REMOVED };
            CmdMessage::warning(format!("{}: {}", step.tag, text))
        }
        Err(reason) => CmdMessage::error(format!("{}: {}", step.tag, reason)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::PictureTree;
    use crate::commands::MessageLevel;

    #[test]
    fn add_renames_and_logs_once() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");

        let result = add(&mut tree.session, id, &["@x"]).unwrap();

        assert_eq!(result.status(), Some(ADDED_STATUS));
        assert_eq!(result.affected_pictures[0].name, "cat @x.jpg");
        assert!(tree.path("cat @x.jpg").exists());

        let entries = tree.session.log.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0]
            .to_string()
            .starts_with("Added tag(s): cat.jpg ---> cat @x.jpg "));
    }

    #[test]
    fn adding_an_applied_tag_changes_nothing() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");
        add(&mut tree.session, id, &["@x"]).unwrap();

        let result = add(&mut tree.session, id, &["@x"]).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, format!("@x: {}", TAG_NOT_ADDED));
        assert_eq!(tree.picture(id).history, vec!["cat.jpg"]);

        let entries = tree.session.log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].before, "cat @x.jpg");
        assert_eq!(entries[1].after, "cat @x.jpg");
    }

    #[test]
    fn batch_add_logs_old_and_final_names() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");

        let result = add(&mut tree.session, id, &["@a", "@b", "@c"]).unwrap();

        assert_eq!(result.messages.len(), 4);
        let entries = tree.session.log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].before, "cat.jpg");
        assert_eq!(entries[0].after, "cat @a @b @c.jpg");
        assert_eq!(tree.picture(id).history, vec!["cat.jpg"]);
    }

    #[test]
    fn remove_reports_each_tag() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");
        add(&mut tree.session, id, &["@a", "@b"]).unwrap();

        let result = remove(&mut tree.session, id, &["@a", "@zzz"]).unwrap();

        assert_eq!(result.messages[0].content, format!("@a: {}", TAG_REMOVED));
        assert_eq!(result.messages[1].content, format!("@zzz: {}", TAG_NOT_REMOVED));
        assert_eq!(result.status(), Some(REMOVED_STATUS));
        assert_eq!(tree.picture(id).name, "cat @b.jpg");

        let last = tree.session.log.entries().last().unwrap().clone();
        assert_eq!(last.kind, ChangeKind::TagsRemoved);
        assert_eq!(last.before, "cat @a @b.jpg");
        assert_eq!(last.after, "cat @b.jpg");
    }

    #[test]
    fn collision_is_reported_and_logged_without_a_change() {
        let mut tree = PictureTree::new(&["cat.jpg", "cat @x.jpg"]);
        let id = tree.id("cat.jpg");

        let result = add(&mut tree.session, id, &["@x"]).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(tree.picture(id).tags.is_empty());
        let entries = tree.session.log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].before, "cat.jpg");
        assert_eq!(entries[0].after, "cat.jpg");
    }

    #[test]
    fn malformed_tags_are_reported_with_their_reason() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");

        let result = add(&mut tree.session, id, &["x", "@a @b", "@ok"]).unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(
            result.messages[0].content,
            "x: Tag was not added as it must begin with @"
        );
        assert_eq!(
            result.messages[1].content,
            "@a @b: Tag was not added as it must only have one @ sign"
        );
        assert_eq!(result.messages[2].level, MessageLevel::Success);

        let pic = tree.picture(id);
        assert_eq!(pic.name, "cat @ok.jpg");
        assert_eq!(pic.tags, vec!["@ok"]);
        assert!(tree.path("cat @ok.jpg").exists());
    }

    #[test]
    fn filesystem_failure_becomes_an_error_message() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");
        std::fs::write(tree.path("cat @x.jpg"), b"untracked").unwrap();

        let result = add(&mut tree.session, id, &["@x"]).unwrap();

        assert!(result.has_errors());
        assert_eq!(result.status(), Some(ADDED_STATUS));
        assert!(tree.picture(id).tags.is_empty());
    }
}
