use crate::commands::{CmdResult, Session};
use crate::error::Result;
use crate::store::SnapshotStore;
use uuid::Uuid;

use super::helpers::picture;

/// Previous names of a picture, oldest first, along with the picture itself.
pub fn run<S: SnapshotStore>(session: &Session<S>, id: Uuid) -> Result<CmdResult> {
    let picture = picture(session, id)?.clone();
    let mut result = CmdResult::default().with_tags(picture.tags.clone());
    result.history = picture.history.clone();
    Ok(result.with_affected_pictures(vec![picture]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::PictureTree;
    use crate::commands::tagging;

    #[test]
    fn history_lists_previous_names() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");
        tagging::add(&mut tree.session, id, &["@a"]).unwrap();
        tagging::add(&mut tree.session, id, &["@b"]).unwrap();

        let result = run(&tree.session, id).unwrap();

        assert_eq!(result.history, vec!["cat.jpg", "cat @a.jpg"]);
        assert_eq!(result.tags, vec!["@a", "@b"]);
        assert_eq!(result.affected_pictures[0].name, "cat @a @b.jpg");
    }

    #[test]
    fn fresh_picture_has_no_history() {
        let tree = PictureTree::new(&["cat.jpg"]);
        let result = run(&tree.session, tree.id("cat.jpg")).unwrap();
        assert!(result.history.is_empty());
    }
}
