use crate::commands::{CmdMessage, CmdResult, Session};
use crate::discovery::Discover;
use crate::error::{Result, TagpixError};
use crate::store::SnapshotStore;
use crate::tags::AddTagStatus;
use std::fs;
use std::path::PathBuf;

use super::helpers::indexed_pictures;

/// Point the session at `dir`: rescan, track new pictures, rebuild the view
/// and make sure every tag seen on a visible picture is in the vocabulary.
///
/// `dir` is resolved to its canonical absolute form first; the index only
/// ever holds absolute paths.
pub fn run<S: SnapshotStore>(
    session: &mut Session<S>,
    discover: &dyn Discover,
    dir: PathBuf,
) -> Result<CmdResult> {
    if !dir.is_dir() {
        return Err(TagpixError::NotADirectory(dir));
    }
    let dir = fs::canonicalize(&dir)?;
    let found = discover.scan(&dir)?;
    let added = session.index.register(found)?;
    session.view.set_dir(dir.clone(), &session.index);

    let mut result = CmdResult::default();
    backfill_vocabulary(session, &mut result)?;

    let listed = indexed_pictures(session);
    result.add_message(CmdMessage::info(format!(
        "Viewing {}: {} picture(s), {} new",
        dir.display(),
        listed.len(),
        added
    )));
    Ok(result.with_listed_pictures(listed))
}

fn backfill_vocabulary<S: SnapshotStore>(
    session: &mut Session<S>,
    result: &mut CmdResult,
) -> Result<()> {
    let mut missing: Vec<String> = Vec::new();
    for picture in session.view.visible_pictures(&session.index) {
        for tag in &picture.tags {
            if !session.vocabulary.contains(tag) && !missing.contains(tag) {
                missing.push(tag.clone());
            }
        }
    }

    for tag in missing {
        match session.vocabulary.add(&tag)? {
            AddTagStatus::Added => {
                result.add_message(CmdMessage::info(format!("Added {} to the tag list", tag)));
            }
            status => {
                log::warn!("Not adding {} to the tag list: {}", tag, status.message());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{relative_to, PictureTree};
    use crate::discovery::Scanner;

    #[test]
    fn change_directory_tracks_new_pictures_with_no_tags() {
        let tree = PictureTree::new(&["cat @sun.jpg", "sub/dog.png"]);
        let pic = tree.picture(tree.id("cat @sun.jpg"));
        assert!(pic.tags.is_empty());
        assert_eq!(tree.session.view.visible().len(), 2);
    }

    #[test]
    fn rescan_only_adds_unseen_paths() {
        let mut tree = PictureTree::new(&["a.jpg"]);
        fs::write(tree.path("b.jpg"), b"img").unwrap();

        let root = tree.root.path().to_path_buf();
        let result = run(&mut tree.session, &Scanner::default(), root).unwrap();

        assert_eq!(tree.session.index.len(), 2);
        assert_eq!(result.listed_pictures.len(), 2);
        assert!(result.status().unwrap().ends_with("2 picture(s), 1 new"));
    }

    #[test]
    fn narrowing_the_directory_keeps_pictures_in_the_index() {
        let mut tree = PictureTree::new(&["a.jpg", "sub/b.jpg"]);
        let sub = tree.path("sub");

        run(&mut tree.session, &Scanner::default(), sub).unwrap();

        assert_eq!(tree.session.index.len(), 2);
        assert_eq!(tree.session.view.visible(), &[tree.id("sub/b.jpg")]);
    }

    #[test]
    fn visible_tags_are_backfilled_into_vocabulary() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        let id = tree.id("cat.jpg");
        tree.session.index.add_tags(id, &["@x", "@y"]).unwrap();
        tree.session.vocabulary.remove("@x").unwrap();

        let root = tree.root.path().to_path_buf();
        run(&mut tree.session, &Scanner::default(), root).unwrap();

        assert_eq!(tree.session.vocabulary.tags(), &["@x", "@y"]);
    }

    #[test]
    fn relative_directory_is_stored_absolute() {
        let mut tree = PictureTree::new(&["cat.jpg"]);
        fs::write(tree.path("dog.jpg"), b"img").unwrap();
        let cwd = std::env::current_dir().unwrap();
        let relative = relative_to(&tree.base, &cwd);
        assert!(relative.is_relative());

        run(&mut tree.session, &Scanner::default(), relative).unwrap();

        assert_eq!(tree.session.view.dir(), Some(tree.base.as_path()));
        let dog = tree.id("dog.jpg");
        assert!(tree.picture(dog).path.is_absolute());
        assert_eq!(tree.session.view.visible().len(), 2);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let mut tree = PictureTree::new(&[]);
        let nowhere = tree.path("nowhere");
        let err = run(&mut tree.session, &Scanner::default(), nowhere).unwrap_err();
        assert!(matches!(err, TagpixError::NotADirectory(_)));
    }
}
