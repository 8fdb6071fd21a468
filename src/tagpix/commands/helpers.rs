use crate::commands::Session;
use crate::error::{Result, TagpixError};
use crate::model::Picture;
use crate::selector::{index_pictures, DisplayPicture, PictureSelector};
use crate::store::SnapshotStore;
use uuid::Uuid;

pub fn indexed_pictures<S: SnapshotStore>(session: &Session<S>) -> Vec<DisplayPicture> {
    index_pictures(session.view.visible_pictures(&session.index))
}

/// Resolve a selector to a picture id.
///
/// Indexes refer to the current visible list. Relative paths are taken
/// relative to the viewing directory.
pub fn resolve<S: SnapshotStore>(session: &Session<S>, selector: &PictureSelector) -> Result<Uuid> {
    match selector {
        PictureSelector::Index(n) => n
            .checked_sub(1)
            .and_then(|i| session.view.visible().get(i))
            .copied()
            .ok_or_else(|| TagpixError::Api(format!("Index {} not found in current view", n))),
        PictureSelector::Path(path) => {
            let path = match session.view.dir() {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            };
            session
                .index
                .id_at(&path)
                .ok_or(TagpixError::PictureNotFound(path))
        }
    }
}

pub fn picture<S: SnapshotStore>(session: &Session<S>, id: Uuid) -> Result<&Picture> {
    session
        .index
        .get(id)
        .ok_or_else(|| TagpixError::Store(format!("Unknown picture id {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::PictureTree;
    use std::path::PathBuf;

    #[test]
    fn resolves_display_index() {
        let tree = PictureTree::new(&["a.jpg", "b.jpg"]);
        let id = resolve(&tree.session, &PictureSelector::Index(2)).unwrap();
        assert_eq!(id, tree.id("b.jpg"));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let tree = PictureTree::new(&["a.jpg"]);
        let err = resolve(&tree.session, &PictureSelector::Index(5)).unwrap_err();
        assert!(matches!(err, TagpixError::Api(_)));
    }

    #[test]
    fn resolves_relative_and_absolute_paths() {
        let tree = PictureTree::new(&["sub/a.jpg"]);
        let relative = PictureSelector::Path(PathBuf::from("sub/a.jpg"));
        let absolute = PictureSelector::Path(tree.path("sub/a.jpg"));
        assert_eq!(resolve(&tree.session, &relative).unwrap(), tree.id("sub/a.jpg"));
        assert_eq!(resolve(&tree.session, &absolute).unwrap(), tree.id("sub/a.jpg"));
    }

    #[test]
    fn unknown_path_is_not_found() {
        let tree = PictureTree::new(&["a.jpg"]);
        let err = resolve(&tree.session, &PictureSelector::Path(PathBuf::from("zz.jpg")))
            .unwrap_err();
        assert!(matches!(err, TagpixError::PictureNotFound(_)));
    }
}
