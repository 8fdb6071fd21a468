//! Viewing-directory session state.
//!
//! A [`ViewState`] scopes the index to one directory subtree. It holds only
//! picture ids; the pictures themselves stay in the [`PictureIndex`], so a
//! rename never invalidates the view.
//!
//! `visible` and `hidden` never share an id. Filters move ids from `visible`
//! to `hidden`; [`ViewState::show_hidden`] moves them all back.

use crate::index::PictureIndex;
use crate::model::Picture;
use crate::store::SnapshotStore;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    dir: Option<PathBuf>,
    visible: Vec<Uuid>,
    hidden: Vec<Uuid>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn visible(&self) -> &[Uuid] {
        &self.visible
    }

    pub fn hidden(&self) -> &[Uuid] {
        &self.hidden
    }

    pub fn is_visible(&self, id: Uuid) -> bool {
        self.visible.contains(&id)
    }

    /// Visible pictures in index order.
    pub fn visible_pictures<'a, S: SnapshotStore>(
        &self,
        index: &'a PictureIndex<S>,
    ) -> Vec<&'a Picture> {
        self.visible.iter().filter_map(|id| index.get(*id)).collect()
    }

    /// Scope the view to `dir` and recompute the partition.
    pub fn set_dir<S: SnapshotStore>(&mut self, dir: PathBuf, index: &PictureIndex<S>) {
        self.dir = Some(dir);
        self.refresh(index);
    }

    /// Recompute `visible` from the current directory, clearing any filters.
    ///
    /// Nesting is decided per path component, so `/photos/Pics2/a.jpg` is not
    /// under `/photos/Pics`.
    pub fn refresh<S: SnapshotStore>(&mut self, index: &PictureIndex<S>) {
        self.hidden.clear();
        self.visible = match &self.dir {
            Some(dir) => index
                .pictures()
                .iter()
                .filter(|p| p.path.starts_with(dir))
                .map(|p| p.id)
                .collect(),
            None => Vec::new(),
        };
    }

    /// Keep only pictures carrying every tag in `tags`. Each tag narrows the
    /// result of the previous one; an empty list changes nothing.
    pub fn hide_without_tags<S, T>(&mut self, tags: &[T], index: &PictureIndex<S>)
    where
        S: SnapshotStore,
        T: AsRef<str>,
    {
        for tag in tags {
            let tag = tag.as_ref();
            self.partition(index, |picture| picture.has_tag(tag));
        }
    }

    /// Keep only pictures sitting directly in the viewing directory.
    pub fn hide_subdirectory_pictures<S: SnapshotStore>(&mut self, index: &PictureIndex<S>) {
        let Some(dir) = self.dir.clone() else {
            return;
        };
        self.partition(index, |picture| picture.path.parent() == Some(dir.as_path()));
    }

    pub fn show_hidden(&mut self) {
        self.visible.append(&mut self.hidden);
    }

    fn partition<S, F>(&mut self, index: &PictureIndex<S>, keep: F)
    where
        S: SnapshotStore,
        F: Fn(&Picture) -> bool,
    {
        let (kept, dropped): (Vec<Uuid>, Vec<Uuid>) = self
            .visible
            .iter()
            .partition(|id| index.get(**id).is_some_and(&keep));
        self.visible = kept;
        self.hidden.extend(dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use std::collections::HashSet;

    fn index_of(entries: &[(&str, Vec<&str>)]) -> PictureIndex<InMemoryStore> {
        let pictures: Vec<Picture> = entries
            .iter()
            .map(|(path, tags)| {
                let mut picture = Picture::new(PathBuf::from(path));
                picture.tags = tags.iter().map(|t| t.to_string()).collect();
                picture
            })
            .collect();
        let mut store = InMemoryStore::new();
        store.save(Path::new("pictures.json"), &pictures).unwrap();
        PictureIndex::open(store, "pictures.json").unwrap()
    }

    fn index_with(paths: &[&str]) -> PictureIndex<InMemoryStore> {
        let entries: Vec<(&str, Vec<&str>)> = paths.iter().map(|p| (*p, Vec::new())).collect();
        index_of(&entries)
    }

    fn visible_paths(view: &ViewState, index: &PictureIndex<InMemoryStore>) -> Vec<PathBuf> {
        view.visible_pictures(index)
            .into_iter()
            .map(|p| p.path.clone())
            .collect()
    }

    #[test]
    fn visible_uses_component_prefix() {
        let index = index_with(&["/p/Pics/a.jpg", "/p/Pics2/b.jpg", "/p/Pics/sub/c.jpg"]);
        let mut view = ViewState::new();
        view.set_dir(PathBuf::from("/p/Pics"), &index);

        assert_eq!(
            visible_paths(&view, &index),
            vec![PathBuf::from("/p/Pics/a.jpg"), PathBuf::from("/p/Pics/sub/c.jpg")]
        );
        assert!(view.hidden().is_empty());
    }

    #[test]
    fn no_directory_means_nothing_visible() {
        let index = index_with(&["/p/a.jpg"]);
        let mut view = ViewState::new();
        view.refresh(&index);
        assert!(view.visible().is_empty());
    }

    #[test]
    fn hide_without_tags_is_and() {
        let index = index_of(&[
            ("/p/a.jpg", vec!["@A", "@B"]),
            ("/p/b.jpg", vec!["@A"]),
            ("/p/c.jpg", vec![]),
        ]);
        let mut view = ViewState::new();
        view.set_dir(PathBuf::from("/p"), &index);

        view.hide_without_tags(&["@A", "@B"], &index);

        assert_eq!(visible_paths(&view, &index), vec![PathBuf::from("/p/a.jpg")]);
        assert_eq!(view.hidden().len(), 2);
    }

    #[test]
    fn hide_without_tags_empty_is_noop() {
        let index = index_with(&["/p/a.jpg", "/p/b.jpg"]);
        let mut view = ViewState::new();
        view.set_dir(PathBuf::from("/p"), &index);

        view.hide_without_tags::<_, &str>(&[], &index);

        assert_eq!(view.visible().len(), 2);
        assert!(view.hidden().is_empty());
    }

    #[test]
    fn show_hidden_restores_pre_filter_set() {
        let index = index_of(&[
            ("/p/a.jpg", vec![]),
            ("/p/b.jpg", vec!["@A"]),
            ("/p/c.jpg", vec![]),
        ]);
        let mut view = ViewState::new();
        view.set_dir(PathBuf::from("/p"), &index);
        let before: HashSet<Uuid> = view.visible().iter().copied().collect();

        view.hide_without_tags(&["@A"], &index);
        view.show_hidden();

        let after: HashSet<Uuid> = view.visible().iter().copied().collect();
        assert_eq!(before, after);
        assert!(view.hidden().is_empty());
    }

    #[test]
    fn hide_subdirectory_pictures_keeps_direct_children() {
        let index = index_with(&["/p/a.jpg", "/p/sub/b.jpg", "/p/sub/deep/c.jpg"]);
        let mut view = ViewState::new();
        view.set_dir(PathBuf::from("/p"), &index);

        view.hide_subdirectory_pictures(&index);

        assert_eq!(visible_paths(&view, &index), vec![PathBuf::from("/p/a.jpg")]);
        assert_eq!(view.hidden().len(), 2);
    }

    #[test]
    fn changing_directory_clears_filters() {
        let index = index_with(&["/p/a.jpg", "/p/sub/b.jpg"]);
        let mut view = ViewState::new();
        view.set_dir(PathBuf::from("/p"), &index);
        view.hide_subdirectory_pictures(&index);

        view.set_dir(PathBuf::from("/p/sub"), &index);

        assert_eq!(visible_paths(&view, &index), vec![PathBuf::from("/p/sub/b.jpg")]);
        assert!(view.hidden().is_empty());
    }
}
