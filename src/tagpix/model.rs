use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Separator placed before every tag encoded in a file name.
pub const TAG_SEPARATOR: char = ' ';

/// One tracked image file.
///
/// `path` changes with every rename; `id` never does. `original_name` is the
/// file name at discovery time and is the stem every canonical name is rebuilt
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub id: Uuid,
    pub path: PathBuf,
    pub name: String,
    pub original_name: String,
    /// Tags encoded in `name`, in encoding order.
    pub tags: Vec<String>,
    /// Previous names, oldest first.
    pub history: Vec<String>,
}

impl Picture {
    pub fn new(path: PathBuf) -> Self {
        let name = file_name(&path);
        Self {
            id: Uuid::new_v4(),
            original_name: name.clone(),
            name,
            path,
            tags: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Directory holding the file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Point the picture at a new location, keeping `name` in sync.
    pub(crate) fn set_path(&mut self, path: PathBuf) {
        self.name = file_name(&path);
        self.path = path;
    }

    /// Drop the most recent history entry.
    pub(crate) fn pop_history(&mut self) -> Option<String> {
        self.history.pop()
    }

    /// The file name `original_name` becomes once `tags` are encoded into it.
    pub fn canonical_name(&self) -> String {
        self.canonical_name_with(&self.tags)
    }

    /// Like [`Picture::canonical_name`], for an arbitrary tag list.
    pub fn canonical_name_with(&self, tags: &[String]) -> String {
        let (stem, ext) = split_extension(&self.original_name);
        let mut name = stem.to_string();
        for tag in tags {
            name.push(TAG_SEPARATOR);
            name.push_str(tag);
        }
        join_extension(name, ext)
    }

    /// Tags structurally present in `name`, relative to this picture's
    /// original stem.
    pub fn tags_in_name(&self, name: &str) -> Vec<String> {
        let (original_stem, _) = split_extension(&self.original_name);
        let (stem, _) = split_extension(name);

        let encoded = match stem.strip_prefix(original_stem) {
            Some(rest) if rest.is_empty() || rest.starts_with(" @") => rest,
            _ => stem.find(" @").map(|pos| &stem[pos..]).unwrap_or(""),
        };

        encoded
            .split(" @")
            .filter(|segment| !segment.is_empty())
            .map(|segment| format!("@{}", segment))
            .collect()
    }
}

/// Final component of a path, lossily converted.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split a file name at its last `.` into stem and extension.
///
/// A leading dot (hidden files) does not start an extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], Some(&name[pos + 1..])),
        _ => (name, None),
    }
}

pub fn join_extension(stem: String, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

/// File name with `tag` appended to the stem.
pub fn name_with_tag(name: &str, tag: &str) -> String {
    let (stem, ext) = split_extension(name);
    join_extension(format!("{}{}{}", stem, TAG_SEPARATOR, tag), ext)
}
