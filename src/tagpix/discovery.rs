//! Picture discovery.
//!
//! The index treats whatever a [`Discover`] implementation returns as the
//! ground truth for which pictures exist under a directory.

use crate::error::{Result, TagpixError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

pub trait Discover {
    /// Every picture path under `dir`, recursively.
    fn scan(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Recursive filesystem scan filtered by file extension.
#[derive(Debug, Clone)]
pub struct Scanner {
    extensions: Vec<String>,
}

impl Scanner {
    /// Extensions are compared case-insensitively and may be given with or
    /// without a leading dot.
    pub fn new<I, T>(extensions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn recognises(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl Discover for Scanner {
    fn scan(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(TagpixError::NotADirectory(dir.to_path_buf()));
        }

        let found: Vec<PathBuf> = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.recognises(e.path()))
            .map(|e| e.into_path())
            .collect();

        log::info!("Found {} picture(s) under {}", found.len(), dir.display());
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"img").unwrap();
    }

    #[test]
    fn scans_recursively_by_extension() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "sub/b.png");
        touch(dir.path(), "sub/deeper/c.gif");

        let found = Scanner::default().scan(dir.path()).unwrap();

        assert_eq!(
            found,
            vec![
                dir.path().join("a.jpg"),
                dir.path().join("sub/b.png"),
                dir.path().join("sub/deeper/c.gif"),
            ]
        );
    }

    #[test]
    fn extensions_match_case_insensitively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "A.JPG");
        touch(dir.path(), "b.Jpeg");

        let found = Scanner::default().scan(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn custom_extensions_accept_leading_dot() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.jpg");
        touch(dir.path(), "b.webp");

        let scanner = Scanner::new([".webp"]);
        assert_eq!(scanner.extensions(), &["webp"]);
        assert_eq!(scanner.scan(dir.path()).unwrap(), vec![dir.path().join("b.webp")]);
    }

    #[test]
    fn directories_named_like_pictures_are_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("album.jpg")).unwrap();
        assert!(Scanner::default().scan(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Scanner::default()
            .scan(&dir.path().join("nope"))
            .unwrap_err();
        assert!(matches!(err, TagpixError::NotADirectory(_)));
    }
}
