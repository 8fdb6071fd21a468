use crate::model::Picture;
use std::path::PathBuf;

/// A visible picture together with its 1-based display index.
#[derive(Debug, Clone)]
pub struct DisplayPicture {
    pub index: usize,
    pub picture: Picture,
}

/// Number visible pictures in view order, starting at 1.
pub fn index_pictures<'a, I>(pictures: I) -> Vec<DisplayPicture>
where
    I: IntoIterator<Item = &'a Picture>,
{
    pictures
        .into_iter()
        .enumerate()
        .map(|(i, picture)| DisplayPicture {
            index: i + 1,
            picture: picture.clone(),
        })
        .collect()
}

/// User input naming a picture: a display index or a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureSelector {
    Index(usize),
    Path(PathBuf),
}

impl std::fmt::Display for PictureSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PictureSelector::Index(i) => write!(f, "{}", i),
            PictureSelector::Path(p) => write!(f, "\"{}\"", p.display()),
        }
    }
}

impl std::str::FromStr for PictureSelector {
    type Err = String;

    /// All-digit input is an index; anything else is taken as a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty picture selector".to_string());
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<usize>() {
                Ok(0) => Err("Display indexes start at 1".to_string()),
                Ok(n) => Ok(PictureSelector::Index(n)),
                Err(e) => Err(format!("Invalid index {}: {}", s, e)),
            };
        }
        Ok(PictureSelector::Path(PathBuf::from(s)))
    }
}
