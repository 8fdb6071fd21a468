//! Image-recognition seam.
//!
//! Recognisers return plain human-readable labels such as `"beach"`. They are
//! neither validated nor deduplicated here; accepting a suggestion routes it
//! through the vocabulary like any other tag.

use crate::error::Result;
use std::path::Path;

/// How many labels are offered per picture.
pub const SUGGESTION_LIMIT: usize = 4;

pub trait TagSuggester {
    fn suggest(&self, picture: &Path) -> Result<Vec<String>>;
}

/// Turn a recogniser label into tag text by adding the `@` prefix when it is
/// missing. The result may still fail validation.
pub fn label_to_tag(label: &str) -> String {
    if label.starts_with('@') {
        label.to_string()
    } else {
        format!("@{}", label)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_gain_prefix_once() {
        assert_eq!(label_to_tag("beach"), "@beach");
        assert_eq!(label_to_tag("@beach"), "@beach");
        assert_eq!(label_to_tag("no person"), "@no person");
    }
}
