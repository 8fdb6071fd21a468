//! Tag grammar.
//!
//! A valid tag:
//! - Starts with exactly one `@`, at position 0, and has no other `@`
//! - Contains none of `.`, `/` or `\` (they would break the file name)
//! - Is more than just the `@`, even after trimming whitespace
//!
//! Inner spaces are allowed: `@Deer hi` is a valid tag.

/// Validates a tag according to the tag grammar.
///
/// Checks run in a fixed order and the first failure is reported.
///
/// # Examples
/// ```
/// use tagpix::tags::validation::validate_tag;
///
/// assert!(validate_tag("@sunset").is_ok());
/// assert!(validate_tag("@Deer hi").is_ok());
///
/// assert!(validate_tag("sunset").is_err());
/// assert!(validate_tag("@@sunset").is_err());
/// assert!(validate_tag("@a.b").is_err());
/// assert!(validate_tag("@   ").is_err());
/// ```
pub fn validate_tag(tag: &str) -> Result<(), TagValidationError> {
    if tag.is_empty() {
        return Err(TagValidationError::Empty);
    }

    for forbidden in FORBIDDEN_CHARS {
        if tag.contains(*forbidden) {
            return Err(TagValidationError::ForbiddenCharacter(*forbidden));
        }
    }

    if !tag.starts_with('@') {
        return Err(TagValidationError::MissingPrefix);
    }
    if tag.matches('@').count() != 1 {
        return Err(TagValidationError::MultiplePrefixes);
    }

    if tag.chars().count() <= 1 || tag.trim() == "@" {
        return Err(TagValidationError::Empty);
    }

    Ok(())
}

/// Characters that may never appear in a tag.
const FORBIDDEN_CHARS: &[char] = &['.', '/', '\\'];

/// Error type for tag validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Tag contains `.`, `/` or `\`
    ForbiddenCharacter(char),
    /// Tag does not begin with `@`
    MissingPrefix,
    /// Tag has more than one `@`
    MultiplePrefixes,
    /// Tag is empty, or only an `@` with optional whitespace
    Empty,
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::ForbiddenCharacter(ch) => {
                write!(f, "Tag was not added as it contains \"{}\"", ch)
            }
            TagValidationError::MissingPrefix => {
                write!(f, "Tag was not added as it must begin with @")
            }
            TagValidationError::MultiplePrefixes => {
                write!(f, "Tag was not added as it must only have one @ sign")
            }
            TagValidationError::Empty => write!(f, "The tag can not be empty"),
        }
    }
}

impl std::error::Error for TagValidationError {}
