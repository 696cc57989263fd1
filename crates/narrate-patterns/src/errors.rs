//! Error types raised while compiling step patterns.

use std::fmt;
use thiserror::Error;

/// Location and description of a malformed placeholder.
///
/// # Examples
/// ```
/// use narrate_patterns::PlaceholderErrorInfo;
/// let info = PlaceholderErrorInfo::new("duplicate placeholder name", 7, Some("n".into()));
/// assert_eq!(info.position, 7);
/// assert_eq!(info.placeholder.as_deref(), Some("n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Short description of the problem.
    pub message: &'static str,
    /// Zero-based byte offset of the offending `$`.
    pub position: usize,
    /// Name of the placeholder involved, when one was parsed.
    pub placeholder: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Describe a placeholder failure at `position`.
    #[must_use]
    pub fn new(message: &'static str, position: usize, placeholder: Option<String>) -> Self {
        Self {
            message,
            position,
            placeholder,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.placeholder {
            write!(f, "{} (`${}` at byte {})", self.message, name, self.position)
        } else {
            write!(f, "{} (at byte {})", self.message, self.position)
        }
    }
}

/// Errors surfaced while turning a step pattern into a regular expression.
///
/// # Examples
/// ```
/// use narrate_patterns::{CompiledPattern, PatternError};
///
/// let err = CompiledPattern::from_placeholders("$a and $a").unwrap_err();
/// assert!(matches!(err, PatternError::Placeholder(_)));
/// ```
#[derive(Debug, Error)]
pub enum PatternError {
    /// The placeholder syntax of the pattern is malformed.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// The generated (or supplied) regular expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    placeholder: Option<String>,
) -> PatternError {
    PatternError::Placeholder(PlaceholderErrorInfo::new(message, position, placeholder))
}
