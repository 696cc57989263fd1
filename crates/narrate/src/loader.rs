//! Loading story text by path.

use hashbrown::HashMap;
use thiserror::Error;

/// Error raised when story text cannot be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Nothing is stored under the path.
    #[error("story '{path}' not found")]
    NotFound {
        /// Requested path.
        path: String,
    },
    /// The story exists but could not be read.
    #[error("story '{path}' could not be read: {reason}")]
    Unreadable {
        /// Requested path.
        path: String,
        /// Underlying failure.
        reason: String,
    },
}

/// Source of story text.
///
/// Closures taking a path and returning the text implement the trait, so a
/// file-system loader is a one-liner:
///
/// ```
/// use narrate::{LoadError, StoryLoader};
///
/// let loader = |path: &str| {
///     std::fs::read_to_string(path).map_err(|err| LoadError::Unreadable {
///         path: path.to_owned(),
///         reason: err.to_string(),
///     })
/// };
/// assert!(loader.load_story_text("no/such/file.story").is_err());
/// ```
pub trait StoryLoader {
    /// Text stored under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the path is unknown or unreadable.
    fn load_story_text(&self, path: &str) -> Result<String, LoadError>;
}

impl<F> StoryLoader for F
where
    F: Fn(&str) -> Result<String, LoadError>,
{
    fn load_story_text(&self, path: &str) -> Result<String, LoadError> {
        self(path)
    }
}

/// Stories held in memory, keyed by path.
///
/// # Examples
///
/// ```
/// use narrate::{InMemoryLoader, LoadError, StoryLoader};
///
/// let loader = InMemoryLoader::new().with_story("a.story", "Scenario: a");
/// assert_eq!(loader.load_story_text("a.story").as_deref(), Ok("Scenario: a"));
/// assert_eq!(
///     loader.load_story_text("b.story"),
///     Err(LoadError::NotFound { path: "b.story".into() })
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    stories: HashMap<String, String>,
}

impl InMemoryLoader {
    /// An empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` under `path`, returning the loader.
    #[must_use]
    pub fn with_story(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Store `text` under `path`, replacing earlier text.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.stories.insert(path.into(), text.into());
    }

    /// Number of stored stories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

impl StoryLoader for InMemoryLoader {
    fn load_story_text(&self, path: &str) -> Result<String, LoadError> {
        self.stories
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                path: path.to_owned(),
            })
    }
}
