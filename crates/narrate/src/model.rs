//! Parsed story model.
//!
//! Values here are produced by the parser and never change afterwards. Step
//! lines are kept as written, keyword included, so the matcher can resolve
//! `And` against the preceding step and reporters can echo the original text.

use crate::table::ExamplesTable;

/// Structured "in order to / as a / I want to" narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narrative {
    /// Benefit sought.
    pub in_order_to: String,
    /// Role seeking it.
    pub as_a: String,
    /// Feature wanted.
    pub i_want_to: String,
    /// Narrative text not belonging to any clause.
    pub text: String,
}

impl Narrative {
    /// Returns `true` when no clause and no free text was given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_order_to.is_empty()
            && self.as_a.is_empty()
            && self.i_want_to.is_empty()
            && self.text.is_empty()
    }
}

/// Story-level steps run around the scenarios.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lifecycle {
    /// Steps run once before the first scenario.
    pub before: Vec<String>,
    /// Steps run once after the last scenario.
    pub after: Vec<String>,
}

impl Lifecycle {
    /// Returns `true` when neither block has steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

/// One scenario of a story.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scenario {
    /// Title following the scenario keyword; empty for the implicit scenario.
    pub title: String,
    /// Paths of stories run before this scenario's own steps.
    pub given_stories: Vec<String>,
    /// Step lines as written, keyword included.
    pub steps: Vec<String>,
    /// Rows driving repeated runs; empty for a single run.
    pub examples: ExamplesTable,
}

/// A parsed story.
///
/// A story is identified by its path. Its name is the final path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Story {
    /// Path the story was loaded from.
    pub path: String,
    /// Free text preceding the first structural keyword.
    pub description: String,
    /// Narrative block, when present.
    pub narrative: Option<Narrative>,
    /// Paths of stories run before this one's lifecycle and scenarios.
    pub given_stories: Vec<String>,
    /// Story-level before and after steps.
    pub lifecycle: Lifecycle,
    /// Scenarios in document order.
    pub scenarios: Vec<Scenario>,
}

impl Story {
    /// Final segment of the story path.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate::Story;
    ///
    /// let story = Story {
    ///     path: "stories/bank/transfer.story".into(),
    ///     ..Story::default()
    /// };
    /// assert_eq!(story.name(), "transfer.story");
    /// ```
    #[must_use]
    pub fn name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.path.as_str())
    }
}
