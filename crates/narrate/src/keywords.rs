//! Keyword table recognising the structure of story text.
//!
//! Every structural token of the story grammar is a literal drawn from a
//! [`Keywords`] value, so stories may be written in any locale by supplying a
//! different table. The table is plain data passed to the parser and the
//! matcher; nothing about it is global.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use narrate_patterns::StepKeyword;
use thiserror::Error;

/// Name of an entry in the keyword table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordName {
    /// Opens the narrative block.
    Narrative,
    /// Narrative "in order to" clause.
    InOrderTo,
    /// Narrative "as a" clause.
    AsA,
    /// Narrative "I want to" clause.
    IWantTo,
    /// Opens a scenario.
    Scenario,
    /// Introduces a comma-separated list of given-story paths.
    GivenStories,
    /// Opens the story lifecycle block.
    Lifecycle,
    /// Lifecycle steps run before the scenarios.
    Before,
    /// Lifecycle steps run after the scenarios.
    After,
    /// Opens an examples table.
    ExamplesTable,
    /// Label for one examples row in reports.
    ExamplesTableRow,
    /// Separator between header cells.
    ExamplesTableHeaderSeparator,
    /// Separator between value cells.
    ExamplesTableValueSeparator,
    /// Prefix of table lines that are comments.
    ExamplesTableIgnorableSeparator,
    /// Precondition step.
    Given,
    /// Action step.
    When,
    /// Outcome step.
    Then,
    /// Continuation step.
    And,
    /// Prefix of steps that are reported but never run.
    Ignorable,
    /// Report label for pending steps.
    Pending,
    /// Report label for steps skipped after a failure.
    NotPerformed,
    /// Report label for failed steps.
    Failed,
}

impl KeywordName {
    /// Every keyword name, in table order.
    pub const ALL: [Self; 22] = [
        Self::Narrative,
        Self::InOrderTo,
        Self::AsA,
        Self::IWantTo,
        Self::Scenario,
        Self::GivenStories,
        Self::Lifecycle,
        Self::Before,
        Self::After,
        Self::ExamplesTable,
        Self::ExamplesTableRow,
        Self::ExamplesTableHeaderSeparator,
        Self::ExamplesTableValueSeparator,
        Self::ExamplesTableIgnorableSeparator,
        Self::Given,
        Self::When,
        Self::Then,
        Self::And,
        Self::Ignorable,
        Self::Pending,
        Self::NotPerformed,
        Self::Failed,
    ];

    /// Name used in configuration keys such as `keyword.Given`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Narrative => "Narrative",
            Self::InOrderTo => "InOrderTo",
            Self::AsA => "AsA",
            Self::IWantTo => "IWantTo",
            Self::Scenario => "Scenario",
            Self::GivenStories => "GivenStories",
            Self::Lifecycle => "Lifecycle",
            Self::Before => "Before",
            Self::After => "After",
            Self::ExamplesTable => "ExamplesTable",
            Self::ExamplesTableRow => "ExamplesTableRow",
            Self::ExamplesTableHeaderSeparator => "ExamplesTableHeaderSeparator",
            Self::ExamplesTableValueSeparator => "ExamplesTableValueSeparator",
            Self::ExamplesTableIgnorableSeparator => "ExamplesTableIgnorableSeparator",
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::Ignorable => "Ignorable",
            Self::Pending => "Pending",
            Self::NotPerformed => "NotPerformed",
            Self::Failed => "Failed",
        }
    }

    const fn default_literal(self) -> &'static str {
        match self {
            Self::Narrative => "Narrative:",
            Self::InOrderTo => "In order to:",
            Self::AsA => "As a:",
            Self::IWantTo => "I want to:",
            Self::Scenario => "Scenario:",
            Self::GivenStories => "GivenStories:",
            Self::Lifecycle => "Lifecycle:",
            Self::Before => "Before:",
            Self::After => "After:",
            Self::ExamplesTable => "Examples:",
            Self::ExamplesTableRow => "Example:",
            Self::ExamplesTableHeaderSeparator | Self::ExamplesTableValueSeparator => "|",
            Self::ExamplesTableIgnorableSeparator => "|--",
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::Ignorable => "!--",
            Self::Pending => "PENDING",
            Self::NotPerformed => "NOT PERFORMED",
            Self::Failed => "FAILED",
        }
    }

    /// Step keyword this entry introduces, if it is a step keyword.
    #[must_use]
    pub const fn step_keyword(self) -> Option<StepKeyword> {
        match self {
            Self::Given => Some(StepKeyword::Given),
            Self::When => Some(StepKeyword::When),
            Self::Then => Some(StepKeyword::Then),
            Self::And => Some(StepKeyword::And),
            _ => None,
        }
    }

    /// Whether the entry marks the start of a line in story text.
    ///
    /// Table separators and report labels are not line markers.
    #[must_use]
    pub const fn starts_line(self) -> bool {
        !matches!(
            self,
            Self::ExamplesTableRow
                | Self::ExamplesTableHeaderSeparator
                | Self::ExamplesTableValueSeparator
                | Self::ExamplesTableIgnorableSeparator
                | Self::Pending
                | Self::NotPerformed
                | Self::Failed
        )
    }

    /// Whether the literal must be followed by whitespace (or end the line).
    ///
    /// Step keywords are plain words, so `Givenchy` is not a `Given` step.
    const fn needs_word_boundary(self) -> bool {
        matches!(self, Self::Given | Self::When | Self::Then | Self::And)
    }
}

impl fmt::Display for KeywordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordName {
    type Err = KeywordError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == trimmed)
            .ok_or_else(|| KeywordError::UnknownName {
                name: trimmed.to_owned(),
            })
    }
}

/// Errors raised while building or validating a keyword table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum KeywordError {
    /// A table built from a map lacks an entry.
    #[error("keyword '{name}' not found")]
    KeywordNotFound {
        /// Missing entry.
        name: KeywordName,
    },
    /// A configuration key names no keyword.
    #[error("'{name}' is not a keyword name")]
    UnknownName {
        /// Name as supplied.
        name: String,
    },
    /// A keyword literal is empty or only whitespace.
    #[error("keyword '{name}' must not be empty")]
    Empty {
        /// Offending entry.
        name: KeywordName,
    },
    /// Two line markers share one literal, so lines cannot be classified.
    #[error("keywords '{first}' and '{second}' are both '{literal}'")]
    Ambiguous {
        /// Entry listed first in table order.
        first: KeywordName,
        /// Entry listed second in table order.
        second: KeywordName,
        /// Shared literal.
        literal: String,
    },
}

/// Literal tokens of the story grammar.
///
/// # Examples
///
/// ```
/// use narrate::{KeywordName, Keywords};
///
/// let keywords = Keywords::default().with(KeywordName::Given, "Gegeben");
/// assert_eq!(keywords.get(KeywordName::Given), "Gegeben");
/// assert_eq!(keywords.get(KeywordName::Scenario), "Scenario:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    literals: HashMap<KeywordName, String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            literals: KeywordName::ALL
                .into_iter()
                .map(|name| (name, name.default_literal().to_owned()))
                .collect(),
        }
    }
}

impl Keywords {
    /// Build a table from a complete mapping of names to literals.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::KeywordNotFound`] for the first name (in table
    /// order) the mapping does not cover.
    pub fn from_map<I, S>(entries: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = (KeywordName, S)>,
        S: Into<String>,
    {
        let literals: HashMap<KeywordName, String> = entries
            .into_iter()
            .map(|(name, literal)| (name, literal.into()))
            .collect();
        if let Some(name) = KeywordName::ALL
            .into_iter()
            .find(|name| !literals.contains_key(name))
        {
            return Err(KeywordError::KeywordNotFound { name });
        }
        Ok(Self { literals })
    }

    /// Replace one literal.
    #[must_use]
    pub fn with(mut self, name: KeywordName, literal: impl Into<String>) -> Self {
        self.literals.insert(name, literal.into());
        self
    }

    /// Literal for `name`.
    #[must_use]
    pub fn get(&self, name: KeywordName) -> &str {
        self.literals.get(&name).map_or("", String::as_str)
    }

    /// Check that every line marker is non-empty and distinct.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordError::Empty`] or [`KeywordError::Ambiguous`].
    pub fn validate(&self) -> Result<(), KeywordError> {
        if let Some(name) = KeywordName::ALL
            .into_iter()
            .find(|name| self.get(*name).trim().is_empty())
        {
            return Err(KeywordError::Empty { name });
        }
        let markers: Vec<KeywordName> = KeywordName::ALL
            .into_iter()
            .filter(|name| name.starts_line())
            .collect();
        for (index, first) in markers.iter().enumerate() {
            for second in markers.iter().skip(index + 1) {
                let literal = self.get(*first);
                if literal == self.get(*second) {
                    return Err(KeywordError::Ambiguous {
                        first: *first,
                        second: *second,
                        literal: literal.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Line markers ordered longest literal first, so that a marker which
    /// prefixes another (`Given` and `GivenStories:`) never shadows it.
    pub(crate) fn line_markers(&self) -> Vec<(KeywordName, &str)> {
        let mut markers: Vec<(KeywordName, &str)> = KeywordName::ALL
            .into_iter()
            .filter(|name| name.starts_line())
            .map(|name| (name, self.get(name)))
            .collect();
        markers.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(&b.0)));
        markers
    }

    /// Identify the line marker starting `line` and return the remaining text,
    /// trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate::{KeywordName, Keywords};
    ///
    /// let keywords = Keywords::default();
    /// assert_eq!(
    ///     keywords.classify("GivenStories: a.story"),
    ///     Some((KeywordName::GivenStories, "a.story"))
    /// );
    /// assert_eq!(
    ///     keywords.classify("Given a value 1"),
    ///     Some((KeywordName::Given, "a value 1"))
    /// );
    /// assert_eq!(keywords.classify("Givenchy"), None);
    /// ```
    #[must_use]
    pub fn classify<'a>(&self, line: &'a str) -> Option<(KeywordName, &'a str)> {
        self.line_markers()
            .into_iter()
            .find_map(|(name, literal)| strip_marker(line, name, literal).map(|rest| (name, rest)))
    }

    /// Split a step line into its step keyword and the text after it.
    ///
    /// Returns `None` for ignorable lines and for lines that do not start
    /// with a step keyword.
    #[must_use]
    pub fn split_step<'a>(&self, line: &'a str) -> Option<(StepKeyword, &'a str)> {
        let (name, rest) = self.classify(line)?;
        name.step_keyword().map(|keyword| (keyword, rest))
    }

    /// Whether `line` starts with the ignorable marker.
    #[must_use]
    pub fn is_ignorable(&self, line: &str) -> bool {
        matches!(self.classify(line), Some((KeywordName::Ignorable, _)))
    }
}

fn strip_marker<'a>(line: &'a str, name: KeywordName, literal: &str) -> Option<&'a str> {
    if literal.is_empty() {
        return None;
    }
    let rest = line.strip_prefix(literal)?;
    if name.needs_word_boundary() && !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Scenario: add", KeywordName::Scenario, "add")]
    #[case("Examples:", KeywordName::ExamplesTable, "")]
    #[case("And result is 3", KeywordName::And, "result is 3")]
    #[case("!-- TODO later", KeywordName::Ignorable, "TODO later")]
    #[case("!--muted", KeywordName::Ignorable, "muted")]
    #[case("In order to: learn", KeywordName::InOrderTo, "learn")]
    fn classifies_default_markers(
        #[case] line: &str,
        #[case] expected: KeywordName,
        #[case] rest: &str,
    ) {
        assert_eq!(Keywords::default().classify(line), Some((expected, rest)));
    }

    #[test]
    fn plain_text_is_not_classified() {
        assert_eq!(Keywords::default().classify("just words"), None);
        assert_eq!(Keywords::default().classify("Thenceforth"), None);
    }

    #[test]
    fn default_table_is_valid() {
        assert_eq!(Keywords::default().validate(), Ok(()));
    }

    #[test]
    fn shared_markers_are_ambiguous() {
        let keywords = Keywords::default().with(KeywordName::When, "Given");
        assert_eq!(
            keywords.validate(),
            Err(KeywordError::Ambiguous {
                first: KeywordName::Given,
                second: KeywordName::When,
                literal: "Given".into(),
            })
        );
    }

    #[test]
    fn separators_may_share_a_literal() {
        let keywords = Keywords::default()
            .with(KeywordName::ExamplesTableHeaderSeparator, "!")
            .with(KeywordName::ExamplesTableValueSeparator, "!");
        assert_eq!(keywords.validate(), Ok(()));
    }

    #[test]
    fn empty_literals_are_rejected() {
        let keywords = Keywords::default().with(KeywordName::Scenario, "  ");
        assert_eq!(
            keywords.validate(),
            Err(KeywordError::Empty {
                name: KeywordName::Scenario
            })
        );
    }

    #[test]
    fn from_map_reports_missing_entry() {
        let entries = KeywordName::ALL
            .into_iter()
            .filter(|name| *name != KeywordName::Failed)
            .map(|name| (name, name.default_literal()));
        assert_eq!(
            Keywords::from_map(entries),
            Err(KeywordError::KeywordNotFound {
                name: KeywordName::Failed
            })
        );
    }

    #[test]
    fn names_parse_from_configuration_keys() {
        assert_eq!("IWantTo".parse::<KeywordName>(), Ok(KeywordName::IWantTo));
        assert!("Whence".parse::<KeywordName>().is_err());
    }

    #[test]
    fn split_step_skips_ignorable_lines() {
        let keywords = Keywords::default();
        assert_eq!(
            keywords.split_step("When I add 2"),
            Some((StepKeyword::When, "I add 2"))
        );
        assert_eq!(keywords.split_step("!-- When I add 2"), None);
        assert!(keywords.is_ignorable("!-- When I add 2"));
    }
}
