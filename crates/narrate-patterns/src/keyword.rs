//! Canonical step keyword shared by the story parser and the step matcher.
//!
//! Story text may spell keywords in any locale; the keyword table maps those
//! literals onto [`StepKeyword`] so matching never depends on the spelling.

use std::fmt;
use std::str::FromStr;

/// Category of a step line or of a step candidate.
///
/// `And` only appears on step lines. The matcher resolves it against the most
/// recent primary keyword with [`resolve`](Self::resolve) before comparing it
/// with candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepKeyword {
    /// Precondition.
    Given,
    /// Action.
    When,
    /// Outcome.
    Then,
    /// Continuation of the previous primary keyword.
    And,
}

impl StepKeyword {
    /// Canonical English spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::When.as_str(), "When");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
        }
    }

    /// Returns `true` for `Given`, `When` and `Then`.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        !matches!(self, Self::And)
    }

    /// Resolve `And` to the keyword of the most recent primary step.
    ///
    /// Primary keywords are recorded in `prev` and returned unchanged. An `And`
    /// with nothing before it resolves to `Given`.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate_patterns::StepKeyword;
    ///
    /// let mut prev = None;
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::Given);
    /// assert_eq!(StepKeyword::Then.resolve(&mut prev), StepKeyword::Then);
    /// assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::Then);
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Self {
        if self.is_primary() {
            *prev = Some(self);
            self
        } else {
            prev.unwrap_or(Self::Given)
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a step keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepKeywordParseError(pub String);

impl fmt::Display for StepKeywordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown step keyword '{}'", self.0)
    }
}

impl std::error::Error for StepKeywordParseError {}

impl FromStr for StepKeyword {
    type Err = StepKeywordParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [Self::Given, Self::When, Self::Then, Self::And]
            .into_iter()
            .find(|kw| trimmed.eq_ignore_ascii_case(kw.as_str()))
            .ok_or_else(|| StepKeywordParseError(trimmed.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Given", StepKeyword::Given)]
    #[case(" when ", StepKeyword::When)]
    #[case("THEN", StepKeyword::Then)]
    #[case("and", StepKeyword::And)]
    fn parses_without_regard_to_case(#[case] input: &str, #[case] expected: StepKeyword) {
        assert_eq!(input.parse::<StepKeyword>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_keywords() {
        assert_eq!(
            "But".parse::<StepKeyword>(),
            Err(StepKeywordParseError("But".into()))
        );
    }

    #[test]
    fn and_inherits_without_updating_previous() {
        let mut prev = Some(StepKeyword::When);
        assert_eq!(StepKeyword::And.resolve(&mut prev), StepKeyword::When);
        assert_eq!(prev, Some(StepKeyword::When));
    }

    #[test]
    fn primary_keywords_replace_previous() {
        let mut prev = Some(StepKeyword::Given);
        assert_eq!(StepKeyword::Then.resolve(&mut prev), StepKeyword::Then);
        assert_eq!(prev, Some(StepKeyword::Then));
    }
}
