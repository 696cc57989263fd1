//! Errors raised while parsing story text.

use thiserror::Error;

use crate::keywords::KeywordError;
use crate::table::TableError;

/// Story text that does not follow the keyword grammar.
///
/// Line numbers are 1-based. A parse error means no story is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The keyword table cannot classify lines unambiguously.
    #[error("invalid keyword table: {0}")]
    Keywords(#[from] KeywordError),
    /// A given-stories block lists no paths.
    #[error("line {line}: given stories keyword is not followed by any story path")]
    EmptyGivenStories {
        /// Line of the given-stories keyword.
        line: usize,
    },
    /// Given stories appear after a scenario's first step.
    #[error("line {line}: given stories must precede the steps of a scenario")]
    MisplacedGivenStories {
        /// Offending line.
        line: usize,
    },
    /// A second narrative block.
    #[error("line {line}: a story has at most one narrative")]
    DuplicateNarrative {
        /// Offending line.
        line: usize,
    },
    /// A narrative after given stories, lifecycle or scenarios.
    #[error("line {line}: the narrative must follow the story description")]
    MisplacedNarrative {
        /// Offending line.
        line: usize,
    },
    /// A `Lifecycle:` section after the first scenario.
    #[error("line {line}: lifecycle blocks must precede the first scenario")]
    MisplacedLifecycle {
        /// Offending line.
        line: usize,
    },
    /// An examples keyword outside a scenario, or a second one in the same
    /// scenario.
    #[error("line {line}: examples must close a scenario")]
    MisplacedExamples {
        /// Offending line.
        line: usize,
    },
    /// A line that belongs to no block.
    #[error("line {line}: unexpected '{text}'")]
    UnexpectedLine {
        /// Offending line.
        line: usize,
        /// Its trimmed text.
        text: String,
    },
    /// A scenario's examples table is malformed.
    #[error("scenario '{scenario}': {source}")]
    MalformedTable {
        /// Title of the scenario.
        scenario: String,
        /// Table failure.
        #[source]
        source: TableError,
    },
}
