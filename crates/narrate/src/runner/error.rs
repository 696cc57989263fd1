//! Errors surfaced by a story run.

use thiserror::Error;

use crate::execution::StepError;
use crate::loader::LoadError;
use crate::parser::ParseError;

/// Why a story run did not complete.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RunError {
    /// The story text could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The story text could not be parsed.
    #[error("story '{path}' could not be parsed: {source}")]
    Parse {
        /// Story path.
        path: String,
        /// Parser failure.
        #[source]
        source: ParseError,
    },
    /// A story includes itself, directly or through other given stories.
    #[error("given story '{path}' is already running: {}", .chain.join(" -> "))]
    CyclicGivenStory {
        /// Path that closes the cycle.
        path: String,
        /// Stories in progress, outermost first, ending with `path`.
        chain: Vec<String>,
    },
    /// A step cause raised by the error strategy.
    #[error(transparent)]
    Step(#[from] StepError),
}

impl RunError {
    /// Step cause, when the run failed because of a step.
    #[must_use]
    pub const fn step_error(&self) -> Option<&StepError> {
        match self {
            Self::Step(cause) => Some(cause),
            _ => None,
        }
    }
}
