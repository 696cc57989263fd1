//! Performing bound steps and describing their outcome.

mod error;

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

pub use error::{StepError, StepFailure};

use crate::panic::panic_message;
use crate::registry::{StepArgs, StepCandidate};
use crate::reporting::StoryReporter;

#[derive(Debug)]
enum StepKind<'r> {
    Ignorable,
    Pending,
    Unresolvable(StepError),
    Bound {
        candidate: &'r StepCandidate,
        args: StepArgs,
    },
}

/// A story line prepared for execution.
///
/// Steps are produced by [`StepMatcher`](crate::StepMatcher) and either
/// performed or, once an earlier step in the same list went wrong, reported
/// as not performed.
#[derive(Debug)]
pub struct Step<'r> {
    text: String,
    kind: StepKind<'r>,
}

impl<'r> Step<'r> {
    pub(crate) fn ignorable(text: &str) -> Self {
        Self::with_kind(text, StepKind::Ignorable)
    }

    pub(crate) fn pending(text: &str) -> Self {
        Self::with_kind(text, StepKind::Pending)
    }

    pub(crate) fn unresolvable(text: &str, cause: StepError) -> Self {
        Self::with_kind(text, StepKind::Unresolvable(cause))
    }

    pub(crate) fn bound(text: &str, candidate: &'r StepCandidate, args: StepArgs) -> Self {
        Self::with_kind(text, StepKind::Bound { candidate, args })
    }

    fn with_kind(text: &str, kind: StepKind<'r>) -> Self {
        Self {
            text: text.to_owned(),
            kind,
        }
    }

    /// Step line as it will be reported.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Candidate the line is bound to, if any.
    #[must_use]
    pub fn candidate(&self) -> Option<&'r StepCandidate> {
        match self.kind {
            StepKind::Bound { candidate, .. } => Some(candidate),
            _ => None,
        }
    }

    /// Whether no candidate matched the line.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.kind, StepKind::Pending)
    }

    /// Run the step.
    ///
    /// Errors and panics raised by the implementation become a
    /// [`StepResult::Failed`]; nothing escapes.
    #[must_use]
    pub fn perform(&self) -> StepResult {
        let text = self.text.clone();
        match &self.kind {
            StepKind::Ignorable => StepResult::Ignorable { text },
            StepKind::Pending => StepResult::Pending {
                cause: StepError::Pending { text: text.clone() },
                text,
            },
            StepKind::Unresolvable(cause) => StepResult::Failed {
                text,
                cause: cause.clone(),
            },
            StepKind::Bound { candidate, args } => {
                match catch_unwind(AssertUnwindSafe(|| candidate.invoke(args))) {
                    Ok(Ok(())) => StepResult::Successful { text },
                    Ok(Err(source)) => StepResult::Failed {
                        cause: StepError::ExecutionFailed {
                            text: text.clone(),
                            pattern: candidate.pattern().as_str().to_owned(),
                            source: Arc::from(source),
                        },
                        text,
                    },
                    Err(payload) => StepResult::Failed {
                        cause: StepError::Panicked {
                            text: text.clone(),
                            pattern: candidate.pattern().as_str().to_owned(),
                            message: panic_message(payload.as_ref()),
                        },
                        text,
                    },
                }
            }
        }
    }

    /// Skip the step because an earlier one in its list went wrong.
    #[must_use]
    pub fn do_not_perform(&self) -> StepResult {
        StepResult::NotPerformed {
            text: self.text.clone(),
        }
    }
}

/// Outcome of one step.
#[derive(Debug, Clone)]
pub enum StepResult {
    /// The implementation returned normally.
    Successful {
        /// Step line.
        text: String,
    },
    /// The line was marked ignorable and nothing ran.
    Ignorable {
        /// Step line.
        text: String,
    },
    /// No candidate matched.
    Pending {
        /// Step line.
        text: String,
        /// Pending cause.
        cause: StepError,
    },
    /// Skipped because an earlier step in the list went wrong.
    NotPerformed {
        /// Step line.
        text: String,
    },
    /// The step could not be bound or its implementation failed.
    Failed {
        /// Step line.
        text: String,
        /// Failure cause.
        cause: StepError,
    },
}

impl StepResult {
    /// Step line the result belongs to.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Successful { text }
            | Self::Ignorable { text }
            | Self::Pending { text, .. }
            | Self::NotPerformed { text }
            | Self::Failed { text, .. } => text,
        }
    }

    /// Cause recorded by pending and failed results.
    #[must_use]
    pub const fn cause(&self) -> Option<&StepError> {
        match self {
            Self::Pending { cause, .. } | Self::Failed { cause, .. } => Some(cause),
            Self::Successful { .. } | Self::Ignorable { .. } | Self::NotPerformed { .. } => None,
        }
    }

    /// Emit the matching reporter event.
    pub fn describe_to(&self, reporter: &mut dyn StoryReporter) {
        match self {
            Self::Successful { text } => reporter.successful(text),
            Self::Ignorable { text } => reporter.ignorable(text),
            Self::Pending { text, .. } => reporter.pending(text),
            Self::NotPerformed { text } => reporter.not_performed(text),
            Self::Failed { text, cause } => reporter.failed(text, cause),
        }
    }
}
