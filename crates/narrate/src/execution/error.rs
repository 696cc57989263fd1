//! Causes recorded against individual steps.

use std::error::Error as StdError;
use std::sync::Arc;

use narrate_policy::CauseKind;
use thiserror::Error;

use crate::converters::ConversionError;

/// Error type returned by step implementations.
pub type StepFailure = Box<dyn StdError + Send + Sync>;

/// Why a step did not succeed.
///
/// Causes are recorded rather than raised, so every variant is cheap to
/// clone and can be both reported and handed to the error strategy.
///
/// # Examples
///
/// ```
/// use narrate::StepError;
/// use narrate_policy::CauseKind;
///
/// let pending = StepError::Pending { text: "Then result is 4".into() };
/// assert_eq!(pending.kind(), CauseKind::Pending);
/// assert_eq!(pending.text(), "Then result is 4");
/// ```
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum StepError {
    /// No candidate matches the step.
    #[error("no step definition matches '{text}'")]
    Pending {
        /// Step line.
        text: String,
    },
    /// Equally specific candidates from different collections match the step.
    #[error(
        "Ambiguous step definition for '{text}'. Matches: {}",
        describe_matches(.patterns, .collections)
    )]
    AmbiguousMatch {
        /// Step line.
        text: String,
        /// Competing patterns.
        patterns: Vec<String>,
        /// Collections declaring them, aligned with `patterns`.
        collections: Vec<String>,
    },
    /// A captured parameter was rejected by its converter.
    #[error("parameter {index} of '{text}' is not a valid {hint} ('{value}'): {source}")]
    ParameterConversion {
        /// Step line.
        text: String,
        /// 1-based parameter position.
        index: usize,
        /// Type hint selecting the converter.
        hint: String,
        /// Captured text.
        value: String,
        /// Converter failure.
        #[source]
        source: ConversionError,
    },
    /// The step implementation returned an error.
    #[error("step '{text}' failed: {source}")]
    ExecutionFailed {
        /// Step line.
        text: String,
        /// Pattern of the matched candidate.
        pattern: String,
        /// Error returned by the implementation.
        #[source]
        source: Arc<dyn StdError + Send + Sync>,
    },
    /// The step implementation panicked.
    #[error("step '{text}' panicked: {message}")]
    Panicked {
        /// Step line.
        text: String,
        /// Pattern of the matched candidate.
        pattern: String,
        /// Panic payload rendered as text.
        message: String,
    },
}

impl StepError {
    /// Severity class used to select an error strategy.
    #[must_use]
    pub const fn kind(&self) -> CauseKind {
        match self {
            Self::Pending { .. } => CauseKind::Pending,
            _ => CauseKind::Failure,
        }
    }

    /// Step line the cause belongs to.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Pending { text }
            | Self::AmbiguousMatch { text, .. }
            | Self::ParameterConversion { text, .. }
            | Self::ExecutionFailed { text, .. }
            | Self::Panicked { text, .. } => text,
        }
    }

    /// Returns `true` for a pending cause.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

fn describe_matches(patterns: &[String], collections: &[String]) -> String {
    patterns
        .iter()
        .zip(collections)
        .map(|(pattern, collection)| format!("'{pattern}' ({collection})"))
        .collect::<Vec<_>>()
        .join(", ")
}
