//! Execution policy types for the narrate story engine.
//!
//! These are plain values chosen once before a run and read during it. The
//! runtime records at most one cause per story run; [`ErrorPolicy::select`]
//! maps the kind of that cause onto the [`ErrorStrategy`] that decides what
//! happens to it.

use std::fmt;
use std::str::FromStr;

/// What to do with the cause recorded by a story run.
///
/// # Examples
///
/// ```
/// use narrate_policy::ErrorStrategy;
///
/// assert_eq!("rethrow".parse::<ErrorStrategy>(), Ok(ErrorStrategy::Rethrow));
/// assert!(ErrorStrategy::Rethrow.propagates());
/// assert!(!ErrorStrategy::Log.propagates());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorStrategy {
    /// Absorb the cause without a trace.
    #[default]
    Silent,
    /// Absorb the cause after writing it to the log.
    Log,
    /// Return the cause to the caller.
    Rethrow,
}

impl ErrorStrategy {
    /// Lowercase configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Log => "log",
            Self::Rethrow => "rethrow",
        }
    }

    /// Returns `true` when the cause reaches the caller.
    #[must_use]
    pub const fn propagates(self) -> bool {
        matches!(self, Self::Rethrow)
    }
}

impl fmt::Display for ErrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown error strategy '{}' (expected silent, log or rethrow)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for ErrorStrategy {
    type Err = UnknownStrategy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        [Self::Silent, Self::Log, Self::Rethrow]
            .into_iter()
            .find(|strategy| trimmed.eq_ignore_ascii_case(strategy.as_str()))
            .ok_or_else(|| UnknownStrategy(trimmed.to_owned()))
    }
}

/// Severity class of a recorded cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CauseKind {
    /// No candidate matched the step.
    Pending,
    /// Anything else: ambiguity, conversion or execution failure.
    Failure,
}

impl CauseKind {
    /// Whether a later cause of kind `next` replaces a recorded cause of
    /// this kind. Only a pending cause may be replaced, and only by a
    /// failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use narrate_policy::CauseKind;
    ///
    /// assert!(CauseKind::Pending.yields_to(CauseKind::Failure));
    /// assert!(!CauseKind::Failure.yields_to(CauseKind::Pending));
    /// assert!(!CauseKind::Failure.yields_to(CauseKind::Failure));
    /// ```
    #[must_use]
    pub const fn yields_to(self, next: Self) -> bool {
        matches!((self, next), (Self::Pending, Self::Failure))
    }
}

/// Strategy pair selected by cause kind.
///
/// The default leaves pending steps silent and rethrows failures.
///
/// # Examples
///
/// ```
/// use narrate_policy::{CauseKind, ErrorPolicy, ErrorStrategy};
///
/// let policy = ErrorPolicy::default();
/// assert_eq!(policy.select(CauseKind::Pending), ErrorStrategy::Silent);
/// assert_eq!(policy.select(CauseKind::Failure), ErrorStrategy::Rethrow);
///
/// let strict = policy.with_pending(ErrorStrategy::Rethrow);
/// assert_eq!(strict.select(CauseKind::Pending), ErrorStrategy::Rethrow);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorPolicy {
    /// Strategy governing pending causes.
    pub pending: ErrorStrategy,
    /// Strategy governing every other cause.
    pub error: ErrorStrategy,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            pending: ErrorStrategy::Silent,
            error: ErrorStrategy::Rethrow,
        }
    }
}

impl ErrorPolicy {
    /// Replace the pending strategy.
    #[must_use]
    pub const fn with_pending(mut self, strategy: ErrorStrategy) -> Self {
        self.pending = strategy;
        self
    }

    /// Replace the strategy for non-pending causes.
    #[must_use]
    pub const fn with_error(mut self, strategy: ErrorStrategy) -> Self {
        self.error = strategy;
        self
    }

    /// Strategy governing a cause of `kind`.
    #[must_use]
    pub const fn select(self, kind: CauseKind) -> ErrorStrategy {
        match kind {
            CauseKind::Pending => self.pending,
            CauseKind::Failure => self.error,
        }
    }
}

/// How a multi-story run treats its stories.
///
/// # Examples
///
/// ```
/// use narrate_policy::RunnerMode;
///
/// let mode = RunnerMode::default().with_batch(true);
/// assert!(mode.batch);
/// assert!(!mode.skip);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunnerMode {
    /// Run every story and raise one aggregate failure at the end.
    pub batch: bool,
    /// Run nothing.
    pub skip: bool,
    /// Report story failures to the monitor instead of returning them.
    pub ignore_failure: bool,
}

impl RunnerMode {
    /// Set the batch flag.
    #[must_use]
    pub const fn with_batch(mut self, batch: bool) -> Self {
        self.batch = batch;
        self
    }

    /// Set the skip flag.
    #[must_use]
    pub const fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Set the ignore-failure flag.
    #[must_use]
    pub const fn with_ignore_failure(mut self, ignore_failure: bool) -> Self {
        self.ignore_failure = ignore_failure;
        self
    }
}
