//! Step candidates and the collections declaring them.

use std::fmt;

use narrate_patterns::{CompiledPattern, ParamSpec, PatternError, StepKeyword};
use thiserror::Error;

use super::StepArgs;
use crate::execution::StepFailure;

type Handler = Box<dyn Fn(&StepArgs) -> Result<(), StepFailure> + Send + Sync>;

/// Error raised while declaring a candidate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CandidateError {
    /// The pattern failed to compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// Candidates bind to a primary keyword; `And` is resolved per step.
    #[error("candidate '{pattern}' must be declared with Given, When or Then")]
    ContinuationKeyword {
        /// Offending pattern.
        pattern: String,
    },
    /// The number of hints differs from the number of capture groups.
    #[error("pattern '{pattern}' has {expected} parameter(s) but {actual} hint(s) were given")]
    HintCount {
        /// Offending pattern.
        pattern: String,
        /// Capture groups in the pattern.
        expected: usize,
        /// Hints supplied.
        actual: usize,
    },
}

/// A step implementation bound to a keyword and a pattern.
///
/// # Examples
///
/// ```
/// use narrate::StepCandidate;
/// use narrate_patterns::StepKeyword;
///
/// let candidate = StepCandidate::new(StepKeyword::When, "I add $n:u32", |_| Ok(()))
///     .expect("valid pattern")
///     .with_priority(1);
/// assert!(candidate.matches(StepKeyword::When, "I add 2"));
/// assert!(!candidate.matches(StepKeyword::Given, "I add 2"));
/// assert_eq!(candidate.hints(), [Some("u32".to_owned())]);
/// ```
pub struct StepCandidate {
    keyword: StepKeyword,
    pattern: CompiledPattern,
    priority: i32,
    hints: Vec<Option<String>>,
    handler: Handler,
}

impl StepCandidate {
    /// Declare a candidate from a `$name:hint` placeholder pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError`] when the pattern is malformed or `keyword`
    /// is `And`.
    pub fn new<F>(keyword: StepKeyword, pattern: &str, handler: F) -> Result<Self, CandidateError>
    where
        F: Fn(&StepArgs) -> Result<(), StepFailure> + Send + Sync + 'static,
    {
        Self::build(keyword, CompiledPattern::from_placeholders(pattern)?, handler)
    }

    /// Declare a candidate from a regular expression.
    ///
    /// Named groups name their arguments. Arguments stay text unless hints
    /// are attached with [`with_param_hints`](Self::with_param_hints).
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError`] when the regex is invalid or `keyword` is
    /// `And`.
    pub fn regex<F>(keyword: StepKeyword, pattern: &str, handler: F) -> Result<Self, CandidateError>
    where
        F: Fn(&StepArgs) -> Result<(), StepFailure> + Send + Sync + 'static,
    {
        Self::build(keyword, CompiledPattern::from_regex(pattern)?, handler)
    }

    fn build<F>(
        keyword: StepKeyword,
        pattern: CompiledPattern,
        handler: F,
    ) -> Result<Self, CandidateError>
    where
        F: Fn(&StepArgs) -> Result<(), StepFailure> + Send + Sync + 'static,
    {
        if !keyword.is_primary() {
            return Err(CandidateError::ContinuationKeyword {
                pattern: pattern.as_str().to_owned(),
            });
        }
        let hints = pattern.params().iter().map(|p| p.hint.clone()).collect();
        Ok(Self {
            keyword,
            pattern,
            priority: 0,
            hints,
            handler: Box::new(handler),
        })
    }

    /// Raise or lower the candidate's rank; higher wins over specificity.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Replace the parameter hints, one per capture group. `None` leaves the
    /// parameter as text.
    ///
    /// # Errors
    ///
    /// Returns [`CandidateError::HintCount`] when the number of hints does
    /// not equal the number of capture groups.
    pub fn with_param_hints<I, S>(mut self, hints: I) -> Result<Self, CandidateError>
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let hints: Vec<Option<String>> = hints
            .into_iter()
            .map(|hint| hint.map(Into::into))
            .collect();
        if hints.len() != self.pattern.params().len() {
            return Err(CandidateError::HintCount {
                pattern: self.pattern.as_str().to_owned(),
                expected: self.pattern.params().len(),
                actual: hints.len(),
            });
        }
        self.hints = hints;
        Ok(self)
    }

    /// Keyword the candidate answers to.
    #[must_use]
    pub const fn keyword(&self) -> StepKeyword {
        self.keyword
    }

    /// Compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Rank given at declaration; `0` unless raised.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Converter hint for each parameter.
    #[must_use]
    pub fn hints(&self) -> &[Option<String>] {
        &self.hints
    }

    /// Parameter names and hints in capture order.
    pub(crate) fn params(&self) -> impl Iterator<Item = (&ParamSpec, Option<&str>)> {
        self.pattern
            .params()
            .iter()
            .zip(self.hints.iter().map(Option::as_deref))
    }

    /// Whether the candidate answers to `keyword` and its pattern matches
    /// `text` in full.
    #[must_use]
    pub fn matches(&self, keyword: StepKeyword, text: &str) -> bool {
        self.keyword == keyword && self.pattern.is_match(text)
    }

    pub(crate) fn invoke(&self, args: &StepArgs) -> Result<(), StepFailure> {
        (self.handler)(args)
    }
}

impl fmt::Debug for StepCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCandidate")
            .field("keyword", &self.keyword)
            .field("pattern", &self.pattern.as_str())
            .field("priority", &self.priority)
            .field("hints", &self.hints)
            .finish_non_exhaustive()
    }
}

/// A named group of candidates, typically one per domain area.
///
/// Candidates keep their declaration order; it breaks ties between equally
/// ranked candidates of the same collection.
///
/// # Examples
///
/// ```
/// use narrate::CandidateSteps;
///
/// let steps = CandidateSteps::new("calculator")
///     .given("a value $v:i64", |_| Ok(()))?
///     .when("I add $v:i64", |_| Ok(()))?
///     .then_regex(r"result is (-?\d+)", |_| Ok(()))?;
/// assert_eq!(steps.len(), 3);
/// # Ok::<(), narrate::CandidateError>(())
/// ```
#[derive(Debug, Default)]
pub struct CandidateSteps {
    name: String,
    candidates: Vec<StepCandidate>,
}

macro_rules! keyword_builders {
    ($($keyword:ident => $placeholder:ident, $regex:ident;)*) => {
        $(
            #[doc = concat!("Declare a `", stringify!($keyword), "` candidate from a placeholder pattern.")]
            ///
            /// # Errors
            ///
            /// Returns [`CandidateError`] when the pattern is malformed.
            pub fn $placeholder<F>(self, pattern: &str, handler: F) -> Result<Self, CandidateError>
            where
                F: Fn(&StepArgs) -> Result<(), StepFailure> + Send + Sync + 'static,
            {
                let candidate = StepCandidate::new(StepKeyword::$keyword, pattern, handler)?;
                Ok(self.with_candidate(candidate))
            }

            #[doc = concat!("Declare a `", stringify!($keyword), "` candidate from a regular expression.")]
            ///
            /// # Errors
            ///
            /// Returns [`CandidateError`] when the regex is invalid.
            pub fn $regex<F>(self, pattern: &str, handler: F) -> Result<Self, CandidateError>
            where
                F: Fn(&StepArgs) -> Result<(), StepFailure> + Send + Sync + 'static,
            {
                let candidate = StepCandidate::regex(StepKeyword::$keyword, pattern, handler)?;
                Ok(self.with_candidate(candidate))
            }
        )*
    };
}

impl CandidateSteps {
    /// An empty collection called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            candidates: Vec::new(),
        }
    }

    keyword_builders! {
        Given => given, given_regex;
        When => when, when_regex;
        Then => then, then_regex;
    }

    /// Append an already built candidate.
    #[must_use]
    pub fn with_candidate(mut self, candidate: StepCandidate) -> Self {
        self.push(candidate);
        self
    }

    /// Append an already built candidate.
    pub fn push(&mut self, candidate: StepCandidate) {
        self.candidates.push(candidate);
    }

    /// Collection name used in ambiguity reports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Candidates in declaration order.
    #[must_use]
    pub fn candidates(&self) -> &[StepCandidate] {
        &self.candidates
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` when nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(feature = "diagnostics")]
mod diagnostics {
    use serde::Serialize;

    use narrate_patterns::PatternSyntax;

    use super::CandidateSteps;

    #[derive(Serialize)]
    struct DumpedCandidate<'a> {
        collection: &'a str,
        keyword: &'static str,
        pattern: &'a str,
        syntax: &'static str,
        priority: i32,
        hints: &'a [Option<String>],
    }

    impl CandidateSteps {
        /// Serialize every candidate as a JSON array.
        ///
        /// # Errors
        ///
        /// Returns an error if serialization fails.
        pub fn dump_json(&self) -> Result<String, serde_json::Error> {
            let dumped: Vec<_> = self
                .candidates
                .iter()
                .map(|candidate| DumpedCandidate {
                    collection: &self.name,
                    keyword: candidate.keyword.as_str(),
                    pattern: candidate.pattern.as_str(),
                    syntax: match candidate.pattern.syntax() {
                        PatternSyntax::Placeholders => "placeholders",
                        PatternSyntax::Regex => "regex",
                    },
                    priority: candidate.priority,
                    hints: &candidate.hints,
                })
                .collect();
            serde_json::to_string(&dumped)
        }
    }
}
