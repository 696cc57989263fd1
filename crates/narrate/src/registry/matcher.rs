//! Matching step lines against candidate collections.

use log::{debug, warn};
use narrate_patterns::{SpecificityScore, StepKeyword};

use super::{CandidateSteps, StepArgs, StepCandidate};
use crate::converters::ParameterConverters;
use crate::execution::{Step, StepError};
use crate::keywords::Keywords;

type Rank = (i32, SpecificityScore);

struct Hit<'r> {
    collection: &'r CandidateSteps,
    candidate: &'r StepCandidate,
    captures: Vec<String>,
}

impl Hit<'_> {
    fn rank(&self) -> Rank {
        rank(self.candidate)
    }
}

fn rank(candidate: &StepCandidate) -> Rank {
    (candidate.priority(), candidate.pattern().specificity())
}

/// Binds step lines to the best matching candidate.
///
/// Candidates are ranked by priority, then by pattern specificity. Within a
/// collection the first declared of equally ranked candidates wins; equally
/// ranked winners from different collections make the step ambiguous.
///
/// # Examples
///
/// ```
/// use narrate::{CandidateSteps, Keywords, ParameterConverters, StepMatcher};
///
/// let steps = [CandidateSteps::new("calculator")
///     .given("a value $v:i64", |_| Ok(()))?
///     .then("result is $v:i64", |_| Ok(()))?];
/// let keywords = Keywords::default();
/// let converters = ParameterConverters::default();
/// let matcher = StepMatcher::new(&steps, &keywords, &converters);
///
/// let prepared = matcher.prepare(&["Given a value 1", "And result is 1", "Then nothing"]);
/// assert!(prepared[0].candidate().is_some());
/// assert!(prepared[1].candidate().is_none());
/// assert!(prepared[2].is_pending());
/// # Ok::<(), narrate::CandidateError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StepMatcher<'r> {
    collections: &'r [CandidateSteps],
    keywords: &'r Keywords,
    converters: &'r ParameterConverters,
}

impl<'r> StepMatcher<'r> {
    /// Match against `collections`, splitting lines with `keywords` and
    /// converting parameters with `converters`.
    #[must_use]
    pub const fn new(
        collections: &'r [CandidateSteps],
        keywords: &'r Keywords,
        converters: &'r ParameterConverters,
    ) -> Self {
        Self {
            collections,
            keywords,
            converters,
        }
    }

    /// Hints declared by candidates that no converter handles, as
    /// `(pattern, hint)` pairs in declaration order. Their parameters stay
    /// text.
    #[must_use]
    pub fn unsupported_hints(&self) -> Vec<(&'r str, &'r str)> {
        let converters = self.converters;
        self.collections
            .iter()
            .flat_map(CandidateSteps::candidates)
            .flat_map(|candidate| {
                candidate
                    .hints()
                    .iter()
                    .flatten()
                    .map(move |hint| (candidate.pattern().as_str(), hint.as_str()))
            })
            .filter(|(_, hint)| !converters.supports(hint))
            .collect()
    }

    /// Bind every line of one step list.
    ///
    /// `And` lines take the keyword of the nearest preceding primary step in
    /// the same list; a leading `And` is treated as `Given`.
    pub fn prepare<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Step<'r>> {
        let mut previous = None;
        lines
            .iter()
            .map(|line| self.match_step(line.as_ref(), &mut previous))
            .collect()
    }

    /// Bind a single line, resolving `And` against `previous`.
    pub fn match_step(&self, line: &str, previous: &mut Option<StepKeyword>) -> Step<'r> {
        if self.keywords.is_ignorable(line) {
            return Step::ignorable(line);
        }
        let Some((keyword, text)) = self.keywords.split_step(line) else {
            debug!("'{line}' does not start with a step keyword");
            return Step::pending(line);
        };
        let keyword = keyword.resolve(previous);

        let hits: Vec<Hit<'r>> = self
            .collections
            .iter()
            .filter_map(|collection| best_in(collection, keyword, text))
            .collect();
        let Some(top) = hits.iter().map(Hit::rank).max() else {
            warn!("no candidate matches '{line}'");
            return Step::pending(line);
        };
        let mut winners = hits.into_iter().filter(|hit| hit.rank() == top);
        let Some(winner) = winners.next() else {
            return Step::pending(line);
        };
        let rest: Vec<Hit<'r>> = winners.collect();
        if !rest.is_empty() {
            let (patterns, collections) = std::iter::once(&winner)
                .chain(&rest)
                .map(|hit| {
                    (
                        hit.candidate.pattern().as_str().to_owned(),
                        hit.collection.name().to_owned(),
                    )
                })
                .unzip();
            let err = StepError::AmbiguousMatch {
                text: line.to_owned(),
                patterns,
                collections,
            };
            warn!("{err}");
            return Step::unresolvable(line, err);
        }
        self.bind(line, winner)
    }

    fn bind(&self, line: &str, hit: Hit<'r>) -> Step<'r> {
        debug!(
            "'{line}' matched '{}' from '{}'",
            hit.candidate.pattern().as_str(),
            hit.collection.name()
        );
        let mut args = StepArgs::new(line);
        for (index, ((spec, hint), raw)) in hit.candidate.params().zip(hit.captures).enumerate() {
            match self.converters.convert(hint, &raw) {
                Ok(value) => args.push(spec.name.as_deref(), raw, value),
                Err(source) => {
                    let err = StepError::ParameterConversion {
                        text: line.to_owned(),
                        index: index + 1,
                        hint: hint.unwrap_or_default().to_owned(),
                        value: raw,
                        source,
                    };
                    debug!("{err}");
                    return Step::unresolvable(line, err);
                }
            }
        }
        Step::bound(line, hit.candidate, args)
    }
}

fn best_in<'r>(collection: &'r CandidateSteps, keyword: StepKeyword, text: &str) -> Option<Hit<'r>> {
    collection
        .candidates()
        .iter()
        .filter(|candidate| candidate.keyword() == keyword)
        .filter_map(|candidate| {
            candidate
                .pattern()
                .captures(text)
                .map(|captures| Hit {
                    collection,
                    candidate,
                    captures,
                })
        })
        .fold(None, |best: Option<Hit<'r>>, hit| match best {
            Some(current) if current.rank() >= hit.rank() => Some(current),
            _ => Some(hit),
        })
}
