//! Candidate steps and their matching.
//!
//! Callers declare [`StepCandidate`]s in named [`CandidateSteps`]
//! collections. The [`StepMatcher`] binds each story line to at most one
//! candidate and converts the captured parameters into [`StepArgs`].

mod args;
mod candidate;
mod matcher;

pub use args::{ArgError, StepArgs};
pub use candidate::{CandidateError, CandidateSteps, StepCandidate};
pub use matcher::StepMatcher;
