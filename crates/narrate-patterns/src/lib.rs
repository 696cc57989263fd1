//! Step-pattern compilation utilities for the narrate story engine.
//!
//! The crate turns step patterns into anchored regular expressions, extracts
//! positional parameters from matched step text, and scores patterns so the
//! runtime can rank candidates that match the same line. It also provides the
//! canonical [`StepKeyword`] enum shared by the parser and the matcher.

mod capture;
mod errors;
mod hint;
mod keyword;
mod pattern;
mod specificity;

pub use capture::extract_captured_values;
pub use errors::{PatternError, PlaceholderErrorInfo};
pub use hint::get_type_pattern;
pub use keyword::{StepKeyword, StepKeywordParseError};
pub use pattern::{CompiledPattern, ParamSpec, PatternSyntax, build_regex_from_pattern};
pub use specificity::SpecificityScore;
