//! Story parsing and execution engine.
//!
//! Stories are plain text: an optional narrative, optional given stories and
//! lifecycle steps, then scenarios made of `Given`/`When`/`Then`/`And` step
//! lines, optionally driven by an examples table. The crate parses that text
//! with a configurable [`Keywords`] table, binds each step line to a
//! [`StepCandidate`] declared by the caller, runs the bound steps in story
//! order and narrates the run to a [`StoryReporter`].
//!
//! ```
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use std::sync::Arc;
//!
//! use narrate::{CandidateSteps, Configuration, InMemoryLoader, RecordingReporter, StoryRunner};
//!
//! let total = Arc::new(AtomicI64::new(0));
//! let (set, add, check) = (Arc::clone(&total), Arc::clone(&total), Arc::clone(&total));
//! let steps = [CandidateSteps::new("calculator")
//!     .given("a value $v:i64", move |args| {
//!         set.store(args.parse(0)?, Ordering::SeqCst);
//!         Ok(())
//!     })?
//!     .when("I add $v:i64", move |args| {
//!         add.fetch_add(args.parse(0)?, Ordering::SeqCst);
//!         Ok(())
//!     })?
//!     .then("result is $v:i64", move |args| {
//!         let expected: i64 = args.parse(0)?;
//!         let actual = check.load(Ordering::SeqCst);
//!         if actual == expected { Ok(()) } else { Err(format!("got {actual}").into()) }
//!     })?];
//!
//! let loader = InMemoryLoader::new().with_story(
//!     "add.story",
//!     "Scenario: add\nGiven a value <a>\nWhen I add <b>\nThen result is <sum>\n\
//!      Examples:\n|a|b|sum|\n|1|2|3|\n|2|2|4|",
//! );
//! let config = Configuration::default();
//! let reporter = RecordingReporter::default();
//! StoryRunner::new(&config, &steps, &loader).run_path("add.story", &mut reporter.clone())?;
//! assert_eq!(reporter.step_events().len(), 6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod converters;
mod embedder;
mod execution;
mod keywords;
mod loader;
mod model;
mod panic;
mod parser;
mod registry;
mod reporting;
mod runner;
mod table;

pub use config::{ConfigError, Configuration};
pub use converters::{ConversionError, ParamValue, ParameterConverter, ParameterConverters};
pub use embedder::{
    BatchSummary, EmbedderError, FailedStory, LoggingRunnerMonitor, RunnerMonitor, StoryEmbedder,
};
pub use execution::{Step, StepError, StepFailure, StepResult};
pub use keywords::{KeywordError, KeywordName, Keywords};
pub use loader::{InMemoryLoader, LoadError, StoryLoader};
pub use model::{Lifecycle, Narrative, Scenario, Story};
pub use narrate_patterns::StepKeyword;
pub use narrate_policy::{CauseKind, ErrorPolicy, ErrorStrategy, RunnerMode};
pub use panic::panic_message;
pub use parser::{ParseError, StoryParser};
pub use registry::{ArgError, CandidateError, CandidateSteps, StepArgs, StepCandidate, StepMatcher};
pub use reporting::{
    DelegatingReporter, LoggingReporter, RecordingReporter, ReportEvent, StoryReporter,
};
pub use runner::{RunError, StoryRunner};
pub use table::{ExampleRow, ExamplesTable, TableError, TableSeparators, substitute};
