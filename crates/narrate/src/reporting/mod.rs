//! Story reporting.
//!
//! The runner narrates a run as a sequence of events on a [`StoryReporter`].
//! Every method has an empty default body, so a reporter implements only
//! what it cares about. [`DelegatingReporter`] fans events out to several
//! reporters, [`RecordingReporter`] keeps them for inspection and
//! [`LoggingReporter`] writes them to the `log` facade.

mod delegating;
#[cfg(feature = "diagnostics")]
mod json;
mod logging;
mod recording;

pub use delegating::DelegatingReporter;
pub use logging::LoggingReporter;
pub use recording::RecordingReporter;

use crate::execution::StepError;
use crate::model::Story;
use crate::table::{ExampleRow, ExamplesTable};

/// Receives the events of a story run, in execution order.
#[expect(unused_variables, reason = "default bodies ignore their arguments")]
pub trait StoryReporter {
    /// A story starts; `embedded` marks a given story run on behalf of
    /// another.
    fn before_story(&mut self, story: &Story, embedded: bool) {}
    /// The story started by the matching `before_story` ends.
    fn after_story(&mut self, embedded: bool) {}
    /// Given stories are about to run.
    fn given_stories(&mut self, paths: &[String]) {}
    /// A scenario starts.
    fn before_scenario(&mut self, title: &str) {}
    /// The current scenario ends.
    fn after_scenario(&mut self) {}
    /// The current scenario runs once per row of `table`.
    fn before_examples(&mut self, steps: &[String], table: &ExamplesTable) {}
    /// The next run uses `row`.
    fn example(&mut self, row: &ExampleRow) {}
    /// All rows have run.
    fn after_examples(&mut self) {}
    /// A step succeeded.
    fn successful(&mut self, step: &str) {}
    /// An ignorable step was skipped.
    fn ignorable(&mut self, step: &str) {}
    /// No candidate matched a step.
    fn pending(&mut self, step: &str) {}
    /// A step was skipped after an earlier one went wrong.
    fn not_performed(&mut self, step: &str) {}
    /// A step failed with `cause`.
    fn failed(&mut self, step: &str, cause: &StepError) {}
}

/// A reporter event captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "diagnostics", derive(serde::Serialize))]
#[cfg_attr(
    feature = "diagnostics",
    serde(tag = "event", rename_all = "snake_case")
)]
pub enum ReportEvent {
    /// See [`StoryReporter::before_story`].
    BeforeStory {
        /// Story path.
        path: String,
        /// Whether the story runs as a given story.
        embedded: bool,
    },
    /// See [`StoryReporter::after_story`].
    AfterStory {
        /// Whether the story ran as a given story.
        embedded: bool,
    },
    /// See [`StoryReporter::given_stories`].
    GivenStories {
        /// Paths about to run.
        paths: Vec<String>,
    },
    /// See [`StoryReporter::before_scenario`].
    BeforeScenario {
        /// Scenario title.
        title: String,
    },
    /// See [`StoryReporter::after_scenario`].
    AfterScenario,
    /// See [`StoryReporter::before_examples`].
    BeforeExamples {
        /// Steps run per row, unsubstituted.
        steps: Vec<String>,
        /// Table columns.
        headers: Vec<String>,
    },
    /// See [`StoryReporter::example`].
    Example {
        /// Row values in column order.
        values: Vec<String>,
    },
    /// See [`StoryReporter::after_examples`].
    AfterExamples,
    /// See [`StoryReporter::successful`].
    Successful {
        /// Step line.
        step: String,
    },
    /// See [`StoryReporter::ignorable`].
    Ignorable {
        /// Step line.
        step: String,
    },
    /// See [`StoryReporter::pending`].
    Pending {
        /// Step line.
        step: String,
    },
    /// See [`StoryReporter::not_performed`].
    NotPerformed {
        /// Step line.
        step: String,
    },
    /// See [`StoryReporter::failed`].
    Failed {
        /// Step line.
        step: String,
        /// Rendered cause.
        cause: String,
    },
}

impl ReportEvent {
    /// Step line carried by step outcome events.
    #[must_use]
    pub fn step(&self) -> Option<&str> {
        match self {
            Self::Successful { step }
            | Self::Ignorable { step }
            | Self::Pending { step }
            | Self::NotPerformed { step }
            | Self::Failed { step, .. } => Some(step),
            _ => None,
        }
    }
}
