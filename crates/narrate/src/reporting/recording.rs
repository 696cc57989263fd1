//! Reporter that keeps every event.

use std::sync::{Arc, Mutex, MutexGuard};

use super::{ReportEvent, StoryReporter};
use crate::execution::StepError;
use crate::model::Story;
use crate::table::{ExampleRow, ExamplesTable};

/// Records events in a shared buffer.
///
/// Clones share the buffer, so a test can hand one clone to the runner and
/// inspect the events through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl RecordingReporter {
    pub(super) fn lock(&self) -> MutexGuard<'_, Vec<ReportEvent>> {
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn record(&self, event: ReportEvent) {
        self.lock().push(event);
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Remove and return the events recorded so far.
    #[must_use]
    pub fn drain(&self) -> Vec<ReportEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Step outcome events only, in order.
    #[must_use]
    pub fn step_events(&self) -> Vec<ReportEvent> {
        self.lock()
            .iter()
            .filter(|event| event.step().is_some())
            .cloned()
            .collect()
    }
}

impl StoryReporter for RecordingReporter {
    fn before_story(&mut self, story: &Story, embedded: bool) {
        self.record(ReportEvent::BeforeStory {
            path: story.path.clone(),
            embedded,
        });
    }

    fn after_story(&mut self, embedded: bool) {
        self.record(ReportEvent::AfterStory { embedded });
    }

    fn given_stories(&mut self, paths: &[String]) {
        self.record(ReportEvent::GivenStories {
            paths: paths.to_vec(),
        });
    }

    fn before_scenario(&mut self, title: &str) {
        self.record(ReportEvent::BeforeScenario {
            title: title.to_owned(),
        });
    }

    fn after_scenario(&mut self) {
        self.record(ReportEvent::AfterScenario);
    }

    fn before_examples(&mut self, steps: &[String], table: &ExamplesTable) {
        self.record(ReportEvent::BeforeExamples {
            steps: steps.to_vec(),
            headers: table.headers().to_vec(),
        });
    }

    fn example(&mut self, row: &ExampleRow) {
        self.record(ReportEvent::Example {
            values: row.values().to_vec(),
        });
    }

    fn after_examples(&mut self) {
        self.record(ReportEvent::AfterExamples);
    }

    fn successful(&mut self, step: &str) {
        self.record(ReportEvent::Successful {
            step: step.to_owned(),
        });
    }

    fn ignorable(&mut self, step: &str) {
        self.record(ReportEvent::Ignorable {
            step: step.to_owned(),
        });
    }

    fn pending(&mut self, step: &str) {
        self.record(ReportEvent::Pending {
            step: step.to_owned(),
        });
    }

    fn not_performed(&mut self, step: &str) {
        self.record(ReportEvent::NotPerformed {
            step: step.to_owned(),
        });
    }

    fn failed(&mut self, step: &str, cause: &StepError) {
        self.record(ReportEvent::Failed {
            step: step.to_owned(),
            cause: cause.to_string(),
        });
    }
}
