//! Fan-out reporter.

use super::StoryReporter;
use crate::execution::StepError;
use crate::model::Story;
use crate::table::{ExampleRow, ExamplesTable};

/// Forwards every event to each wrapped reporter in insertion order.
///
/// # Examples
///
/// ```
/// use narrate::{DelegatingReporter, LoggingReporter, RecordingReporter, StoryReporter};
///
/// let recording = RecordingReporter::default();
/// let mut reporter = DelegatingReporter::new()
///     .with(LoggingReporter::default())
///     .with(recording.clone());
/// reporter.successful("Given a value 1");
/// assert_eq!(recording.events().len(), 1);
/// ```
#[derive(Default)]
pub struct DelegatingReporter {
    delegates: Vec<Box<dyn StoryReporter>>,
}

impl DelegatingReporter {
    /// A reporter with no delegates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `reporter` as the last delegate.
    #[must_use]
    pub fn with<R: StoryReporter + 'static>(mut self, reporter: R) -> Self {
        self.delegates.push(Box::new(reporter));
        self
    }

    /// Number of delegates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    /// Returns `true` when there are no delegates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }

    fn each(&mut self, mut event: impl FnMut(&mut dyn StoryReporter)) {
        for delegate in &mut self.delegates {
            event(delegate.as_mut());
        }
    }
}

impl StoryReporter for DelegatingReporter {
    fn before_story(&mut self, story: &Story, embedded: bool) {
        self.each(|r| r.before_story(story, embedded));
    }

    fn after_story(&mut self, embedded: bool) {
        self.each(|r| r.after_story(embedded));
    }

    fn given_stories(&mut self, paths: &[String]) {
        self.each(|r| r.given_stories(paths));
    }

    fn before_scenario(&mut self, title: &str) {
        self.each(|r| r.before_scenario(title));
    }

    fn after_scenario(&mut self) {
        self.each(|r| r.after_scenario());
    }

    fn before_examples(&mut self, steps: &[String], table: &ExamplesTable) {
        self.each(|r| r.before_examples(steps, table));
    }

    fn example(&mut self, row: &ExampleRow) {
        self.each(|r| r.example(row));
    }

    fn after_examples(&mut self) {
        self.each(|r| r.after_examples());
    }

    fn successful(&mut self, step: &str) {
        self.each(|r| r.successful(step));
    }

    fn ignorable(&mut self, step: &str) {
        self.each(|r| r.ignorable(step));
    }

    fn pending(&mut self, step: &str) {
        self.each(|r| r.pending(step));
    }

    fn not_performed(&mut self, step: &str) {
        self.each(|r| r.not_performed(step));
    }

    fn failed(&mut self, step: &str, cause: &StepError) {
        self.each(|r| r.failed(step, cause));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::{RecordingReporter, ReportEvent};

    #[test]
    fn forwards_in_insertion_order() {
        let first = RecordingReporter::default();
        let second = RecordingReporter::default();
        let mut reporter = DelegatingReporter::new()
            .with(first.clone())
            .with(second.clone());
        reporter.before_scenario("add");
        reporter.after_scenario();
        assert_eq!(reporter.len(), 2);
        assert_eq!(first.events(), second.events());
        assert_eq!(
            first.events(),
            [
                ReportEvent::BeforeScenario {
                    title: "add".into()
                },
                ReportEvent::AfterScenario,
            ]
        );
    }
}
