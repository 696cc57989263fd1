//! Reporter writing to the `log` facade.

use log::{debug, info, warn};

use super::StoryReporter;
use crate::execution::StepError;
use crate::keywords::{KeywordName, Keywords};
use crate::model::Story;
use crate::table::{ExampleRow, ExamplesTable};

/// Logs every event, labelled with the configured keywords.
///
/// Successful and ignorable steps log at `info`, pending and not performed
/// steps at `warn`, failures at `warn` with their cause. Structural events
/// log at `debug` except scenario titles.
#[derive(Debug, Clone)]
pub struct LoggingReporter {
    keywords: Keywords,
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new(Keywords::default())
    }
}

impl LoggingReporter {
    /// Label events with `keywords`.
    #[must_use]
    pub fn new(keywords: Keywords) -> Self {
        Self { keywords }
    }

    fn label(&self, name: KeywordName) -> &str {
        self.keywords.get(name)
    }
}

impl StoryReporter for LoggingReporter {
    fn before_story(&mut self, story: &Story, embedded: bool) {
        if embedded {
            debug!("running given story {}", story.path);
        } else {
            info!("running story {}", story.path);
        }
    }

    fn after_story(&mut self, embedded: bool) {
        debug!("story finished (embedded: {embedded})");
    }

    fn given_stories(&mut self, paths: &[String]) {
        info!("{} {}", self.label(KeywordName::GivenStories), paths.join(", "));
    }

    fn before_scenario(&mut self, title: &str) {
        info!("{} {title}", self.label(KeywordName::Scenario));
    }

    fn before_examples(&mut self, _steps: &[String], table: &ExamplesTable) {
        debug!(
            "{} {} row(s) over {}",
            self.label(KeywordName::ExamplesTable),
            table.row_count(),
            table.headers().join(", ")
        );
    }

    fn example(&mut self, row: &ExampleRow) {
        let values: Vec<String> = row.iter().map(|(k, v)| format!("{k}={v}")).collect();
        info!("{} {}", self.label(KeywordName::ExamplesTableRow), values.join(", "));
    }

    fn successful(&mut self, step: &str) {
        info!("{step}");
    }

    fn ignorable(&mut self, step: &str) {
        info!("{step}");
    }

    fn pending(&mut self, step: &str) {
        warn!("{step} ({})", self.label(KeywordName::Pending));
    }

    fn not_performed(&mut self, step: &str) {
        warn!("{step} ({})", self.label(KeywordName::NotPerformed));
    }

    fn failed(&mut self, step: &str, cause: &StepError) {
        warn!("{step} ({}): {cause}", self.label(KeywordName::Failed));
    }
}
