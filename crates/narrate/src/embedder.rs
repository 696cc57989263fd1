//! Running many stories under a [`RunnerMode`].

use std::fmt::Write as _;

use log::{error, info, warn};
use narrate_policy::RunnerMode;
use thiserror::Error;

use crate::config::Configuration;
use crate::loader::StoryLoader;
use crate::model::Story;
use crate::registry::CandidateSteps;
use crate::reporting::StoryReporter;
use crate::runner::{RunError, StoryRunner};

/// A story whose run raised an error.
#[derive(Debug, Clone)]
pub struct FailedStory {
    /// Story path.
    pub path: String,
    /// Error raised by the run.
    pub error: RunError,
}

/// Error returned by an embedder run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmbedderError {
    /// A story failed outside batch mode; later stories did not run.
    #[error("story '{path}' failed: {source}")]
    StoryFailed {
        /// Story path.
        path: String,
        /// Error raised by the run.
        #[source]
        source: RunError,
    },
    /// One or more stories failed in batch mode.
    #[error("{}", describe_batch(.failures))]
    BatchFailed {
        /// Every failed story, in run order.
        failures: Vec<FailedStory>,
    },
}

fn describe_batch(failures: &[FailedStory]) -> String {
    let mut message = format!("{} story run(s) failed in batch:", failures.len());
    for failure in failures {
        let _ = write!(message, "\n  {}: {}", failure.path, failure.error);
    }
    message
}

/// Outcome of an embedder run that did not return an error.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Paths of stories that ran, in order, including failed ones.
    pub stories_run: Vec<String>,
    /// Failures absorbed because `ignore_failure` was set.
    pub failures: Vec<FailedStory>,
    /// Whether `skip` mode prevented any run.
    pub skipped: bool,
}

impl BatchSummary {
    /// Returns `true` when nothing failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Observes an embedder run.
#[expect(unused_variables, reason = "default bodies ignore their arguments")]
pub trait RunnerMonitor {
    /// The story at `path` is about to run.
    fn running_story(&mut self, path: &str) {}
    /// The story at `path` failed and `ignore_failure` let the run go on.
    fn story_failed(&mut self, path: &str, error: &RunError) {}
    /// Stories failed in batch mode and `ignore_failure` absorbed them.
    fn stories_batch_failed(&mut self, failures: &[FailedStory]) {}
    /// `skip` mode is set, so no story runs.
    fn stories_not_run(&mut self) {}
}

/// Monitor writing to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingRunnerMonitor;

impl RunnerMonitor for LoggingRunnerMonitor {
    fn running_story(&mut self, path: &str) {
        info!("running story {path}");
    }

    fn story_failed(&mut self, path: &str, error: &RunError) {
        warn!("story {path} failed: {error}");
    }

    fn stories_batch_failed(&mut self, failures: &[FailedStory]) {
        error!("{}", describe_batch(failures));
    }

    fn stories_not_run(&mut self) {
        info!("skipped running stories");
    }
}

#[derive(Clone, Copy)]
enum Target<'p> {
    Path(&'p str),
    Parsed(&'p Story),
}

impl<'p> Target<'p> {
    fn path(self) -> &'p str {
        match self {
            Self::Path(path) => path,
            Self::Parsed(story) => &story.path,
        }
    }
}

/// Runs a batch of stories under the configured [`RunnerMode`].
///
/// Without `batch`, the first failing story ends the run unless
/// `ignore_failure` is set. With `batch`, every story runs and failures are
/// collected into one [`EmbedderError::BatchFailed`], handed to the monitor
/// instead when `ignore_failure` is set. With `skip`, nothing runs.
///
/// # Examples
///
/// ```
/// use narrate::{
///     CandidateSteps, Configuration, InMemoryLoader, LoggingRunnerMonitor, RecordingReporter,
///     RunnerMode, StoryEmbedder,
/// };
///
/// let steps = [CandidateSteps::new("noop").given("nothing", |_| Ok(()))?];
/// let loader = InMemoryLoader::new()
///     .with_story("a.story", "Given nothing")
///     .with_story("b.story", "Given something else");
/// let config = Configuration::default().with_runner_mode(RunnerMode::default().with_batch(true));
/// let embedder = StoryEmbedder::new(&config, &steps, &loader);
///
/// let summary = embedder.run_stories_as_paths(
///     &["a.story", "b.story"],
///     &mut RecordingReporter::default(),
///     &mut LoggingRunnerMonitor,
/// )?;
/// assert_eq!(summary.stories_run, ["a.story", "b.story"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StoryEmbedder<'a> {
    runner: StoryRunner<'a>,
    mode: RunnerMode,
}

impl<'a> StoryEmbedder<'a> {
    /// An embedder using `configuration`'s runner mode.
    #[must_use]
    pub fn new(
        configuration: &'a Configuration,
        candidates: &'a [CandidateSteps],
        loader: &'a dyn StoryLoader,
    ) -> Self {
        Self {
            runner: StoryRunner::new(configuration, candidates, loader),
            mode: configuration.runner_mode(),
        }
    }

    /// Runner used for each story.
    #[must_use]
    pub const fn runner(&self) -> &StoryRunner<'a> {
        &self.runner
    }

    /// Load and run the stories at `paths`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedderError`] as described on [`StoryEmbedder`].
    pub fn run_stories_as_paths<S: AsRef<str>>(
        &self,
        paths: &[S],
        reporter: &mut dyn StoryReporter,
        monitor: &mut dyn RunnerMonitor,
    ) -> Result<BatchSummary, EmbedderError> {
        let targets = paths.iter().map(|path| Target::Path(path.as_ref()));
        self.run_each(targets, reporter, monitor)
    }

    /// Run already parsed stories, in order.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedderError`] as described on [`StoryEmbedder`].
    pub fn run_stories(
        &self,
        stories: &[Story],
        reporter: &mut dyn StoryReporter,
        monitor: &mut dyn RunnerMonitor,
    ) -> Result<BatchSummary, EmbedderError> {
        self.run_each(stories.iter().map(Target::Parsed), reporter, monitor)
    }

    fn run_target(
        &self,
        target: Target<'_>,
        reporter: &mut dyn StoryReporter,
    ) -> Result<(), RunError> {
        match target {
            Target::Path(path) => self.runner.run_path(path, reporter),
            Target::Parsed(story) => self.runner.run(story, reporter),
        }
    }

    fn run_each<'p>(
        &self,
        targets: impl Iterator<Item = Target<'p>>,
        reporter: &mut dyn StoryReporter,
        monitor: &mut dyn RunnerMonitor,
    ) -> Result<BatchSummary, EmbedderError> {
        let mut summary = BatchSummary::default();
        if self.mode.skip {
            monitor.stories_not_run();
            summary.skipped = true;
            return Ok(summary);
        }
        for target in targets {
            let path = target.path();
            monitor.running_story(path);
            summary.stories_run.push(path.to_owned());
            let Err(error) = self.run_target(target, reporter) else {
                continue;
            };
            if self.mode.batch {
                summary.failures.push(FailedStory {
                    path: path.to_owned(),
                    error,
                });
            } else if self.mode.ignore_failure {
                monitor.story_failed(path, &error);
                summary.failures.push(FailedStory {
                    path: path.to_owned(),
                    error,
                });
            } else {
                return Err(EmbedderError::StoryFailed {
                    path: path.to_owned(),
                    source: error,
                });
            }
        }
        if self.mode.batch && !summary.failures.is_empty() {
            if self.mode.ignore_failure {
                monitor.stories_batch_failed(&summary.failures);
            } else {
                return Err(EmbedderError::BatchFailed {
                    failures: summary.failures,
                });
            }
        }
        Ok(summary)
    }
}
