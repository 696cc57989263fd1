//! Behavioural tests for running batches of stories.

mod support;

use narrate::{
    BatchSummary, Configuration, EmbedderError, FailedStory, RecordingReporter, RunError,
    RunnerMode, RunnerMonitor, StoryEmbedder, StoryParser,
};
use rstest::{fixture, rstest};
use support::{Calculator, loader, outcomes};

#[derive(Debug, Default)]
struct RecordingMonitor {
    running: Vec<String>,
    failed: Vec<String>,
    batch_failures: Vec<String>,
    not_run: bool,
}

impl RunnerMonitor for RecordingMonitor {
    fn running_story(&mut self, path: &str) {
        self.running.push(path.to_owned());
    }

    fn story_failed(&mut self, path: &str, _error: &RunError) {
        self.failed.push(path.to_owned());
    }

    fn stories_batch_failed(&mut self, failures: &[FailedStory]) {
        self.batch_failures
            .extend(failures.iter().map(|failure| failure.path.clone()));
    }

    fn stories_not_run(&mut self) {
        self.not_run = true;
    }
}

const STORIES: [(&str, &str); 3] = [
    ("first.story", "Given a value 1\nThen result is 2"),
    ("second.story", "Given a value 2\nThen result is 2"),
    ("third.story", "Then the calculator explodes"),
];
const PATHS: [&str; 3] = ["first.story", "second.story", "third.story"];

struct Outcome {
    result: Result<BatchSummary, EmbedderError>,
    monitor: RecordingMonitor,
    reporter: RecordingReporter,
}

#[fixture]
fn calculator() -> Calculator {
    Calculator::default()
}

fn embed(calculator: &Calculator, mode: RunnerMode) -> Outcome {
    let steps = [calculator.steps()];
    let loader = loader(&STORIES);
    let config = Configuration::default().with_runner_mode(mode);
    let reporter = RecordingReporter::default();
    let mut monitor = RecordingMonitor::default();
    let result = StoryEmbedder::new(&config, &steps, &loader).run_stories_as_paths(
        &PATHS,
        &mut reporter.clone(),
        &mut monitor,
    );
    Outcome {
        result,
        monitor,
        reporter,
    }
}

#[rstest]
fn fail_fast_stops_at_the_first_failure(calculator: Calculator) {
    let outcome = embed(&calculator, RunnerMode::default());
    assert!(matches!(
        outcome.result,
        Err(EmbedderError::StoryFailed { ref path, .. }) if path == "first.story"
    ));
    assert_eq!(outcome.monitor.running, ["first.story"]);
    assert_eq!(outcomes(&outcome.reporter).len(), 2);
}

#[rstest]
fn batch_runs_everything_then_fails_once(calculator: Calculator) {
    let outcome = embed(&calculator, RunnerMode::default().with_batch(true));
    let Err(EmbedderError::BatchFailed { failures }) = outcome.result else {
        panic!("expected a batch failure");
    };
    let failed: Vec<&str> = failures.iter().map(|failure| failure.path.as_str()).collect();
    assert_eq!(failed, ["first.story", "third.story"]);
    assert_eq!(outcome.monitor.running, PATHS);
    assert!(outcome.monitor.batch_failures.is_empty());
}

#[rstest]
fn batch_failure_message_lists_every_story(calculator: Calculator) {
    let outcome = embed(&calculator, RunnerMode::default().with_batch(true));
    let message = outcome
        .result
        .err()
        .map(|err| err.to_string())
        .unwrap_or_default();
    assert!(message.starts_with("2 story run(s) failed in batch:"));
    assert!(message.contains("first.story"));
    assert!(message.contains("third.story"));
}

#[rstest]
fn ignored_batch_failures_go_to_the_monitor(calculator: Calculator) {
    let mode = RunnerMode::default()
        .with_batch(true)
        .with_ignore_failure(true);
    let outcome = embed(&calculator, mode);
    let Ok(summary) = outcome.result else {
        panic!("failures should be ignored");
    };
    assert!(!summary.is_success());
    assert_eq!(summary.stories_run, PATHS);
    assert_eq!(
        outcome.monitor.batch_failures,
        ["first.story", "third.story"]
    );
}

#[rstest]
fn ignore_failure_keeps_going(calculator: Calculator) {
    let outcome = embed(&calculator, RunnerMode::default().with_ignore_failure(true));
    let Ok(summary) = outcome.result else {
        panic!("failures should be ignored");
    };
    assert_eq!(summary.failures.len(), 2);
    assert_eq!(outcome.monitor.failed, ["first.story", "third.story"]);
    assert_eq!(outcome.monitor.running, PATHS);
}

#[rstest]
fn skip_runs_nothing(calculator: Calculator) {
    let outcome = embed(&calculator, RunnerMode::default().with_skip(true).with_batch(true));
    let Ok(summary) = outcome.result else {
        panic!("skipping cannot fail");
    };
    assert!(summary.skipped);
    assert!(summary.stories_run.is_empty());
    assert!(outcome.monitor.not_run);
    assert!(outcome.monitor.running.is_empty());
    assert!(outcome.reporter.events().is_empty());
}

#[rstest]
fn runs_parsed_stories(calculator: Calculator) {
    let parser = StoryParser::default();
    let stories: Vec<_> = STORIES
        .iter()
        .skip(1)
        .take(1)
        .filter_map(|(path, text)| parser.parse_story(text, path).ok())
        .collect();
    let steps = [calculator.steps()];
    let loader = loader(&[]);
    let config = Configuration::default();
    let mut monitor = RecordingMonitor::default();
    let result = StoryEmbedder::new(&config, &steps, &loader).run_stories(
        &stories,
        &mut RecordingReporter::default(),
        &mut monitor,
    );
    assert!(result.is_ok_and(|summary| summary.is_success()));
    assert_eq!(monitor.running, ["second.story"]);
    assert_eq!(calculator.value(), 2);
}
