//! Running parsed stories.
//!
//! A run walks the story in document order: given stories, lifecycle
//! `Before` steps, each scenario (its given stories, then its steps once or
//! once per examples row), and lifecycle `After` steps. Every step list
//! starts afresh, but the most important cause is kept for the whole run and
//! handed to the configured error strategy at the end.

mod error;
mod state;

pub use error::RunError;

use log::{debug, warn};

use self::state::RunState;
use crate::config::Configuration;
use crate::loader::StoryLoader;
use crate::model::{Scenario, Story};
use crate::parser::StoryParser;
use crate::registry::{CandidateSteps, StepMatcher};
use crate::reporting::StoryReporter;
use crate::table::ExampleRow;

/// Runs stories against a set of candidate collections.
///
/// The runner holds no per-run state, so one runner can run any number of
/// stories in turn.
///
/// # Examples
///
/// ```
/// use narrate::{CandidateSteps, Configuration, InMemoryLoader, RecordingReporter, StoryRunner};
///
/// let steps = [CandidateSteps::new("greeting")
///     .given("a greeting", |_| Ok(()))?
///     .then("it is polite", |_| Ok(()))?];
/// let loader = InMemoryLoader::new()
///     .with_story("hello.story", "Scenario: hello\nGiven a greeting\nThen it is polite");
/// let config = Configuration::default();
/// let runner = StoryRunner::new(&config, &steps, &loader);
///
/// let reporter = RecordingReporter::default();
/// runner.run_path("hello.story", &mut reporter.clone())?;
/// assert_eq!(reporter.step_events().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StoryRunner<'a> {
    configuration: &'a Configuration,
    matcher: StepMatcher<'a>,
    loader: &'a dyn StoryLoader,
    parser: StoryParser,
}

impl<'a> StoryRunner<'a> {
    /// A runner matching steps against `candidates` and loading given
    /// stories through `loader`.
    ///
    /// Candidate hints with no registered converter are logged with
    /// `warn!`.
    #[must_use]
    pub fn new(
        configuration: &'a Configuration,
        candidates: &'a [CandidateSteps],
        loader: &'a dyn StoryLoader,
    ) -> Self {
        let matcher = StepMatcher::new(
            candidates,
            configuration.keywords(),
            configuration.converters(),
        );
        for (pattern, hint) in matcher.unsupported_hints() {
            warn!("no converter for hint '{hint}' in '{pattern}'; the parameter stays text");
        }
        Self {
            configuration,
            matcher,
            loader,
            parser: StoryParser::new(configuration.keywords().clone()),
        }
    }

    /// Load and parse the story at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Load`] or [`RunError::Parse`].
    pub fn define_story(&self, path: &str) -> Result<Story, RunError> {
        let text = self.loader.load_story_text(path)?;
        self.parser
            .parse_story(&text, path)
            .map_err(|source| RunError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    /// Load, parse and run the story at `path`.
    ///
    /// # Errors
    ///
    /// See [`define_story`](Self::define_story) and [`run`](Self::run).
    pub fn run_path(&self, path: &str, reporter: &mut dyn StoryReporter) -> Result<(), RunError> {
        let story = self.define_story(path)?;
        self.run(&story, reporter)
    }

    /// Run `story`, reporting every event to `reporter`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Step`] when the error strategy selected by the
    /// most important cause is `Rethrow`, and any error raised while loading
    /// or running a given story, including [`RunError::CyclicGivenStory`].
    pub fn run(&self, story: &Story, reporter: &mut dyn StoryReporter) -> Result<(), RunError> {
        self.run_story(story, false, &mut Vec::new(), reporter)
    }

    fn run_story(
        &self,
        story: &Story,
        embedded: bool,
        chain: &mut Vec<String>,
        reporter: &mut dyn StoryReporter,
    ) -> Result<(), RunError> {
        chain.push(story.path.clone());
        let result = self.run_in_chain(story, embedded, chain, reporter);
        chain.pop();
        result
    }

    fn run_in_chain(
        &self,
        story: &Story,
        embedded: bool,
        chain: &mut Vec<String>,
        reporter: &mut dyn StoryReporter,
    ) -> Result<(), RunError> {
        debug!("story '{}' started (embedded: {embedded})", story.path);
        let mut state = RunState::new(self.configuration.policy());
        reporter.before_story(story, embedded);
        self.run_given_stories(&story.given_stories, chain, reporter)?;
        self.run_steps(&story.lifecycle.before, None, &mut state, reporter);
        for scenario in &story.scenarios {
            self.run_scenario(scenario, &mut state, chain, reporter)?;
        }
        self.run_steps(&story.lifecycle.after, None, &mut state, reporter);
        reporter.after_story(embedded);
        debug!("story '{}' finished", story.path);
        state.finish(&story.path).map_err(RunError::from)
    }

    fn run_given_stories(
        &self,
        paths: &[String],
        chain: &mut Vec<String>,
        reporter: &mut dyn StoryReporter,
    ) -> Result<(), RunError> {
        if paths.is_empty() {
            return Ok(());
        }
        reporter.given_stories(paths);
        for path in paths {
            if chain.contains(path) {
                let mut cycle = chain.clone();
                cycle.push(path.clone());
                return Err(RunError::CyclicGivenStory {
                    path: path.clone(),
                    chain: cycle,
                });
            }
            debug!("entering given story '{path}'");
            let story = self.define_story(path)?;
            self.run_story(&story, true, chain, reporter)?;
        }
        Ok(())
    }

    fn run_scenario(
        &self,
        scenario: &Scenario,
        state: &mut RunState,
        chain: &mut Vec<String>,
        reporter: &mut dyn StoryReporter,
    ) -> Result<(), RunError> {
        reporter.before_scenario(&scenario.title);
        self.run_given_stories(&scenario.given_stories, chain, reporter)?;
        if scenario.examples.is_empty() {
            self.run_steps(&scenario.steps, None, state, reporter);
        } else {
            reporter.before_examples(&scenario.steps, &scenario.examples);
            for row in scenario.examples.rows() {
                reporter.example(&row);
                self.run_steps(&scenario.steps, Some(&row), state, reporter);
            }
            reporter.after_examples();
        }
        reporter.after_scenario();
        Ok(())
    }

    fn run_steps(
        &self,
        lines: &[String],
        row: Option<&ExampleRow>,
        state: &mut RunState,
        reporter: &mut dyn StoryReporter,
    ) {
        if lines.is_empty() {
            return;
        }
        let steps = match row {
            Some(row) => {
                let substituted: Vec<String> =
                    lines.iter().map(|line| row.substitute(line)).collect();
                self.matcher.prepare(&substituted)
            }
            None => self.matcher.prepare(lines),
        };
        debug!("created {} step(s)", steps.len());
        state.start_list();
        for step in &steps {
            state.run(step).describe_to(reporter);
        }
    }
}
