//! Keyword-driven story parser.
//!
//! The parser walks story text line by line. Each trimmed line is classified
//! by the keyword table; keyword lines switch the current section and plain
//! lines extend whatever the current section holds (description, narrative
//! clause, step text, scenario title, given-story list or table). Blank lines
//! carry no content. `Before:` and `After:` only open blocks inside a
//! `Lifecycle:` section; anywhere else they are plain text.

mod error;
#[cfg(test)]
mod tests;

pub use error::ParseError;

use log::debug;

use crate::keywords::{KeywordName, Keywords};
use crate::model::{Narrative, Scenario, Story};
use crate::table::{ExamplesTable, TableSeparators};

/// Parses story text into a [`Story`].
///
/// # Examples
///
/// ```
/// use narrate::{Keywords, StoryParser};
///
/// let parser = StoryParser::new(Keywords::default());
/// let story = parser
///     .parse_story("Scenario: add\nGiven a value 1\nWhen I add 2\nThen result is 3", "add.story")
///     .expect("well-formed story");
/// assert_eq!(story.scenarios.len(), 1);
/// assert_eq!(story.scenarios[0].steps.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoryParser {
    keywords: Keywords,
}

impl StoryParser {
    /// Create a parser recognising `keywords`.
    #[must_use]
    pub fn new(keywords: Keywords) -> Self {
        Self { keywords }
    }

    /// Keyword table in use.
    #[must_use]
    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Parse `text` loaded from `path`.
    ///
    /// Parsing is deterministic: the same text and keyword table always yield
    /// the same story.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the keyword table is ambiguous, a
    /// given-stories block is empty or misplaced, or an examples table is
    /// malformed.
    pub fn parse_story(&self, text: &str, path: &str) -> Result<Story, ParseError> {
        self.keywords.validate()?;
        let mut builder = Builder::new(&self.keywords, path);
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            builder.line(index + 1, line)?;
        }
        let story = builder.finish()?;
        debug!(
            "parsed story '{}' with {} scenario(s)",
            story.path,
            story.scenarios.len()
        );
        Ok(story)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    Text,
    InOrderTo,
    AsA,
    IWantTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Narrative(Clause),
    StoryGivenStories { line: usize },
    Lifecycle(Option<Block>),
    Scenario,
    ScenarioGivenStories { line: usize },
    Examples,
}

struct OpenScenario {
    scenario: Scenario,
    table: Vec<String>,
}

impl OpenScenario {
    fn titled(title: &str) -> Self {
        Self {
            scenario: Scenario {
                title: title.to_owned(),
                ..Scenario::default()
            },
            table: Vec::new(),
        }
    }
}

struct Builder<'k> {
    keywords: &'k Keywords,
    separators: TableSeparators,
    story: Story,
    narrative: Option<Narrative>,
    section: Section,
    current: Option<OpenScenario>,
}

impl<'k> Builder<'k> {
    fn new(keywords: &'k Keywords, path: &str) -> Self {
        Self {
            keywords,
            separators: TableSeparators::from_keywords(keywords),
            story: Story {
                path: path.to_owned(),
                ..Story::default()
            },
            narrative: None,
            section: Section::Description,
            current: None,
        }
    }

    fn line(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        let Some((keyword, rest)) = self.keywords.classify(line) else {
            return self.text(number, line);
        };
        if let Section::Narrative(_) = self.section {
            if let Some(clause) = narrative_clause(keyword) {
                self.section = Section::Narrative(clause);
                self.narrative_text(rest);
                return Ok(());
            }
        }
        if narrative_clause(keyword).is_some() {
            return self.text(number, line);
        }
        if let Some(block) = lifecycle_block(keyword) {
            if let Section::Lifecycle(_) = self.section {
                self.section = Section::Lifecycle(Some(block));
                return Ok(());
            }
            return self.text(number, line);
        }
        self.close_given_stories()?;
        match keyword {
            KeywordName::Narrative => self.open_narrative(number, rest),
            KeywordName::GivenStories => self.open_given_stories(number, rest),
            KeywordName::Lifecycle => self.open_lifecycle(number),
            KeywordName::Scenario => {
                self.finish_scenario()?;
                self.current = Some(OpenScenario::titled(rest));
                self.section = Section::Scenario;
                Ok(())
            }
            KeywordName::ExamplesTable => self.open_examples(number, rest),
            _ => self.step(number, line),
        }
    }

    fn open_narrative(&mut self, number: usize, rest: &str) -> Result<(), ParseError> {
        if self.narrative.is_some() {
            return Err(ParseError::DuplicateNarrative { line: number });
        }
        if self.section != Section::Description {
            return Err(ParseError::MisplacedNarrative { line: number });
        }
        self.narrative = Some(Narrative::default());
        self.section = Section::Narrative(Clause::Text);
        self.narrative_text(rest);
        Ok(())
    }

    fn narrative_text(&mut self, text: &str) {
        let (Section::Narrative(clause), Some(narrative)) = (self.section, self.narrative.as_mut())
        else {
            return;
        };
        let (target, joiner) = match clause {
            Clause::Text => (&mut narrative.text, "\n"),
            Clause::InOrderTo => (&mut narrative.in_order_to, " "),
            Clause::AsA => (&mut narrative.as_a, " "),
            Clause::IWantTo => (&mut narrative.i_want_to, " "),
        };
        append(target, text, joiner);
    }

    fn open_given_stories(&mut self, number: usize, rest: &str) -> Result<(), ParseError> {
        self.section = match (&self.current, self.section) {
            (None, Section::Description | Section::Narrative(_)) => {
                Section::StoryGivenStories { line: number }
            }
            (Some(open), Section::Scenario) if open.scenario.steps.is_empty() => {
                Section::ScenarioGivenStories { line: number }
            }
            _ => return Err(ParseError::MisplacedGivenStories { line: number }),
        };
        self.given_story_paths(rest);
        Ok(())
    }

    fn given_story_paths(&mut self, text: &str) {
        let target = match self.section {
            Section::StoryGivenStories { .. } => &mut self.story.given_stories,
            Section::ScenarioGivenStories { .. } => match self.current.as_mut() {
                Some(open) => &mut open.scenario.given_stories,
                None => return,
            },
            _ => return,
        };
        target.extend(
            text.split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_owned),
        );
    }

    fn close_given_stories(&mut self) -> Result<(), ParseError> {
        let (line, empty) = match self.section {
            Section::StoryGivenStories { line } => (line, self.story.given_stories.is_empty()),
            Section::ScenarioGivenStories { line } => (
                line,
                self.current
                    .as_ref()
                    .is_none_or(|open| open.scenario.given_stories.is_empty()),
            ),
            _ => return Ok(()),
        };
        if empty {
            return Err(ParseError::EmptyGivenStories { line });
        }
        self.section = if self.current.is_some() {
            Section::Scenario
        } else {
            Section::Description
        };
        Ok(())
    }

    fn open_lifecycle(&mut self, number: usize) -> Result<(), ParseError> {
        if self.current.is_some() {
            return Err(ParseError::MisplacedLifecycle { line: number });
        }
        self.section = Section::Lifecycle(None);
        Ok(())
    }

    fn open_examples(&mut self, number: usize, rest: &str) -> Result<(), ParseError> {
        if self.current.is_none() || self.section == Section::Examples {
            return Err(ParseError::MisplacedExamples { line: number });
        }
        self.section = Section::Examples;
        if !rest.is_empty() {
            self.table_line(rest);
        }
        Ok(())
    }

    fn table_line(&mut self, line: &str) {
        if let Some(open) = self.current.as_mut() {
            open.table.push(line.to_owned());
        }
    }

    fn step(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        match self.section {
            Section::Lifecycle(Some(Block::Before)) => {
                self.story.lifecycle.before.push(line.to_owned());
            }
            Section::Lifecycle(Some(Block::After)) => {
                self.story.lifecycle.after.push(line.to_owned());
            }
            Section::Lifecycle(None) | Section::Examples => {
                return Err(unexpected(number, line));
            }
            Section::Description
            | Section::Narrative(_)
            | Section::StoryGivenStories { .. }
            | Section::Scenario
            | Section::ScenarioGivenStories { .. } => {
                let open = self
                    .current
                    .get_or_insert_with(|| OpenScenario::titled(""));
                open.scenario.steps.push(line.to_owned());
                self.section = Section::Scenario;
            }
        }
        Ok(())
    }

    fn text(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        match self.section {
            Section::Description => {
                append(&mut self.story.description, line, "\n");
                Ok(())
            }
            Section::Narrative(_) => {
                self.narrative_text(line);
                Ok(())
            }
            Section::StoryGivenStories { .. } | Section::ScenarioGivenStories { .. } => {
                self.given_story_paths(line);
                Ok(())
            }
            Section::Lifecycle(block) => {
                let steps = match block {
                    Some(Block::Before) => &mut self.story.lifecycle.before,
                    Some(Block::After) => &mut self.story.lifecycle.after,
                    None => return Err(unexpected(number, line)),
                };
                continue_step(steps, number, line)
            }
            Section::Scenario => {
                let Some(open) = self.current.as_mut() else {
                    return Err(unexpected(number, line));
                };
                if open.scenario.steps.is_empty() {
                    append(&mut open.scenario.title, line, " ");
                    Ok(())
                } else {
                    continue_step(&mut open.scenario.steps, number, line)
                }
            }
            Section::Examples => {
                self.table_line(line);
                Ok(())
            }
        }
    }

    fn finish_scenario(&mut self) -> Result<(), ParseError> {
        let Some(OpenScenario {
            mut scenario,
            table,
        }) = self.current.take()
        else {
            return Ok(());
        };
        if !table.is_empty() {
            scenario.examples = ExamplesTable::parse_with(&table.join("\n"), &self.separators)
                .map_err(|source| ParseError::MalformedTable {
                    scenario: scenario.title.clone(),
                    source,
                })?;
        }
        self.story.scenarios.push(scenario);
        Ok(())
    }

    fn finish(mut self) -> Result<Story, ParseError> {
        self.close_given_stories()?;
        self.finish_scenario()?;
        self.story.narrative = self.narrative;
        Ok(self.story)
    }
}

const fn narrative_clause(keyword: KeywordName) -> Option<Clause> {
    match keyword {
        KeywordName::InOrderTo => Some(Clause::InOrderTo),
        KeywordName::AsA => Some(Clause::AsA),
        KeywordName::IWantTo => Some(Clause::IWantTo),
        _ => None,
    }
}

const fn lifecycle_block(keyword: KeywordName) -> Option<Block> {
    match keyword {
        KeywordName::Before => Some(Block::Before),
        KeywordName::After => Some(Block::After),
        _ => None,
    }
}

fn append(target: &mut String, text: &str, joiner: &str) {
    if text.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push_str(joiner);
    }
    target.push_str(text);
}

fn continue_step(steps: &mut [String], number: usize, line: &str) -> Result<(), ParseError> {
    let Some(last) = steps.last_mut() else {
        return Err(unexpected(number, line));
    };
    last.push('\n');
    last.push_str(line);
    Ok(())
}

fn unexpected(line: usize, text: &str) -> ParseError {
    ParseError::UnexpectedLine {
        line,
        text: text.to_owned(),
    }
}
