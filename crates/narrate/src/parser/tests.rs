//! Unit tests for the story parser.

use super::*;
use crate::table::TableError;
use rstest::{fixture, rstest};

#[fixture]
fn parser() -> StoryParser {
    StoryParser::new(Keywords::default())
}

fn parse(parser: &StoryParser, text: &str) -> Story {
    match parser.parse_story(text, "stories/sample.story") {
        Ok(story) => story,
        Err(err) => panic!("story should parse: {err}"),
    }
}

fn parse_err(parser: &StoryParser, text: &str) -> ParseError {
    match parser.parse_story(text, "stories/sample.story") {
        Ok(story) => panic!("expected a parse error, got {story:?}"),
        Err(err) => err,
    }
}

const FULL_STORY: &str = "\
A story is a collection of scenarios

Narrative:
In order to: check the calculator
As a: user
I want to: add numbers
    carefully

GivenStories: stories/setup.story,
    stories/login.story

Lifecycle:
Before:
Given a calculator
After:
Then the calculator is switched off

Scenario: add
with carry
GivenStories: stories/reset.story
Given a value <a>
When I add <b>
Then result is <sum>
!-- Then the display blinks

Examples:
|a|b|sum|
|1|2|3|
|--  overflow cases below
|9|1|10|

Scenario: table argument
Given the traders:
|name|rank|
|Larry|Stooge 3|
";

#[rstest]
fn parses_every_section(parser: StoryParser) {
    let story = parse(&parser, FULL_STORY);

    assert_eq!(story.path, "stories/sample.story");
    assert_eq!(story.name(), "sample.story");
    assert_eq!(story.description, "A story is a collection of scenarios");

    let narrative = story.narrative.as_ref().map(|n| {
        (
            n.in_order_to.as_str(),
            n.as_a.as_str(),
            n.i_want_to.as_str(),
        )
    });
    assert_eq!(
        narrative,
        Some(("check the calculator", "user", "add numbers carefully"))
    );

    assert_eq!(
        story.given_stories,
        ["stories/setup.story", "stories/login.story"]
    );
    assert_eq!(story.lifecycle.before, ["Given a calculator"]);
    assert_eq!(story.lifecycle.after, ["Then the calculator is switched off"]);

    let [add, traders] = story.scenarios.as_slice() else {
        panic!("expected two scenarios, got {:?}", story.scenarios);
    };
    assert_eq!(add.title, "add with carry");
    assert_eq!(add.given_stories, ["stories/reset.story"]);
    assert_eq!(
        add.steps,
        [
            "Given a value <a>",
            "When I add <b>",
            "Then result is <sum>",
            "!-- Then the display blinks",
        ]
    );
    assert_eq!(add.examples.headers(), ["a", "b", "sum"]);
    assert_eq!(add.examples.row_count(), 2);

    assert_eq!(traders.title, "table argument");
    assert_eq!(
        traders.steps,
        ["Given the traders:\n|name|rank|\n|Larry|Stooge 3|"]
    );
    assert!(traders.examples.is_empty());
}

#[rstest]
fn parsing_is_deterministic(parser: StoryParser) {
    assert_eq!(parse(&parser, FULL_STORY), parse(&parser, FULL_STORY));
}

#[rstest]
fn steps_without_scenario_form_an_implicit_one(parser: StoryParser) {
    let story = parse(&parser, "Given a value 1\nThen result is 1");
    let [scenario] = story.scenarios.as_slice() else {
        panic!("expected one scenario");
    };
    assert_eq!(scenario.title, "");
    assert_eq!(scenario.steps.len(), 2);
}

#[rstest]
fn empty_text_yields_empty_story(parser: StoryParser) {
    let story = parse(&parser, "\n  \n");
    assert!(story.scenarios.is_empty());
    assert!(story.narrative.is_none());
}

#[rstest]
fn honours_localised_keywords() {
    let keywords = Keywords::default()
        .with(KeywordName::Scenario, "Szenario:")
        .with(KeywordName::Given, "Gegeben")
        .with(KeywordName::When, "Wenn")
        .with(KeywordName::Then, "Dann");
    let parser = StoryParser::new(keywords);
    let story = parse(&parser, "Szenario: addieren\nGegeben ein Wert 1\nDann Ergebnis 1");
    let [scenario] = story.scenarios.as_slice() else {
        panic!("expected one scenario");
    };
    assert_eq!(scenario.title, "addieren");
    assert_eq!(scenario.steps, ["Gegeben ein Wert 1", "Dann Ergebnis 1"]);
}

#[rstest]
fn ambiguous_keywords_are_rejected() {
    let parser = StoryParser::new(Keywords::default().with(KeywordName::Then, "When"));
    assert!(matches!(
        parse_err(&parser, "Scenario: x"),
        ParseError::Keywords(_)
    ));
}

#[rstest]
#[case("GivenStories:\nScenario: x", 1)]
#[case("Scenario: x\nGivenStories: ,  ,\nGiven a step", 2)]
#[case("Scenario: x\nGivenStories:", 2)]
fn empty_given_stories_are_rejected(
    parser: StoryParser,
    #[case] text: &str,
    #[case] line: usize,
) {
    assert_eq!(
        parse_err(&parser, text),
        ParseError::EmptyGivenStories { line }
    );
}

#[rstest]
fn given_stories_after_steps_are_misplaced(parser: StoryParser) {
    assert_eq!(
        parse_err(&parser, "Scenario: x\nGiven a step\nGivenStories: a.story"),
        ParseError::MisplacedGivenStories { line: 3 }
    );
}

#[rstest]
#[case("Narrative:\nNarrative:", ParseError::DuplicateNarrative { line: 2 })]
#[case("Scenario: x\nNarrative:", ParseError::MisplacedNarrative { line: 2 })]
#[case("Scenario: x\nLifecycle:", ParseError::MisplacedLifecycle { line: 2 })]
#[case("Examples:\n|a|", ParseError::MisplacedExamples { line: 1 })]
#[case(
    "Lifecycle:\nGiven x",
    ParseError::UnexpectedLine { line: 2, text: "Given x".into() }
)]
#[case(
    "Scenario: x\nGiven a <v>\nExamples:\n|v|\n|1|\nThen late",
    ParseError::UnexpectedLine { line: 6, text: "Then late".into() }
)]
fn structural_errors_carry_line_numbers(
    parser: StoryParser,
    #[case] text: &str,
    #[case] expected: ParseError,
) {
    assert_eq!(parse_err(&parser, text), expected);
}

#[rstest]
fn lifecycle_markers_outside_lifecycle_are_text(parser: StoryParser) {
    let story = parse(
        &parser,
        "After: the meeting we decided\nBefore: anything else\nScenario: s\nGiven x\nAfter: lunch",
    );
    assert_eq!(
        story.description,
        "After: the meeting we decided\nBefore: anything else"
    );
    assert!(story.lifecycle.is_empty());
    let steps = story.scenarios.first().map(|scenario| scenario.steps.clone());
    assert_eq!(steps, Some(vec!["Given x\nAfter: lunch".to_owned()]));
}

#[rstest]
fn lifecycle_blocks_switch_inside_lifecycle(parser: StoryParser) {
    let story = parse(
        &parser,
        "Lifecycle:\nAfter:\nThen tidy up\nBefore:\nGiven setup\nScenario: s\nGiven x",
    );
    assert_eq!(story.lifecycle.before, ["Given setup"]);
    assert_eq!(story.lifecycle.after, ["Then tidy up"]);
}

#[rstest]
fn malformed_tables_name_the_scenario(parser: StoryParser) {
    let err = parse_err(
        &parser,
        "Scenario: broken\nGiven a <v>\nExamples:\n|v|w|\n|1|",
    );
    assert_eq!(
        err,
        ParseError::MalformedTable {
            scenario: "broken".into(),
            source: TableError::UnevenRow {
                row_number: 2,
                expected: 2,
                actual: 1,
            },
        }
    );
}

#[rstest]
fn custom_table_separators_apply_to_examples() {
    let keywords = Keywords::default()
        .with(KeywordName::ExamplesTableHeaderSeparator, "!")
        .with(KeywordName::ExamplesTableValueSeparator, "!")
        .with(KeywordName::ExamplesTableIgnorableSeparator, "!#");
    let parser = StoryParser::new(keywords);
    let story = parse(
        &parser,
        "Scenario: x\nGiven a <v>\nExamples:\n!v!\n!# skipped\n!1!",
    );
    let rows = story
        .scenarios
        .first()
        .map(|scenario| scenario.examples.values().to_vec());
    assert_eq!(rows, Some(vec![vec!["1".to_owned()]]));
}
