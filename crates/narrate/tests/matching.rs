//! Behavioural tests for binding story lines to candidates.

mod support;

use std::sync::{Arc, Mutex, PoisonError};

use narrate::{
    CandidateSteps, Configuration, ParamValue, ParameterConverters, RecordingReporter, RunError,
    StepCandidate, StepError, StepKeyword, StoryRunner,
};
use rstest::rstest;
use support::{Calculator, loader, outcomes};

type Seen = Arc<Mutex<Vec<String>>>;

fn remember(seen: &Seen, entry: String) {
    seen.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
}

fn run(
    steps: &[CandidateSteps],
    config: &Configuration,
    text: &str,
) -> (Result<(), RunError>, RecordingReporter) {
    let loader = loader(&[("m.story", text)]);
    let reporter = RecordingReporter::default();
    let result =
        StoryRunner::new(config, steps, &loader).run_path("m.story", &mut reporter.clone());
    (result, reporter)
}

#[rstest]
fn equally_specific_candidates_in_two_collections_are_ambiguous() {
    let calculator = Calculator::default();
    let duplicate = CandidateSteps::new("duplicate")
        .given("a value $n:i64", |_| Ok(()))
        .unwrap_or_else(|err| panic!("pattern should compile: {err}"));
    let steps = [calculator.steps(), duplicate];
    let (result, reporter) = run(&steps, &Configuration::default(), "Given a value 1");
    let Err(RunError::Step(StepError::AmbiguousMatch {
        patterns,
        collections,
        ..
    })) = result
    else {
        panic!("expected ambiguity, got {result:?}");
    };
    assert_eq!(patterns, ["a value $v:i64", "a value $n:i64"]);
    assert_eq!(collections, ["calculator", "duplicate"]);
    let first = outcomes(&reporter).into_iter().next();
    assert_eq!(first.map(|(label, _)| label), Some("failed"));
}

#[rstest]
fn priority_settles_cross_collection_ties() {
    let calculator = Calculator::default();
    let seen = Seen::default();
    let record = Arc::clone(&seen);
    let preferred = StepCandidate::new(StepKeyword::Given, "a value $n:i64", move |args| {
        remember(&record, format!("preferred {}", args.raw(0).unwrap_or_default()));
        Ok(())
    })
    .map(|candidate| candidate.with_priority(1))
    .unwrap_or_else(|err| panic!("pattern should compile: {err}"));
    let steps = [calculator.steps(), CandidateSteps::new("preferred").with_candidate(preferred)];
    let (result, _) = run(&steps, &Configuration::default(), "Given a value 7");
    assert!(result.is_ok(), "unexpected error: {result:?}");
    assert_eq!(*seen.lock().unwrap_or_else(PoisonError::into_inner), ["preferred 7"]);
    assert_eq!(calculator.value(), 0);
}

#[rstest]
fn regex_candidates_take_named_and_hinted_groups() {
    let seen = Seen::default();
    let record = Arc::clone(&seen);
    let transfer = StepCandidate::regex(
        StepKeyword::When,
        r"I move (?<amount>\d+) to (\w+)",
        move |args| {
            let amount = args.named("amount").and_then(ParamValue::as_i128);
            remember(&record, format!("{amount:?} {}", args.raw(1).unwrap_or_default()));
            Ok(())
        },
    )
    .and_then(|candidate| candidate.with_param_hints([Some("u32"), None]))
    .unwrap_or_else(|err| panic!("regex should compile: {err}"));
    let steps = [CandidateSteps::new("bank").with_candidate(transfer)];
    let (result, _) = run(&steps, &Configuration::default(), "When I move 20 to savings");
    assert!(result.is_ok(), "unexpected error: {result:?}");
    assert_eq!(*seen.lock().unwrap_or_else(PoisonError::into_inner), ["Some(20) savings"]);
}

#[rstest]
fn table_parameters_span_lines() {
    let seen = Seen::default();
    let record = Arc::clone(&seen);
    let steps = [CandidateSteps::new("traders")
        .given("the traders: $rows:table", move |args| {
            let table = args
                .get(0)
                .and_then(ParamValue::as_table)
                .ok_or("expected a table")?;
            for row in table.rows() {
                let name = row.get("name").unwrap_or_default();
                let rank = row.get("rank").unwrap_or_default();
                remember(&record, format!("{name} {rank}"));
            }
            Ok(())
        })
        .unwrap_or_else(|err| panic!("pattern should compile: {err}"))];
    let text = "Given the traders:\n|name|rank|\n|Larry|Stooge 3|\n|Moe|Stooge 1|";
    let (result, _) = run(&steps, &Configuration::default(), text);
    assert!(result.is_ok(), "unexpected error: {result:?}");
    assert_eq!(
        *seen.lock().unwrap_or_else(PoisonError::into_inner),
        ["Larry Stooge 3", "Moe Stooge 1"]
    );
}

#[rstest]
#[case("Given the light is AMBER", Some("successful"))]
#[case("Given the light is blue", Some("failed"))]
fn custom_converters_feed_the_steps(#[case] line: &str, #[case] expected: Option<&str>) {
    let mut converters = ParameterConverters::default();
    converters.register_enum("colour", ["Red", "Amber", "Green"]);
    let config = Configuration::default().with_converters(converters);
    let seen = Seen::default();
    let record = Arc::clone(&seen);
    let steps = [CandidateSteps::new("lights")
        .given("the light is $c:colour", move |args| {
            let colour = args.get(0).and_then(ParamValue::as_text).unwrap_or_default();
            remember(&record, colour.to_owned());
            Ok(())
        })
        .unwrap_or_else(|err| panic!("pattern should compile: {err}"))];
    let (_, reporter) = run(&steps, &config, line);
    let labels: Vec<&str> = outcomes(&reporter).into_iter().map(|(label, _)| label).collect();
    assert_eq!(labels.first().copied(), expected);
    if expected == Some("successful") {
        assert_eq!(*seen.lock().unwrap_or_else(PoisonError::into_inner), ["Amber"]);
    }
}

#[rstest]
fn more_specific_candidate_wins_within_a_collection() {
    let seen = Seen::default();
    let (general, specific) = (Arc::clone(&seen), Arc::clone(&seen));
    let steps = [CandidateSteps::new("doors")
        .when("I open $what", move |_| {
            remember(&general, "general".into());
            Ok(())
        })
        .and_then(|steps| {
            steps.when("I open the door", move |_| {
                remember(&specific, "specific".into());
                Ok(())
            })
        })
        .unwrap_or_else(|err| panic!("pattern should compile: {err}"))];
    let (result, _) = run(&steps, &Configuration::default(), "When I open the door\nWhen I open a window");
    assert!(result.is_ok(), "unexpected error: {result:?}");
    assert_eq!(
        *seen.lock().unwrap_or_else(PoisonError::into_inner),
        ["specific", "general"]
    );
}

fn regex_calculator(with_result: bool) -> (CandidateSteps, Arc<Mutex<i64>>) {
    let total = Arc::new(Mutex::new(0_i64));
    let (set, add, check) = (Arc::clone(&total), Arc::clone(&total), Arc::clone(&total));
    let steps = CandidateSteps::new("regex calculator")
        .given_regex(r"a value (\d+)", move |args| {
            *set.lock().unwrap_or_else(PoisonError::into_inner) = args.parse(0)?;
            Ok(())
        })
        .and_then(|steps| {
            steps.when_regex(r"I add (\d+)", move |args| {
                *add.lock().unwrap_or_else(PoisonError::into_inner) += args.parse::<i64>(0)?;
                Ok(())
            })
        })
        .unwrap_or_else(|err| panic!("regex should compile: {err}"));
    if !with_result {
        return (steps, total);
    }
    let steps = steps
        .then_regex(r"result is (\d+)", move |args| {
            let expected: i64 = args.parse(0)?;
            let actual = *check.lock().unwrap_or_else(PoisonError::into_inner);
            if actual == expected {
                Ok(())
            } else {
                Err(format!("expected {expected}, got {actual}").into())
            }
        })
        .unwrap_or_else(|err| panic!("regex should compile: {err}"));
    (steps, total)
}

#[rstest]
fn regex_candidates_run_the_add_scenario() {
    let (steps, total) = regex_calculator(true);
    let (result, reporter) = run(
        &[steps],
        &Configuration::default(),
        "Scenario: add\nGiven a value 1\nWhen I add 2\nThen result is 3",
    );
    assert!(result.is_ok(), "unexpected error: {result:?}");
    assert_eq!(*total.lock().unwrap_or_else(PoisonError::into_inner), 3);
    assert_eq!(
        outcomes(&reporter),
        [
            ("successful", "Given a value 1".to_owned()),
            ("successful", "When I add 2".to_owned()),
            ("successful", "Then result is 3".to_owned()),
        ]
    );
}

#[rstest]
#[case(narrate::ErrorStrategy::Silent, true)]
#[case(narrate::ErrorStrategy::Rethrow, false)]
fn unmatched_step_follows_the_pending_strategy(
    #[case] pending: narrate::ErrorStrategy,
    #[case] succeeds: bool,
) {
    let (steps, _) = regex_calculator(false);
    let config = Configuration::default()
        .with_pending_strategy(pending)
        .with_error_strategy(narrate::ErrorStrategy::Rethrow);
    let (result, reporter) = run(
        &[steps],
        &config,
        "Scenario: add\nGiven a value 1\nWhen I add 2\nThen result is 4",
    );
    assert_eq!(result.is_ok(), succeeds);
    if let Err(err) = result {
        assert!(matches!(err.step_error(), Some(StepError::Pending { .. })), "{err}");
    }
    assert_eq!(
        outcomes(&reporter).last(),
        Some(&("pending", "Then result is 4".to_owned()))
    );
}
