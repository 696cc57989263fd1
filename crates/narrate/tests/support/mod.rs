//! Shared helpers for story runner integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use narrate::{CandidateSteps, InMemoryLoader, RecordingReporter, ReportEvent};

/// Calculator whose steps share one accumulator.
#[derive(Clone, Default)]
pub struct Calculator {
    value: Arc<Mutex<i64>>,
}

impl Calculator {
    /// Current accumulator value.
    #[must_use]
    pub fn value(&self) -> i64 {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Steps driving this calculator.
    ///
    /// # Panics
    /// Panics if a pattern fails to compile.
    #[must_use]
    #[expect(clippy::expect_used, reason = "test helper should fail loudly")]
    pub fn steps(&self) -> CandidateSteps {
        let (set, add, subtract, check) = (
            Arc::clone(&self.value),
            Arc::clone(&self.value),
            Arc::clone(&self.value),
            Arc::clone(&self.value),
        );
        CandidateSteps::new("calculator")
            .given("a value $v:i64", move |args| {
                *set.lock().unwrap_or_else(PoisonError::into_inner) = args.parse(0)?;
                Ok(())
            })
            .and_then(|steps| {
                steps.when("I add $v:i64", move |args| {
                    *add.lock().unwrap_or_else(PoisonError::into_inner) += args.parse::<i64>(0)?;
                    Ok(())
                })
            })
            .and_then(|steps| {
                steps.when("I subtract $v:i64", move |args| {
                    *subtract.lock().unwrap_or_else(PoisonError::into_inner) -=
                        args.parse::<i64>(0)?;
                    Ok(())
                })
            })
            .and_then(|steps| {
                steps.then("result is $v:i64", move |args| {
                    let expected: i64 = args.parse(0)?;
                    let actual = *check.lock().unwrap_or_else(PoisonError::into_inner);
                    if actual == expected {
                        Ok(())
                    } else {
                        Err(format!("expected {expected}, got {actual}").into())
                    }
                })
            })
            .and_then(|steps| steps.then("the calculator explodes", |_| panic!("kaboom")))
            .expect("calculator patterns compile")
    }
}

/// Loader holding `stories` as `(path, text)` pairs.
#[must_use]
pub fn loader(stories: &[(&str, &str)]) -> InMemoryLoader {
    stories
        .iter()
        .fold(InMemoryLoader::new(), |loader, (path, text)| {
            loader.with_story(*path, *text)
        })
}

/// Step outcomes recorded so far as `(outcome, step)` pairs.
#[must_use]
pub fn outcomes(reporter: &RecordingReporter) -> Vec<(&'static str, String)> {
    reporter
        .step_events()
        .into_iter()
        .filter_map(|event| {
            let label = match &event {
                ReportEvent::Successful { .. } => "successful",
                ReportEvent::Ignorable { .. } => "ignorable",
                ReportEvent::Pending { .. } => "pending",
                ReportEvent::NotPerformed { .. } => "not performed",
                ReportEvent::Failed { .. } => "failed",
                _ => return None,
            };
            event.step().map(|step| (label, step.to_owned()))
        })
        .collect()
}
