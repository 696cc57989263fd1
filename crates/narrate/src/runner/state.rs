//! Per-run step state machine.

use log::warn;
use narrate_policy::{ErrorPolicy, ErrorStrategy};

use crate::execution::{Step, StepError, StepResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    FineSoFar,
    SomethingHappened,
}

/// State owned by one story run.
///
/// Progress resets with every step list; the recorded cause and the strategy
/// it selected last for the whole run.
#[derive(Debug)]
pub(super) struct RunState {
    policy: ErrorPolicy,
    progress: Progress,
    cause: Option<StepError>,
    strategy: ErrorStrategy,
}

impl RunState {
    pub(super) const fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            progress: Progress::FineSoFar,
            cause: None,
            strategy: ErrorStrategy::Silent,
        }
    }

    pub(super) fn start_list(&mut self) {
        self.progress = Progress::FineSoFar;
    }

    pub(super) fn run(&mut self, step: &Step<'_>) -> StepResult {
        let result = match self.progress {
            Progress::FineSoFar => step.perform(),
            Progress::SomethingHappened => step.do_not_perform(),
        };
        if let Some(cause) = result.cause() {
            self.progress = Progress::SomethingHappened;
            self.record(cause);
        }
        result
    }

    fn record(&mut self, cause: &StepError) {
        let replaces = self
            .cause
            .as_ref()
            .is_none_or(|current| current.kind().yields_to(cause.kind()));
        if replaces {
            self.cause = Some(cause.clone());
            self.strategy = self.policy.select(cause.kind());
        }
    }

    /// Apply the selected strategy to the most important cause.
    pub(super) fn finish(self, path: &str) -> Result<(), StepError> {
        let Some(cause) = self.cause else {
            return Ok(());
        };
        match self.strategy {
            ErrorStrategy::Silent => Ok(()),
            ErrorStrategy::Log => {
                warn!("story '{path}' finished with: {cause}");
                Ok(())
            }
            ErrorStrategy::Rethrow => Err(cause),
        }
    }

    #[cfg(test)]
    pub(super) const fn cause(&self) -> Option<&StepError> {
        self.cause.as_ref()
    }
}
