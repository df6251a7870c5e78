use crate::{
    foundation::error::StageResult,
    stages::manifest::{StageName, StageSpec},
};

/// Where a stage is in the setup sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
    /// Not set up yet.
    Pending,
    /// Set up; later stages wait for its completion signal.
    Waiting {
        /// Bindings registered.
        bound: usize,
        /// Bindings skipped for missing targets.
        skipped: usize,
    },
    /// Set up and released.
    Ready {
        /// Bindings registered.
        bound: usize,
        /// Bindings skipped for missing targets.
        skipped: usize,
    },
    /// Setup failed; the sequence moved on.
    Skipped {
        /// Why the stage was skipped.
        reason: String,
    },
}

/// Outcome of one stage setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// Bindings registered.
    pub bound: usize,
    /// Bindings skipped because a target was missing.
    pub skipped: usize,
    /// The stage started something whose completion it will signal.
    pub awaits_completion: bool,
}

/// Performs the registrations of one stage.
pub trait StageRunner {
    /// Set up `stage`. Errors skip the stage without stopping the sequence.
    fn setup(&mut self, stage: &StageSpec) -> StageResult<SetupReport>;
}

/// Runs stage setups strictly in order, pausing after a completion-gated stage until it
/// is released.
#[derive(Clone, Debug)]
pub struct Sequencer {
    stages: Vec<StageSpec>,
    statuses: Vec<StageStatus>,
    cursor: usize,
}

impl Sequencer {
    /// Sequencer over `stages`, none of them set up.
    pub fn new(stages: Vec<StageSpec>) -> Self {
        let statuses = vec![StageStatus::Pending; stages.len()];
        Self {
            stages,
            statuses,
            cursor: 0,
        }
    }

    /// Status of every stage in run order.
    pub fn statuses(&self) -> impl Iterator<Item = (StageName, &StageStatus)> {
        self.stages.iter().map(|s| s.name).zip(self.statuses.iter())
    }

    /// Status of one stage.
    pub fn status(&self, name: StageName) -> Option<&StageStatus> {
        self.stages
            .iter()
            .position(|s| s.name == name)
            .map(|i| &self.statuses[i])
    }

    /// Stage whose completion the sequence is waiting for.
    pub fn waiting_on(&self) -> Option<StageName> {
        match self.statuses.get(self.cursor) {
            Some(StageStatus::Waiting { .. }) => Some(self.stages[self.cursor].name),
            _ => None,
        }
    }

    /// Whether every stage has been set up and released or skipped.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.stages.len()
    }

    /// Set up stages from the current position until the end or a gated stage.
    ///
    /// Returns the stages set up by this call, in order.
    pub fn advance(&mut self, runner: &mut dyn StageRunner) -> Vec<StageName> {
        let mut ran = Vec::new();
        while let Some(stage) = self.stages.get(self.cursor) {
            if matches!(self.statuses[self.cursor], StageStatus::Waiting { .. }) {
                break;
            }

            let name = stage.name;
            ran.push(name);
            match runner.setup(stage) {
                Ok(report) if stage.completion_gated && report.awaits_completion => {
                    tracing::debug!(stage = ?name, bound = report.bound, "stage waiting for completion");
                    self.statuses[self.cursor] = StageStatus::Waiting {
                        bound: report.bound,
                        skipped: report.skipped,
                    };
                    break;
                }
                Ok(report) => {
                    tracing::debug!(
                        stage = ?name,
                        bound = report.bound,
                        skipped = report.skipped,
                        "stage ready"
                    );
                    self.statuses[self.cursor] = StageStatus::Ready {
                        bound: report.bound,
                        skipped: report.skipped,
                    };
                }
                Err(err) => {
                    tracing::warn!(stage = ?name, %err, "stage skipped");
                    self.statuses[self.cursor] = StageStatus::Skipped {
                        reason: err.to_string(),
                    };
                }
            }
            self.cursor += 1;
        }
        ran
    }

    /// Completion signal from a gated stage. Only the stage currently waited on is
    /// accepted, so a repeated signal is a no-op.
    pub fn release(&mut self, name: StageName) -> bool {
        if self.waiting_on() != Some(name) {
            return false;
        }
        if let StageStatus::Waiting { bound, skipped } = self.statuses[self.cursor] {
            self.statuses[self.cursor] = StageStatus::Ready { bound, skipped };
        }
        self.cursor += 1;
        tracing::debug!(stage = ?name, "stage released");
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stages/sequencer.rs"]
mod tests;
