// Session Replay
//
// Executes a scripted sequence of commands against a session while
// enforcing catalog invariants after every step.

use serde::Serialize;
use tracing::debug;

use crate::invariants::{InvariantEngine, InvariantViolation};
use crate::session::{Command, Outcome, Session};

/// Errors that abort a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("step {step}: {source}")]
    Invariant {
        step: usize,
        #[source]
        source: InvariantViolation,
    },
}

/// Result of one replayed command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepResult {
    Ok { outcome: Outcome },
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub command: Command,
    #[serde(flatten)]
    pub result: StepResult,
}

/// Per-step results of a replay, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionReport {
    pub steps: Vec<StepReport>,
}

impl SessionReport {
    pub fn rejected(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|s| matches!(s.result, StepResult::Rejected { .. }))
    }
}

/// Replay commands in order.
///
/// A rejected command is recorded and the replay moves on; an invariant
/// violation stops it.
pub fn replay_session<I>(
    session: &mut Session,
    commands: I,
    invariants: &InvariantEngine,
) -> Result<SessionReport, ReplayError>
where
    I: IntoIterator<Item = Command>,
{
    let mut report = SessionReport::default();

    for (index, command) in commands.into_iter().enumerate() {
        let step = index + 1;
        let result = match session.execute(command.clone()) {
            Ok(outcome) => StepResult::Ok { outcome },
            Err(err) => {
                debug!(step, error = %err, "command rejected");
                StepResult::Rejected {
                    error: err.to_string(),
                }
            }
        };

        invariants
            .evaluate(session.store())
            .map_err(|source| ReplayError::Invariant { step, source })?;

        report.steps.push(StepReport {
            step,
            command,
            result,
        });
    }

    Ok(report)
}
