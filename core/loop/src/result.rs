//! The summary a completed run hands back to its caller (the run queue or
//! runner composition root) for logging and telemetry — distinct from the
//! `Event` stream, which is what callers actually consume live.

use agentcore_protocol::Usage;

/// Why a run stopped. Mirrors the terminal states of the run's state
/// machine: `done`, `error`, `cancelled`, `max_iterations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    ModelStopSignal,
    MaxIterationsReached,
    Cancelled,
    Error { message: String },
}

/// Aggregate result of one completed run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub stop_reason: StopReason,
    pub iterations_completed: u32,
    pub usage: Usage,
}

impl RunOutcome {
    pub fn completed(iterations: u32, usage: Usage) -> Self {
        Self {
            stop_reason: StopReason::ModelStopSignal,
            iterations_completed: iterations,
            usage,
        }
    }

    pub fn max_iterations_reached(iterations: u32, usage: Usage) -> Self {
        Self {
            stop_reason: StopReason::MaxIterationsReached,
            iterations_completed: iterations,
            usage,
        }
    }

    pub fn cancelled(iterations: u32, usage: Usage) -> Self {
        Self {
            stop_reason: StopReason::Cancelled,
            iterations_completed: iterations,
            usage,
        }
    }

    pub fn error(iterations: u32, usage: Usage, message: impl Into<String>) -> Self {
        Self {
            stop_reason: StopReason::Error { message: message.into() },
            iterations_completed: iterations,
            usage,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.stop_reason, StopReason::Error { .. })
    }
}

#[cfg(test)]
#[path = "result.test.rs"]
mod tests;
