//! Error types for the run loop and its pause controller.
//!
//! Every variant here corresponds to one of the terminating error kinds in
//! the documented error taxonomy (`HookInterrupted`, `ContextCanceled`,
//! `MaxIterations`, setup errors, `StreamError`) — the ones that end a run
//! rather than becoming a synthetic tool result. [`AgentLoop::run`] never
//! returns these as a `Result::Err`; it converts them into a `RunOutcome`
//! and an `Event::Error` so a caller sees one consistent stop signal either
//! way.

use agentcore_error::ErrorExt;
use agentcore_error::Location;
use agentcore_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum RunLoopError {
    #[snafu(display("Run was interrupted by a hook"))]
    HookInterrupted {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Run was cancelled"))]
    ContextCanceled {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Maximum iterations ({max}) reached without a stop decision"))]
    MaxIterations {
        max: u32,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("No model provider configured for this run"))]
    NoProvider {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Session {session_id} has no messages to run"))]
    NoMessages {
        session_id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Session not found: {session_id}"))]
    SessionNotFound {
        session_id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Stream error: {message}"))]
    StreamError {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for RunLoopError {
    fn status_code(&self) -> StatusCode {
        match self {
            RunLoopError::HookInterrupted { .. } => StatusCode::Cancelled,
            RunLoopError::ContextCanceled { .. } => StatusCode::Cancelled,
            RunLoopError::MaxIterations { .. } => StatusCode::MaxIterations,
            RunLoopError::NoProvider { .. } => StatusCode::InvalidConfig,
            RunLoopError::NoMessages { .. } => StatusCode::InvalidArguments,
            RunLoopError::SessionNotFound { .. } => StatusCode::InvalidArguments,
            RunLoopError::StreamError { .. } => StatusCode::StreamError,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, RunLoopError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum PauseControllerError {
    #[snafu(display("Session {session_id} is already paused"))]
    AlreadyPaused {
        session_id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Session {session_id} has no pending pause to resume"))]
    NotPaused {
        session_id: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for PauseControllerError {
    fn status_code(&self) -> StatusCode {
        match self {
            PauseControllerError::AlreadyPaused { .. } => StatusCode::InvalidArguments,
            PauseControllerError::NotPaused { .. } => StatusCode::InvalidArguments,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type PauseResult<T> = std::result::Result<T, PauseControllerError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
