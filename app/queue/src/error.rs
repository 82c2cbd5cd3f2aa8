//! Error types for the per-session run queue.

use agentcore_error::ErrorExt;
use agentcore_error::Location;
use agentcore_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum RunQueueError {
    #[snafu(display("Session {session_id} already has {depth} tasks queued"))]
    SessionBusy {
        session_id: String,
        depth: u32,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for RunQueueError {
    fn status_code(&self) -> StatusCode {
        match self {
            RunQueueError::SessionBusy { .. } => StatusCode::QueueFull,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, RunQueueError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
