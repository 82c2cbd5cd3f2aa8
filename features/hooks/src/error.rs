//! Error types for hook registration and execution.

use agentcore_error::ErrorExt;
use agentcore_error::Location;
use agentcore_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum HookError {
    #[snafu(display("Handler id must not be empty"))]
    EmptyHandlerId {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Handler already registered: {id}"))]
    DuplicateHandler {
        id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Handler not found: {id}"))]
    HandlerNotFound {
        id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Handler {id} panicked: {message}"))]
    HandlerPanicked {
        id: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("External handler script failed: {message}"))]
    ExternalHandlerFailed {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for HookError {
    fn status_code(&self) -> StatusCode {
        match self {
            HookError::EmptyHandlerId { .. } => StatusCode::InvalidArguments,
            HookError::DuplicateHandler { .. } => StatusCode::InvalidArguments,
            HookError::HandlerNotFound { .. } => StatusCode::InvalidArguments,
            HookError::HandlerPanicked { .. } => StatusCode::Internal,
            HookError::ExternalHandlerFailed { .. } => StatusCode::External,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
