//! Error types for policy evaluation and the approval rendezvous.

use agentcore_error::ErrorExt;
use agentcore_error::Location;
use agentcore_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum PolicyError {
    #[snafu(display("Approval request not found: {id}"))]
    ApprovalNotFound {
        id: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Approval request {id} expired at {expires_at}"))]
    ApprovalExpired {
        id: String,
        expires_at: i64,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Approval channel closed before a decision arrived"))]
    ApprovalChannelClosed {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("Timed out waiting for a decision on approval {id}"))]
    ApprovalTimedOut {
        id: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for PolicyError {
    fn status_code(&self) -> StatusCode {
        match self {
            PolicyError::ApprovalNotFound { .. } => StatusCode::InvalidArguments,
            PolicyError::ApprovalExpired { .. } => StatusCode::ApprovalTimeout,
            PolicyError::ApprovalChannelClosed { .. } => StatusCode::Internal,
            PolicyError::ApprovalTimedOut { .. } => StatusCode::ApprovalTimeout,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
