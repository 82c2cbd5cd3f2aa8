//! Rendezvous between a blocked tool-execution step and whatever approval
//! handler (human, autopilot policy, test harness) eventually decides it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::error::policy_error::ApprovalChannelClosedSnafu;
use crate::error::policy_error::ApprovalExpiredSnafu;
use crate::error::policy_error::ApprovalNotFoundSnafu;
use crate::error::policy_error::ApprovalTimedOutSnafu;

/// The caller's answer to a pending [`crate::decision::PolicyDecision::RequireApproval`].
#[derive(Debug, Clone)]
pub struct ApprovalResponse {
    pub approved: bool,
    pub message: String,
    /// Replacement tool-call arguments, applied only when `approved`.
    pub modified_arguments: Option<String>,
    pub decided_at: i64,
}

/// One outstanding approval request, as handed to a waiting caller.
#[derive(Debug, Clone)]
pub struct PendingApproval {
    pub id: String,
    pub tool_name: String,
    pub arguments: String,
    pub reason: String,
    pub session_id: String,
    pub expires_at: i64,
}

/// Tracks in-flight approval requests and lets a resolver hand a decision
/// back to whichever caller is awaiting it.
#[derive(Default)]
pub struct ApprovalGate {
    senders: Mutex<HashMap<String, oneshot::Sender<ApprovalResponse>>>,
}

impl ApprovalGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new approval request, returning its description (to
    /// emit as an `approval_request` event) and a receiver the caller
    /// awaits.
    pub fn create_request(
        &self,
        tool_name: impl Into<String>,
        arguments: impl Into<String>,
        reason: impl Into<String>,
        session_id: impl Into<String>,
        ttl: Duration,
        now: i64,
    ) -> (PendingApproval, oneshot::Receiver<ApprovalResponse>) {
        let id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.senders.lock().expect("approval gate mutex poisoned").insert(id.clone(), tx);
        let pending = PendingApproval {
            id,
            tool_name: tool_name.into(),
            arguments: arguments.into(),
            reason: reason.into(),
            session_id: session_id.into(),
            expires_at: now + ttl.as_secs() as i64,
        };
        (pending, rx)
    }

    /// Delivers a decision to whichever caller is waiting on `id`.
    pub fn resolve(&self, id: &str, response: ApprovalResponse) -> Result<()> {
        let sender = self
            .senders
            .lock()
            .expect("approval gate mutex poisoned")
            .remove(id)
            .ok_or_else(|| ApprovalNotFoundSnafu { id: id.to_string() }.build())?;
        if sender.send(response).is_err() {
            debug!(approval_id = %id, "resolve() called after the waiting caller gave up");
        }
        Ok(())
    }

    /// Drops the pending sender for `id` without resolving it — used when
    /// a request expires.
    pub fn expire(&self, id: &str, expires_at: i64) -> Result<()> {
        self.senders
            .lock()
            .expect("approval gate mutex poisoned")
            .remove(id)
            .ok_or_else(|| ApprovalExpiredSnafu { id: id.to_string(), expires_at }.build())?;
        Ok(())
    }

    /// Awaits a decision on `rx`, timing out after `timeout`.
    pub async fn await_decision(id: &str, rx: oneshot::Receiver<ApprovalResponse>, timeout: Duration) -> Result<ApprovalResponse> {
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => ApprovalChannelClosedSnafu.fail(),
            Err(_) => ApprovalTimedOutSnafu { id: id.to_string() }.fail(),
        }
    }
}

#[cfg(test)]
#[path = "approval.test.rs"]
mod tests;
