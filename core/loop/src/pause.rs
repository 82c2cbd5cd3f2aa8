//! Lets an external caller arm a pause that the run loop observes just
//! before its next tool batch, then blocks on a single-slot rendezvous
//! until `resume` delivers optional input or the window times out.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use agentcore_protocol::ToolCall;
use tokio::sync::oneshot;

use crate::error::PauseResult;
use crate::error::pause_controller_error::AlreadyPausedSnafu;
use crate::error::pause_controller_error::NotPausedSnafu;

/// Operational snapshot returned by [`PauseController::status`].
#[derive(Debug, Clone)]
pub struct PauseStatus {
    pub paused: bool,
    pub paused_at: Option<i64>,
    pub pending_tools: Vec<ToolCall>,
    pub timeout_in_seconds: u64,
}

/// What the loop should do once a pause rendezvous settles.
#[derive(Debug)]
pub enum ResumeOutcome {
    Resumed { user_input: Option<String> },
    TimedOut,
}

#[derive(Default)]
struct PauseSlot {
    armed: bool,
    blocking: bool,
    paused_at: Option<i64>,
    pending_tools: Vec<ToolCall>,
    resume_tx: Option<oneshot::Sender<Option<String>>>,
}

/// Per-session pause/resume state, shared by one [`crate::AgentLoop`] run
/// and whatever external caller arms/resolves its pauses.
#[derive(Default)]
pub struct PauseController {
    timeout: Duration,
    slots: Mutex<HashMap<String, PauseSlot>>,
}

impl PauseController {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Arms a pause for `session_id`. Errors if a pause is already armed
    /// and actively blocking a run.
    pub fn arm(&self, session_id: &str) -> PauseResult<()> {
        let mut slots = self.slots.lock().expect("pause controller mutex poisoned");
        let slot = slots.entry(session_id.to_string()).or_default();
        if slot.armed || slot.blocking {
            return AlreadyPausedSnafu { session_id }.fail();
        }
        slot.armed = true;
        Ok(())
    }

    /// Checked by the loop before every tool batch. If armed, snapshots
    /// `pending_tools`, opens the rendezvous, and returns the receiver the
    /// loop should await (after emitting a `pause` event).
    pub fn check(&self, session_id: &str, pending_tools: Vec<ToolCall>, now: i64) -> Option<oneshot::Receiver<Option<String>>> {
        let mut slots = self.slots.lock().expect("pause controller mutex poisoned");
        let slot = slots.get_mut(session_id)?;
        if !slot.armed {
            return None;
        }
        slot.armed = false;
        slot.blocking = true;
        slot.paused_at = Some(now);
        slot.pending_tools = pending_tools;
        let (tx, rx) = oneshot::channel();
        slot.resume_tx = Some(tx);
        Some(rx)
    }

    /// Delivers `user_input` to whichever run is blocked in its rendezvous.
    pub fn resume(&self, session_id: &str, user_input: Option<String>) -> PauseResult<()> {
        let mut slots = self.slots.lock().expect("pause controller mutex poisoned");
        let slot = slots.get_mut(session_id).ok_or_else(|| NotPausedSnafu { session_id }.build())?;
        let tx = slot.resume_tx.take().ok_or_else(|| NotPausedSnafu { session_id }.build())?;
        slot.blocking = false;
        slot.paused_at = None;
        slot.pending_tools.clear();
        let _ = tx.send(user_input);
        Ok(())
    }

    /// Awaits the rendezvous, resolving to [`ResumeOutcome::TimedOut`] if
    /// nothing arrives within the configured window. Never returns an
    /// error: a timeout is a normal, documented outcome.
    pub async fn await_resume(&self, rx: oneshot::Receiver<Option<String>>) -> ResumeOutcome {
        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(user_input)) => ResumeOutcome::Resumed { user_input },
            Ok(Err(_)) => ResumeOutcome::Resumed { user_input: None },
            Err(_) => ResumeOutcome::TimedOut,
        }
    }

    pub fn status(&self, session_id: &str) -> PauseStatus {
        let slots = self.slots.lock().expect("pause controller mutex poisoned");
        match slots.get(session_id) {
            Some(slot) => PauseStatus {
                paused: slot.blocking,
                paused_at: slot.paused_at,
                pending_tools: slot.pending_tools.clone(),
                timeout_in_seconds: self.timeout.as_secs(),
            },
            None => PauseStatus {
                paused: false,
                paused_at: None,
                pending_tools: Vec::new(),
                timeout_in_seconds: self.timeout.as_secs(),
            },
        }
    }

    /// Idempotently releases all state for `session_id`.
    pub fn cleanup(&self, session_id: &str) {
        self.slots.lock().expect("pause controller mutex poisoned").remove(session_id);
    }
}

#[cfg(test)]
#[path = "pause.test.rs"]
mod tests;
