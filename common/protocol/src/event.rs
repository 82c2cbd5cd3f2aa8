//! The typed event union emitted to callers of the run loop.

use serde::Deserialize;
use serde::Serialize;

use crate::tool_call::ToolCall;
use crate::usage::Usage;

/// One event on a run's output stream.
///
/// Events on a single run are strictly ordered (single producer); see the
/// run loop's ordering guarantees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A content delta from the model's primary output channel.
    Content { delta: String },

    /// A reasoning/thinking delta. Transient — never persisted to the
    /// session's message history.
    Thinking { delta: String },

    /// The model requested a tool call (fully accumulated).
    ToolCall {
        id: String,
        name: String,
        arguments: String,
    },

    /// A streaming passthrough update for a tool call still being accumulated.
    ToolCallUpdate {
        id: String,
        name: String,
        status: String,
        arguments: String,
    },

    /// The result of executing one tool call.
    ToolResult {
        id: String,
        name: String,
        output: String,
        is_error: bool,
        duration_ms: u64,
    },

    /// Emitted periodically while a model stream or tool batch is in flight.
    Heartbeat,

    /// The run was truncated (e.g. by a fatal stream error) with tool calls
    /// still pending.
    Truncated {
        reason: String,
        pending_tool_calls: Vec<ToolCall>,
        usage: Usage,
    },

    /// The run paused before executing a tool batch.
    Pause { pending_tools: Vec<ToolCall> },

    /// No resume arrived within the configured window.
    PauseTimeout,

    /// The run resumed after a pause.
    PauseResumed { has_user_input: bool },

    /// A tool call requires human approval before it can execute.
    ApprovalRequest {
        id: String,
        tool_name: String,
        arguments: String,
        reason: String,
        session_id: String,
        expires_at: i64,
    },

    /// An approval request was resolved (approved or rejected).
    ApprovalResolved {
        id: String,
        approved: bool,
        decided_at: i64,
    },

    /// The run completed normally.
    Done { usage: Usage },

    /// The run terminated with an error.
    Error { message: String },
}

impl Event {
    /// Short discriminant name, useful for logging without dumping payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Content { .. } => "content",
            Event::Thinking { .. } => "thinking",
            Event::ToolCall { .. } => "tool_call",
            Event::ToolCallUpdate { .. } => "tool_call_update",
            Event::ToolResult { .. } => "tool_result",
            Event::Heartbeat => "heartbeat",
            Event::Truncated { .. } => "truncated",
            Event::Pause { .. } => "pause",
            Event::PauseTimeout => "pause_timeout",
            Event::PauseResumed { .. } => "pause_resumed",
            Event::ApprovalRequest { .. } => "approval_request",
            Event::ApprovalResolved { .. } => "approval_resolved",
            Event::Done { .. } => "done",
            Event::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
#[path = "event.test.rs"]
mod tests;
