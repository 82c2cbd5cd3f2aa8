//! Runs one assistant turn's tool calls, in order, through the full
//! policy → approval → execute → hooks → emit pipeline.

use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use agentcore_hooks::HookContext;
use agentcore_hooks::HookExecutor;
use agentcore_policy::ApprovalGate;
use agentcore_policy::CircuitBreaker;
use agentcore_policy::PermissionRuleEvaluator;
use agentcore_policy::PolicyDecision;
use agentcore_protocol::Event;
use agentcore_protocol::EventSink;
use agentcore_protocol::HookType;
use agentcore_protocol::ToolCall;
use agentcore_protocol::ToolRegistry;
use chrono::Utc;
use regex::Regex;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::scrub::CredentialScrubber;
use crate::truncate::truncate_tool_output;

/// Tunables for one executor instance. Defaults mirror the documented
/// behavior: a 64 KiB output ceiling, a 15s heartbeat cadence, and a 5
/// minute approval window.
#[derive(Debug, Clone)]
pub struct ToolExecutorConfig {
    pub max_output_bytes: usize,
    pub heartbeat_interval: Duration,
    pub approval_timeout: Duration,
    /// Extra credential-scrub patterns appended to the built-in set.
    pub custom_scrub_patterns: Vec<Regex>,
    /// Overrides the default "Tool call blocked by policy: {reason}" text.
    /// `{tool_name}`, `{reason}`, and `{count}` are substituted literally.
    pub block_message_template: Option<String>,
}

impl Default for ToolExecutorConfig {
    fn default() -> Self {
        Self {
            max_output_bytes: 64 * 1024,
            heartbeat_interval: Duration::from_secs(15),
            approval_timeout: Duration::from_secs(5 * 60),
            custom_scrub_patterns: Vec::new(),
            block_message_template: None,
        }
    }
}

/// The settled outcome of one tool call, ready to append as a tool-role
/// message.
#[derive(Debug, Clone)]
pub struct ToolExecOutcome {
    pub tool_call_id: String,
    pub name: String,
    pub output: String,
    pub is_error: bool,
    pub duration_ms: u64,
}

/// Executes a batch of tool calls sequentially against shared policy,
/// approval, and hook state owned by the caller (typically the per-session
/// run loop).
pub struct ToolExecutor<'a> {
    registry: &'a (dyn ToolRegistry + 'a),
    hooks: &'a HookExecutor<'a>,
    policy: &'a PermissionRuleEvaluator,
    approval_gate: &'a ApprovalGate,
    circuit_breaker: &'a Mutex<CircuitBreaker>,
    scrubber: CredentialScrubber,
    config: ToolExecutorConfig,
}

impl<'a> ToolExecutor<'a> {
    pub fn new(
        registry: &'a (dyn ToolRegistry + 'a),
        hooks: &'a HookExecutor<'a>,
        policy: &'a PermissionRuleEvaluator,
        approval_gate: &'a ApprovalGate,
        circuit_breaker: &'a Mutex<CircuitBreaker>,
        config: ToolExecutorConfig,
    ) -> Self {
        let scrubber = config.custom_scrub_patterns.iter().cloned().fold(CredentialScrubber::new(), CredentialScrubber::with_pattern);
        Self {
            registry,
            hooks,
            policy,
            approval_gate,
            circuit_breaker,
            scrubber,
            config,
        }
    }

    /// Runs every call in `tool_calls`, in order, emitting events as it goes.
    /// A background heartbeat fires every `heartbeat_interval` for the
    /// duration of the whole batch.
    pub async fn execute_batch(
        &self,
        session_id: &str,
        agent_id: &str,
        tool_calls: Vec<ToolCall>,
        sink: &(dyn EventSink + Sync),
    ) -> Vec<ToolExecOutcome> {
        let cancel = CancellationToken::new();
        let heartbeat = self.spawn_heartbeat(cancel.clone());

        let mut outcomes = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            outcomes.push(self.execute_one(session_id, agent_id, call, sink).await);
        }

        cancel.cancel();
        let _ = heartbeat.await;
        outcomes
    }

    fn spawn_heartbeat(&self, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        let interval = self.config.heartbeat_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // first tick fires immediately; discard it
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
            }
        })
    }

    async fn execute_one(&self, session_id: &str, agent_id: &str, call: ToolCall, sink: &(dyn EventSink + Sync)) -> ToolExecOutcome {
        let mut args = match serde_json::from_str::<Value>(&call.arguments) {
            Ok(v) => v,
            Err(err) => {
                return self
                    .finish(sink, &call, format!("Failed to parse tool arguments (stream may have been truncated): {err}"), true, 0)
                    .await;
            }
        };

        if let Value::Object(ref mut map) = args {
            map.insert("session_id".to_string(), Value::String(session_id.to_string()));
            map.insert("agent_id".to_string(), Value::String(agent_id.to_string()));
        }

        let command_input = args.get("command").and_then(Value::as_str);
        let file_path = args.get("file_path").and_then(Value::as_str);
        let decision = self.policy.evaluate(&call.name, file_path, command_input, self.registry.is_mutating(&call.name));

        match decision {
            PolicyDecision::Block { reason, .. } => {
                return self.finish(sink, &call, self.blocked_message(session_id, &call.name, &reason), true, 0).await;
            }
            PolicyDecision::RequireApproval { reason, .. } => match self.await_approval(session_id, &call, &reason, sink).await {
                Ok(Some(modified_args)) => args = modified_args,
                Ok(None) => {}
                Err(message) => return self.finish(sink, &call, message, true, 0).await,
            },
            PolicyDecision::Allow => {}
        }

        let before_ctx = HookContext::new(HookType::BeforeToolCall, Utc::now().timestamp()).with_tool_call(call.clone());
        let (_ctx, before_result) = self.hooks.fire(before_ctx).await;
        if !before_result.continue_chain {
            let reason = before_result.error.unwrap_or_else(|| "rejected without a reason".to_string());
            return self.finish(sink, &call, format!("Tool call blocked by hook: {reason}"), true, 0).await;
        }

        let start = Instant::now();
        let exec_result = self.registry.execute(session_id, &call.name, &args).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let (raw_output, is_error) = match exec_result {
            Ok(result) => (result.content, result.is_error),
            Err(err) => (err.to_string(), true),
        };

        let truncated = truncate_tool_output(&raw_output, self.config.max_output_bytes);
        let output = self.scrubber.scrub(&truncated);

        let after_ctx = HookContext::new(HookType::AfterToolCall, Utc::now().timestamp())
            .with_tool_call(call.clone())
            .with_response(serde_json::json!({
                "output": output,
                "duration_ms": duration_ms,
                "is_error": is_error,
            }));
        let _ = self.hooks.fire(after_ctx).await;

        self.finish(sink, &call, output, is_error, duration_ms).await
    }

    fn blocked_message(&self, session_id: &str, tool_name: &str, reason: &str) -> String {
        let mut breaker = self.circuit_breaker.lock().expect("circuit breaker mutex poisoned");
        let count = breaker.record_block(session_id, tool_name);
        let tripped = breaker.is_tripped(session_id, tool_name);
        drop(breaker);
        let mut message = match &self.config.block_message_template {
            Some(template) => template.replace("{tool_name}", tool_name).replace("{reason}", reason).replace("{count}", &count.to_string()),
            None => format!("Tool call blocked by policy: {reason}"),
        };
        if tripped {
            message.push_str(&format!(" This tool ({tool_name}) has now been blocked {count} times; stop retrying it."));
        }
        message
    }

    /// `Ok(Some(args))` — approved with replacement arguments.
    /// `Ok(None)` — approved as-is.
    /// `Err(message)` — rejected or the approval itself failed; `message`
    /// is the tool-result text to emit.
    async fn await_approval(&self, session_id: &str, call: &ToolCall, reason: &str, sink: &(dyn EventSink + Sync)) -> Result<Option<Value>, String> {
        let now = Utc::now().timestamp();
        let (pending, rx) = self.approval_gate.create_request(call.name.clone(), call.arguments.clone(), reason, session_id, self.config.approval_timeout, now);

        sink.emit(Event::ApprovalRequest {
            id: pending.id.clone(),
            tool_name: pending.tool_name.clone(),
            arguments: pending.arguments.clone(),
            reason: pending.reason.clone(),
            session_id: pending.session_id.clone(),
            expires_at: pending.expires_at,
        })
        .await;

        let decision = match ApprovalGate::await_decision(&pending.id, rx, self.config.approval_timeout).await {
            Ok(decision) => decision,
            Err(err) => {
                warn!(approval_id = %pending.id, error = %err, "approval gate failed");
                sink.emit(Event::ApprovalResolved {
                    id: pending.id.clone(),
                    approved: false,
                    decided_at: Utc::now().timestamp(),
                })
                .await;
                return Err(format!("Approval could not be obtained: {err}"));
            }
        };

        sink.emit(Event::ApprovalResolved {
            id: pending.id.clone(),
            approved: decision.approved,
            decided_at: decision.decided_at,
        })
        .await;

        if !decision.approved {
            return Err(format!("Tool call rejected: {}", decision.message));
        }

        match decision.modified_arguments {
            Some(raw) => serde_json::from_str::<Value>(&raw).map(Some).map_err(|err| format!("Approved with unparseable modified arguments: {err}")),
            None => Ok(None),
        }
    }

    async fn finish(&self, sink: &(dyn EventSink + Sync), call: &ToolCall, output: String, is_error: bool, duration_ms: u64) -> ToolExecOutcome {
        sink.emit(Event::ToolResult {
            id: call.id.clone(),
            name: call.name.clone(),
            output: output.clone(),
            is_error,
            duration_ms,
        })
        .await;

        ToolExecOutcome {
            tool_call_id: call.id.clone(),
            name: call.name.clone(),
            output,
            is_error,
            duration_ms,
        }
    }
}

#[cfg(test)]
#[path = "executor.test.rs"]
mod tests;
