//! The agent run loop: resolves a session, fires lifecycle hooks around one
//! multi-turn conversation, streams each model turn, and hands tool calls
//! off to the tool executor until the model signals stop.

use agentcore_config::RunnerConfig;
use agentcore_hooks::HookContext;
use agentcore_hooks::HookExecutor;
use agentcore_protocol::ChatMessage;
use agentcore_protocol::ChatRequest;
use agentcore_protocol::Event;
use agentcore_protocol::EventSink;
use agentcore_protocol::FinishReason;
use agentcore_protocol::HookType;
use agentcore_protocol::ModelProvider;
use agentcore_protocol::SessionStore;
use agentcore_protocol::StreamEvent;
use agentcore_protocol::ToolRegistry;
use agentcore_protocol::Usage;
use agentcore_tools::ToolExecutor;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::warn;

use crate::accumulator::StreamAccumulator;
use crate::error::run_loop_error::HookInterruptedSnafu;
use crate::pause::PauseController;
use crate::pause::ResumeOutcome;
use crate::result::RunOutcome;

/// Consecutive turns that may yield only tool errors before the loop gives
/// up to avoid a runaway retry cycle.
const MAX_CONSECUTIVE_ALL_ERROR_TURNS: u32 = 3;

/// Drives one multi-turn conversation for a single session. Borrows the
/// long-lived, per-session state (model, registries, hook chain, pause
/// controller) owned by the composition root; constructed fresh for each
/// call to [`AgentLoop::run`].
pub struct AgentLoop<'a> {
    model: &'a (dyn ModelProvider + 'a),
    tools: &'a (dyn ToolRegistry + 'a),
    sessions: &'a (dyn SessionStore + 'a),
    hooks: &'a HookExecutor<'a>,
    tool_executor: &'a ToolExecutor<'a>,
    pause: &'a PauseController,
    config: RunnerConfig,
}

impl<'a> AgentLoop<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        model: &'a (dyn ModelProvider + 'a),
        tools: &'a (dyn ToolRegistry + 'a),
        sessions: &'a (dyn SessionStore + 'a),
        hooks: &'a HookExecutor<'a>,
        tool_executor: &'a ToolExecutor<'a>,
        pause: &'a PauseController,
        config: RunnerConfig,
    ) -> Self {
        Self {
            model,
            tools,
            sessions,
            hooks,
            tool_executor,
            pause,
            config,
        }
    }

    /// Runs one conversation turn through to completion: resolves the
    /// session, fires `before_message`, then iterates model turns and tool
    /// batches until a stop decision, cancellation, or the iteration bound.
    pub async fn run(&self, session_id: &str, agent_id: &str, user_input: &str, cancel: &CancellationToken, sink: &(dyn EventSink + Sync)) -> RunOutcome {
        let mut usage = Usage::default();

        let cached = match self.sessions.get_or_create(session_id).await {
            Ok(cached) => cached,
            Err(err) => return self.fail(sink, 0, usage, format!("Failed to resolve session {session_id}: {err}")).await,
        };
        if cached.messages.is_empty() {
            let ctx = HookContext::new(HookType::SessionCreate, Utc::now().timestamp()).with_session(serde_json::json!({ "session_id": session_id }));
            let _ = self.hooks.fire(ctx).await;
        }

        let mut user_input = user_input.to_string();
        let before_message = HookContext::new(HookType::BeforeMessage, Utc::now().timestamp()).with_message(serde_json::json!({ "content": user_input }));
        let (_, before_result) = self.hooks.fire(before_message).await;
        if !before_result.continue_chain {
            let err = HookInterruptedSnafu.build();
            return self.fail(sink, 0, usage, err.to_string()).await;
        }
        if before_result.modified {
            if let Some(replacement) = before_result.data.get("content").and_then(|v| v.as_str()) {
                user_input = replacement.to_string();
            }
        }

        let mut consecutive_all_error_turns = 0u32;

        for iteration in 1..=self.config.max_iterations {
            if cancel.is_cancelled() {
                sink.emit(Event::Error { message: "Run was cancelled".to_string() }).await;
                return RunOutcome::cancelled(iteration - 1, usage);
            }

            let mut messages = match self.sessions.get_messages(session_id).await {
                Ok(messages) => messages,
                Err(err) => return self.fail(sink, iteration - 1, usage, format!("Failed to load session history: {err}")).await,
            };
            messages.push(ChatMessage {
                role: "user".to_string(),
                content: user_input.clone(),
                tool_calls: Vec::new(),
                tool_call_id: None,
            });

            let request = ChatRequest {
                model: cached.model.clone(),
                messages,
                tools: self.tools.to_provider_tools(),
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
                stream: self.config.stream_output,
                conversation_id: session_id.to_string(),
            };

            let (accumulator, finish_reason, turn_usage) = match self.stream_turn(request, cancel, sink).await {
                Ok(result) => result,
                Err(message) => return self.fail(sink, iteration - 1, usage, message).await,
            };
            usage.accumulate(turn_usage);

            let effective_reason = accumulator.effective_finish_reason(finish_reason);
            let stop_now = effective_reason != FinishReason::ToolCalls || !accumulator.has_tool_calls();

            if stop_now {
                let response_ctx = HookContext::new(HookType::BeforeResponse, Utc::now().timestamp())
                    .with_response(serde_json::json!({ "content": accumulator.effective_content() }));
                let (_, response_result) = self.hooks.fire(response_ctx).await;
                let final_content = if response_result.modified {
                    response_result.data.get("content").and_then(|v| v.as_str()).map(str::to_string)
                } else {
                    None
                }
                .unwrap_or_else(|| accumulator.effective_content().to_string());

                if let Err(err) = self
                    .sessions
                    .add_message(session_id, ChatMessage { role: "assistant".to_string(), content: final_content, tool_calls: Vec::new(), tool_call_id: None })
                    .await
                {
                    warn!(session_id, error = %err, "failed to persist final assistant message");
                }

                let after_ctx = HookContext::new(HookType::AfterResponse, Utc::now().timestamp());
                let _ = self.hooks.fire(after_ctx).await;

                sink.emit(Event::Done { usage }).await;
                return RunOutcome::completed(iteration, usage);
            }

            let tool_calls = accumulator.tool_calls();
            if let Err(err) = self
                .sessions
                .add_message(session_id, ChatMessage { role: "assistant".to_string(), content: accumulator.effective_content().to_string(), tool_calls: tool_calls.clone(), tool_call_id: None })
                .await
            {
                warn!(session_id, error = %err, "failed to persist assistant tool-call message");
            }

            if let Some(rx) = self.pause.check(session_id, tool_calls.clone(), Utc::now().timestamp()) {
                sink.emit(Event::Pause { pending_tools: tool_calls.clone() }).await;
                match self.pause.await_resume(rx).await {
                    ResumeOutcome::Resumed { user_input: resumed_input } => {
                        sink.emit(Event::PauseResumed { has_user_input: resumed_input.is_some() }).await;
                        if let Some(replacement) = resumed_input {
                            user_input = replacement;
                        }
                    }
                    ResumeOutcome::TimedOut => {
                        sink.emit(Event::PauseTimeout).await;
                    }
                }
            }

            let outcomes = self.tool_executor.execute_batch(session_id, agent_id, tool_calls, sink).await;
            let all_errored = !outcomes.is_empty() && outcomes.iter().all(|o| o.is_error);

            for outcome in &outcomes {
                if let Err(err) = self
                    .sessions
                    .add_message(
                        session_id,
                        ChatMessage { role: "tool".to_string(), content: outcome.output.clone(), tool_calls: Vec::new(), tool_call_id: Some(outcome.tool_call_id.clone()) },
                    )
                    .await
                {
                    warn!(session_id, error = %err, "failed to persist tool result message");
                }
            }

            if all_errored {
                consecutive_all_error_turns += 1;
            } else {
                consecutive_all_error_turns = 0;
            }

            if consecutive_all_error_turns >= MAX_CONSECUTIVE_ALL_ERROR_TURNS {
                sink.emit(Event::Content { delta: "Stopping: the last few tool calls all failed.".to_string() }).await;
                sink.emit(Event::Done { usage }).await;
                return RunOutcome::completed(iteration, usage);
            }

            user_input.clear();
        }

        sink.emit(Event::Error { message: format!("Maximum iterations ({}) reached without a stop decision", self.config.max_iterations) }).await;
        RunOutcome::max_iterations_reached(self.config.max_iterations, usage)
    }

    /// Streams one model turn, forwarding content/thinking/tool-call deltas
    /// as events and emitting a heartbeat every `heartbeat_interval` while
    /// the stream is open.
    async fn stream_turn(&self, request: ChatRequest, cancel: &CancellationToken, sink: &(dyn EventSink + Sync)) -> Result<(StreamAccumulator, FinishReason, Usage), String> {
        let mut rx = self.model.stream(request).await.map_err(|err| format!("Stream error: {err}"))?;
        let mut accumulator = StreamAccumulator::new();
        let mut usage = Usage::default();
        let mut finish_reason = FinishReason::Stop;
        let mut heartbeat = tokio::time::interval(self.config.heartbeat_interval);
        heartbeat.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err("Run was cancelled".to_string()),
                _ = heartbeat.tick() => {
                    sink.emit(Event::Heartbeat).await;
                }
                event = rx.recv() => {
                    let Some(event) = event else { break };
                    match event {
                        StreamEvent::Content { delta } => {
                            accumulator.push_content(&delta);
                            sink.emit(Event::Content { delta }).await;
                        }
                        StreamEvent::Thinking { delta } => {
                            accumulator.push_thinking(&delta);
                            sink.emit(Event::Thinking { delta }).await;
                        }
                        StreamEvent::ToolCall(delta) => {
                            accumulator.push_tool_call(delta);
                        }
                        StreamEvent::ToolCallUpdate { id, name, status, arguments } => {
                            sink.emit(Event::ToolCallUpdate { id, name, status, arguments }).await;
                        }
                        StreamEvent::Done { finish_reason: reason, usage: turn_usage } => {
                            finish_reason = reason;
                            usage = turn_usage;
                            break;
                        }
                        StreamEvent::Error { message } => return Err(format!("Stream error: {message}")),
                    }
                }
            }
        }

        Ok((accumulator, finish_reason, usage))
    }

    async fn fail(&self, sink: &(dyn EventSink + Sync), iterations: u32, usage: Usage, message: String) -> RunOutcome {
        debug!(message = %message, "run loop terminating with an error");
        sink.emit(Event::Error { message: message.clone() }).await;
        RunOutcome::error(iterations, usage, message)
    }
}

#[cfg(test)]
#[path = "driver.test.rs"]
mod tests;
