//! The composition root: owns every long-lived dependency the agent run
//! loop needs and exposes the caller-facing Runner API on top of the
//! per-session run queue.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;

use agentcore_config::RunnerConfig;
use agentcore_hooks::HookExecutor;
use agentcore_hooks::HookRegistry;
use agentcore_loop::AgentLoop;
use agentcore_loop::PauseController;
use agentcore_loop::PauseControllerError;
use agentcore_loop::PauseStatus;
use agentcore_policy::ApprovalGate;
use agentcore_policy::CircuitBreaker;
use agentcore_policy::PermissionRuleEvaluator;
use agentcore_protocol::Event;
use agentcore_protocol::ModelProvider;
use agentcore_protocol::SessionStore;
use agentcore_protocol::ToolRegistry;
use agentcore_queue::RunQueue;
use agentcore_queue::Task;
use regex::Regex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::sink::ChannelEventSink;

/// Owns the model, tool registry, session store, and every piece of shared
/// policy/hook/pause state; wires them into one [`AgentLoop`] per run and
/// serializes runs per session through a [`RunQueue`].
///
/// `hooks`, `policy`, and `approval_gate` are held behind a lock so the
/// `Set*` configurators can swap them for in-flight sessions; each spawned
/// run takes a cheap `Arc` snapshot at enqueue time rather than holding the
/// lock for the run's duration (see §5's "reads must return snapshots").
pub struct Runner {
    model: Arc<dyn ModelProvider>,
    tools: Arc<dyn ToolRegistry>,
    sessions: Arc<dyn SessionStore>,
    hooks: RwLock<Arc<HookRegistry>>,
    policy: RwLock<Arc<PermissionRuleEvaluator>>,
    approval_gate: RwLock<Arc<ApprovalGate>>,
    circuit_breaker: Arc<Mutex<CircuitBreaker>>,
    pause: Arc<PauseController>,
    queue: RunQueue,
    config: RunnerConfig,
    tool_executor_config: RwLock<agentcore_tools::ToolExecutorConfig>,
}

impl Runner {
    pub fn new(model: Arc<dyn ModelProvider>, tools: Arc<dyn ToolRegistry>, sessions: Arc<dyn SessionStore>, config: RunnerConfig) -> Self {
        let circuit_breaker = Arc::new(Mutex::new(CircuitBreaker::new(config.circuit_breaker_threshold)));
        let pause = Arc::new(PauseController::new(config.rendezvous_timeout));
        let queue = RunQueue::new(&config);
        let tool_executor_config = agentcore_tools::ToolExecutorConfig {
            max_output_bytes: config.tool_output_truncation_ceiling,
            heartbeat_interval: config.heartbeat_interval,
            approval_timeout: config.rendezvous_timeout,
            ..agentcore_tools::ToolExecutorConfig::default()
        };

        Self {
            model,
            tools,
            sessions,
            hooks: RwLock::new(Arc::new(HookRegistry::new())),
            policy: RwLock::new(Arc::new(PermissionRuleEvaluator::new())),
            approval_gate: RwLock::new(Arc::new(ApprovalGate::new())),
            circuit_breaker,
            pause,
            queue,
            config,
            tool_executor_config: RwLock::new(tool_executor_config),
        }
    }

    /// Enqueues a run for `session_id` using the Runner's configured model.
    /// Returns a receiver the caller reads events from; enqueueing fails
    /// immediately if the session's pending queue is already at capacity.
    pub fn run(&self, session_id: &str, user_input: &str, cancel: CancellationToken) -> agentcore_queue::Result<mpsc::Receiver<Event>> {
        self.spawn_run(session_id, None, user_input, None, cancel)
    }

    /// Like [`Runner::run`], but overrides the model for this one run and
    /// accepts an optional scenario tag (logged, not interpreted) and
    /// attachments (folded into the user message as plain text; this crate
    /// defines no attachment wire format).
    pub fn run_with_model(
        &self,
        session_id: &str,
        user_input: &str,
        model: Arc<dyn ModelProvider>,
        scenario: Option<&str>,
        attachments: Option<Vec<String>>,
        cancel: CancellationToken,
    ) -> agentcore_queue::Result<mpsc::Receiver<Event>> {
        if let Some(scenario) = scenario {
            debug!(session_id, scenario, "run_with_model invoked with a scenario tag");
        }
        self.spawn_run(session_id, Some(model), user_input, attachments, cancel)
    }

    fn spawn_run(
        &self,
        session_id: &str,
        model_override: Option<Arc<dyn ModelProvider>>,
        user_input: &str,
        attachments: Option<Vec<String>>,
        cancel: CancellationToken,
    ) -> agentcore_queue::Result<mpsc::Receiver<Event>> {
        let (tx, rx) = mpsc::channel(self.config.event_channel_capacity);

        let model = model_override.unwrap_or_else(|| self.model.clone());
        let tools = self.tools.clone();
        let sessions = self.sessions.clone();
        let hooks = self.hooks.read().expect("hook registry lock poisoned").clone();
        let policy = self.policy.read().expect("policy lock poisoned").clone();
        let approval_gate = self.approval_gate.read().expect("approval gate lock poisoned").clone();
        let circuit_breaker = self.circuit_breaker.clone();
        let pause = self.pause.clone();
        let runner_config = self.config.clone();
        let tool_executor_config = self.tool_executor_config.read().expect("tool executor config lock poisoned").clone();
        let session_id_owned = session_id.to_string();
        let agent_id_owned = session_id.to_string();
        let user_input_owned = augmented_input(user_input, &attachments);

        let task: Task = Box::new(move |task_cancel: CancellationToken| {
            Box::pin(async move {
                let sink = ChannelEventSink::new(tx, task_cancel.clone());
                let hooks_executor = HookExecutor::new(&hooks);
                let tool_executor = agentcore_tools::ToolExecutor::new(tools.as_ref(), &hooks_executor, policy.as_ref(), approval_gate.as_ref(), &circuit_breaker, tool_executor_config);
                let agent_loop = AgentLoop::new(model.as_ref(), tools.as_ref(), sessions.as_ref(), &hooks_executor, &tool_executor, pause.as_ref(), runner_config);

                let outcome = agent_loop.run(&session_id_owned, &agent_id_owned, &user_input_owned, &task_cancel, &sink).await;
                info!(session_id = %session_id_owned, iterations = outcome.iterations_completed, is_error = outcome.is_error(), "run finished");
            })
        });

        self.queue.enqueue(session_id, &cancel, task).map(|_handle| rx)
    }

    /// Cancels the running and pending tasks queued for `session_id`.
    pub fn cancel_session(&self, session_id: &str) {
        self.queue.cancel(session_id);
    }

    /// Cancels outstanding work, clears circuit-breaker counts and pause
    /// state, and asks the session store to invalidate its cache for
    /// `session_id`.
    pub async fn reset_session(&self, session_id: &str) {
        self.queue.cancel(session_id);
        self.pause.cleanup(session_id);
        self.circuit_breaker.lock().expect("circuit breaker mutex poisoned").reset_session(session_id);
        if let Err(err) = self.sessions.reset(session_id).await {
            warn!(session_id, error = %err, "failed to reset session-store state");
        }
    }

    pub fn pause_session(&self, session_id: &str) -> Result<(), PauseControllerError> {
        self.pause.arm(session_id)
    }

    pub fn resume_session(&self, session_id: &str, user_input: Option<String>) -> Result<(), PauseControllerError> {
        self.pause.resume(session_id, user_input)
    }

    pub fn get_pause_status(&self, session_id: &str) -> PauseStatus {
        self.pause.status(session_id)
    }

    pub fn set_policy_executor(&self, policy: PermissionRuleEvaluator) {
        *self.policy.write().expect("policy lock poisoned") = Arc::new(policy);
    }

    pub fn set_hook_manager(&self, hooks: HookRegistry) {
        *self.hooks.write().expect("hook registry lock poisoned") = Arc::new(hooks);
    }

    pub fn set_approval_manager(&self, approval_gate: ApprovalGate) {
        *self.approval_gate.write().expect("approval gate lock poisoned") = Arc::new(approval_gate);
    }

    /// Rebuilds the circuit breaker with a new threshold. Existing
    /// per-(session, tool) block counts are not carried over.
    pub fn set_circuit_breaker_threshold(&self, threshold: u32) {
        *self.circuit_breaker.lock().expect("circuit breaker mutex poisoned") = CircuitBreaker::new(threshold);
    }

    pub fn set_scrub_rules(&self, patterns: Vec<Regex>) {
        self.tool_executor_config.write().expect("tool executor config lock poisoned").custom_scrub_patterns = patterns;
    }

    pub fn set_block_message_template(&self, template: impl Into<String>) {
        self.tool_executor_config.write().expect("tool executor config lock poisoned").block_message_template = Some(template.into());
    }
}

fn augmented_input(user_input: &str, attachments: &Option<Vec<String>>) -> String {
    let Some(items) = attachments else { return user_input.to_string() };
    if items.is_empty() {
        return user_input.to_string();
    }
    let mut text = user_input.to_string();
    text.push_str("\n\nAttachments:\n");
    for item in items {
        text.push_str("- ");
        text.push_str(item);
        text.push('\n');
    }
    text
}

#[cfg(test)]
#[path = "runner.test.rs"]
mod tests;
