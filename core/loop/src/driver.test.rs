use super::*;
use agentcore_hooks::HookRegistry;
use agentcore_policy::ApprovalGate;
use agentcore_policy::CircuitBreaker;
use agentcore_policy::PermissionRuleEvaluator;
use agentcore_protocol::CachedSession;
use agentcore_protocol::ChatRequest;
use agentcore_protocol::ChatResponse;
use agentcore_protocol::ToolExecResult;
use agentcore_protocol::ToolSchema;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex as StdMutex;
use tokio::sync::mpsc;
use tokio::sync::Mutex as AsyncMutex;

struct ScriptedModel {
    turns: StdMutex<VecDeque<Vec<StreamEvent>>>,
}

impl ScriptedModel {
    fn new(turns: Vec<Vec<StreamEvent>>) -> Self {
        Self { turns: StdMutex::new(turns.into_iter().collect()) }
    }
}

#[async_trait]
impl ModelProvider for ScriptedModel {
    async fn stream(&self, _request: ChatRequest) -> Result<mpsc::Receiver<StreamEvent>, Box<dyn std::error::Error + Send + Sync>> {
        let script = self.turns.lock().expect("mutex poisoned").pop_front().expect("no more scripted turns");
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            for event in script {
                let _ = tx.send(event).await;
            }
        });
        Ok(rx)
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, Box<dyn std::error::Error + Send + Sync>> {
        unimplemented!("the run loop only uses streaming")
    }
}

struct MockRegistry;

#[async_trait]
impl ToolRegistry for MockRegistry {
    async fn execute(&self, _session_id: &str, name: &str, _args: &Value) -> Result<ToolExecResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ToolExecResult::ok(format!("ran {name}")))
    }

    fn list(&self) -> Vec<ToolSchema> {
        vec![]
    }
}

#[derive(Default)]
struct MockSessions {
    messages: AsyncMutex<Vec<ChatMessage>>,
}

#[async_trait]
impl SessionStore for MockSessions {
    async fn get_or_create(&self, id: &str) -> Result<CachedSession, Box<dyn std::error::Error + Send + Sync>> {
        let messages = self.messages.lock().await.clone();
        Ok(CachedSession { id: id.to_string(), model: "test-model".to_string(), messages })
    }

    async fn add_message(&self, _id: &str, message: ChatMessage) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.messages.lock().await.push(message);
        Ok("msg-id".to_string())
    }

    async fn get_messages(&self, _id: &str) -> Result<Vec<ChatMessage>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.messages.lock().await.clone())
    }
}

#[derive(Default)]
struct TestSink {
    events: StdMutex<Vec<Event>>,
}

#[async_trait]
impl EventSink for TestSink {
    async fn emit(&self, event: Event) {
        self.events.lock().expect("mutex poisoned").push(event);
    }
}

impl TestSink {
    fn kinds(&self) -> Vec<&'static str> {
        self.events.lock().expect("mutex poisoned").iter().map(Event::kind).collect()
    }
}

fn usage(prompt: u64, completion: u64) -> Usage {
    Usage::new(prompt, completion)
}

#[tokio::test]
async fn stop_on_first_turn_emits_content_then_done_with_no_tool_call() {
    let model = ScriptedModel::new(vec![vec![
        StreamEvent::Content { delta: "hi there".to_string() },
        StreamEvent::Done { finish_reason: FinishReason::Stop, usage: usage(10, 5) },
    ]]);
    let registry = MockRegistry;
    let sessions = MockSessions::default();
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = StdMutex::new(CircuitBreaker::new(3));
    let tool_executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, Default::default());
    let pause = PauseController::new(std::time::Duration::from_secs(60));
    let agent_loop = AgentLoop::new(&model, &registry, &sessions, &hooks, &tool_executor, &pause, RunnerConfig::default());
    let sink = TestSink::default();
    let cancel = CancellationToken::new();

    let outcome = agent_loop.run("s1", "a1", "hello", &cancel, &sink).await;

    assert_eq!(outcome.stop_reason, crate::result::StopReason::ModelStopSignal);
    assert_eq!(outcome.iterations_completed, 1);
    let kinds = sink.kinds();
    assert!(kinds.iter().filter(|k| **k == "tool_call").count() == 0);
    assert_eq!(kinds.last(), Some(&"done"));
}

#[tokio::test]
async fn tool_call_turn_executes_and_then_stops_on_the_next_turn() {
    let model = ScriptedModel::new(vec![
        vec![
            StreamEvent::ToolCall(agentcore_protocol::ToolCallDelta {
                index: 0,
                id: Some("call_1".to_string()),
                name: Some("Read".to_string()),
                arguments_delta: "{}".to_string(),
                function: None,
            }),
            StreamEvent::Done { finish_reason: FinishReason::ToolCalls, usage: usage(20, 10) },
        ],
        vec![
            StreamEvent::Content { delta: "done reading".to_string() },
            StreamEvent::Done { finish_reason: FinishReason::Stop, usage: usage(5, 5) },
        ],
    ]);
    let registry = MockRegistry;
    let sessions = MockSessions::default();
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = StdMutex::new(CircuitBreaker::new(3));
    let tool_executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, Default::default());
    let pause = PauseController::new(std::time::Duration::from_secs(60));
    let agent_loop = AgentLoop::new(&model, &registry, &sessions, &hooks, &tool_executor, &pause, RunnerConfig::default());
    let sink = TestSink::default();
    let cancel = CancellationToken::new();

    let outcome = agent_loop.run("s1", "a1", "read the file", &cancel, &sink).await;

    assert_eq!(outcome.iterations_completed, 2);
    assert!(sink.kinds().contains(&"tool_result"));
}

#[tokio::test]
async fn already_cancelled_run_stops_immediately() {
    let model = ScriptedModel::new(vec![]);
    let registry = MockRegistry;
    let sessions = MockSessions::default();
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = StdMutex::new(CircuitBreaker::new(3));
    let tool_executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, Default::default());
    let pause = PauseController::new(std::time::Duration::from_secs(60));
    let agent_loop = AgentLoop::new(&model, &registry, &sessions, &hooks, &tool_executor, &pause, RunnerConfig::default());
    let sink = TestSink::default();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = agent_loop.run("s1", "a1", "hello", &cancel, &sink).await;

    assert_eq!(outcome.stop_reason, crate::result::StopReason::Cancelled);
}

#[tokio::test]
async fn hook_interrupted_before_message_stops_with_an_error_event() {
    let model = ScriptedModel::new(vec![]);
    let registry = MockRegistry;
    let sessions = MockSessions::default();
    let mut hook_registry = HookRegistry::new();
    hook_registry
        .register(agentcore_hooks::Handler::in_process("blocker", HookType::BeforeMessage, "_builtin", 0, |ctx| async {
            (ctx, agentcore_hooks::HandlerOutcome::ok(agentcore_hooks::HookResult::halt("blocked by policy")))
        }))
        .unwrap();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = StdMutex::new(CircuitBreaker::new(3));
    let tool_executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, Default::default());
    let pause = PauseController::new(std::time::Duration::from_secs(60));
    let agent_loop = AgentLoop::new(&model, &registry, &sessions, &hooks, &tool_executor, &pause, RunnerConfig::default());
    let sink = TestSink::default();
    let cancel = CancellationToken::new();

    let outcome = agent_loop.run("s1", "a1", "hello", &cancel, &sink).await;

    assert!(outcome.is_error());
    assert_eq!(sink.kinds(), vec!["error"]);
}
