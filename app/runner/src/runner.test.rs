use super::*;
use agentcore_policy::PermissionRuleEvaluator;
use agentcore_policy::RuleAction;
use agentcore_policy::RuleSource;
use agentcore_protocol::CachedSession;
use agentcore_protocol::ChatMessage;
use agentcore_protocol::ChatRequest;
use agentcore_protocol::ChatResponse;
use agentcore_protocol::FinishReason;
use agentcore_protocol::StreamEvent;
use agentcore_protocol::ToolCallDelta;
use agentcore_protocol::ToolExecResult;
use agentcore_protocol::ToolSchema;
use agentcore_protocol::Usage;
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

fn usage(prompt: u64, completion: u64) -> Usage {
    Usage::new(prompt, completion)
}

fn test_runner(model: ScriptedModel) -> Runner {
    let model: Arc<dyn ModelProvider> = Arc::new(model);
    let tools: Arc<dyn ToolRegistry> = Arc::new(MockRegistry);
    let sessions: Arc<dyn SessionStore> = Arc::new(MockSessions::default());
    Runner::new(model, tools, sessions, RunnerConfig::default())
}

#[tokio::test]
async fn a_run_streams_content_then_done() {
    let model = ScriptedModel::new(vec![vec![
        StreamEvent::Content { delta: "hi".to_string() },
        StreamEvent::Done { finish_reason: FinishReason::Stop, usage: usage(1, 1) },
    ]]);
    let runner = test_runner(model);

    let mut rx = runner.run("s1", "hello", CancellationToken::new()).expect("enqueue succeeds");

    let mut kinds = Vec::new();
    while let Some(event) = rx.recv().await {
        kinds.push(event.kind());
    }
    assert_eq!(kinds, vec!["content", "done"]);
}

#[tokio::test]
async fn cancel_session_stops_a_run_before_its_next_turn() {
    let model = ScriptedModel::new(vec![
        vec![
            StreamEvent::ToolCall(ToolCallDelta { index: 0, id: Some("call_1".to_string()), name: Some("Read".to_string()), arguments_delta: "{}".to_string(), function: None }),
            StreamEvent::Done { finish_reason: FinishReason::ToolCalls, usage: usage(10, 5) },
        ],
        vec![StreamEvent::Content { delta: "should never be seen".to_string() }, StreamEvent::Done { finish_reason: FinishReason::Stop, usage: usage(1, 1) }],
    ]);
    let runner = test_runner(model);

    let mut rx = runner.run("s1", "read the file", CancellationToken::new()).expect("enqueue succeeds");

    let mut kinds = Vec::new();
    while let Some(event) = rx.recv().await {
        let kind = event.kind();
        kinds.push(kind);
        if kind == "tool_result" {
            runner.cancel_session("s1");
        }
    }

    assert!(kinds.contains(&"tool_result"));
    assert_eq!(kinds.last(), Some(&"error"));
    assert!(!kinds.contains(&"done"));
}

#[tokio::test]
async fn reset_session_clears_armed_pause_state() {
    let runner = test_runner(ScriptedModel::new(vec![]));

    runner.pause_session("s1").expect("first arm succeeds");
    assert!(runner.pause_session("s1").is_err(), "arming twice without a reset should fail");

    runner.reset_session("s1").await;

    runner.pause_session("s1").expect("arm succeeds again after reset");
    assert!(!runner.get_pause_status("s1").paused);
}

#[tokio::test]
async fn set_block_message_template_affects_the_next_run() {
    let model = ScriptedModel::new(vec![vec![
        StreamEvent::ToolCall(ToolCallDelta { index: 0, id: Some("call_1".to_string()), name: Some("Bash".to_string()), arguments_delta: "{}".to_string(), function: None }),
        StreamEvent::Done { finish_reason: FinishReason::ToolCalls, usage: usage(10, 5) },
    ]]);
    let runner = test_runner(model);

    let mut policy = PermissionRuleEvaluator::new();
    policy.add_rule(agentcore_policy::PermissionRule::new(RuleSource::Policy, "Bash", RuleAction::Deny));
    runner.set_policy_executor(policy);
    runner.set_block_message_template("nope: {tool_name} ({reason})");

    let mut rx = runner.run("s1", "run a command", CancellationToken::new()).expect("enqueue succeeds");

    let mut output = None;
    while let Some(event) = rx.recv().await {
        if let Event::ToolResult { output: text, .. } = event {
            output = Some(text);
        }
    }

    assert!(output.expect("a tool result was emitted").starts_with("nope: Bash ("));
}
