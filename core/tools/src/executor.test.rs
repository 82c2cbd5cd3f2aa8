use super::*;
use agentcore_hooks::Handler;
use agentcore_hooks::HandlerOutcome;
use agentcore_hooks::HookRegistry;
use agentcore_hooks::HookResult;
use agentcore_policy::ApprovalResponse;
use agentcore_policy::PermissionRule;
use agentcore_policy::RuleAction;
use agentcore_policy::RuleSource;
use agentcore_protocol::ToolExecResult;
use agentcore_protocol::ToolSchema;
use async_trait::async_trait;
use std::sync::Mutex as StdMutex;

struct MockRegistry {
    mutating: bool,
}

#[async_trait]
impl ToolRegistry for MockRegistry {
    async fn execute(&self, _session_id: &str, name: &str, args: &Value) -> Result<ToolExecResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ToolExecResult::ok(format!("ran {name} with {args}")))
    }

    fn list(&self) -> Vec<ToolSchema> {
        vec![]
    }

    fn is_mutating(&self, _name: &str) -> bool {
        self.mutating
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
    fn find(&self, kind: &str) -> Option<Event> {
        self.events.lock().expect("mutex poisoned").iter().find(|e| e.kind() == kind).cloned()
    }
}

fn breaker(threshold: u32) -> Mutex<CircuitBreaker> {
    Mutex::new(CircuitBreaker::new(threshold))
}

#[tokio::test]
async fn read_only_tool_with_no_rule_executes() {
    let registry = MockRegistry { mutating: false };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, ToolExecutorConfig::default());
    let sink = TestSink::default();

    let outcomes = executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Read", "{}")], &sink).await;
    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].is_error);
    assert!(sink.find("tool_result").is_some());
}

#[tokio::test]
async fn malformed_arguments_produce_an_error_result_without_executing() {
    let registry = MockRegistry { mutating: false };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, ToolExecutorConfig::default());
    let sink = TestSink::default();

    let outcomes = executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Read", "{not json")], &sink).await;
    assert!(outcomes[0].is_error);
    assert!(outcomes[0].output.contains("truncated"));
}

#[tokio::test]
async fn deny_rule_blocks_and_trips_circuit_breaker_message() {
    let registry = MockRegistry { mutating: false };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let mut policy = PermissionRuleEvaluator::new();
    policy.add_rule(PermissionRule::new(RuleSource::Policy, "Bash", RuleAction::Deny));
    let gate = ApprovalGate::new();
    let cb = breaker(1);
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, ToolExecutorConfig::default());
    let sink = TestSink::default();

    let outcomes = executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Bash", "{}")], &sink).await;
    assert!(outcomes[0].is_error);
    assert!(outcomes[0].output.contains("blocked by policy"));
    assert!(outcomes[0].output.contains("stop retrying"));
}

#[tokio::test]
async fn before_hook_halting_blocks_execution() {
    let registry = MockRegistry { mutating: false };
    let mut hook_registry = HookRegistry::new();
    hook_registry
        .register(Handler::in_process("blocker", HookType::BeforeToolCall, "_builtin", 0, |ctx| async {
            (ctx, HandlerOutcome::ok(HookResult::halt("no bash allowed")))
        }))
        .unwrap();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, ToolExecutorConfig::default());
    let sink = TestSink::default();

    let outcomes = executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Bash", "{}")], &sink).await;
    assert!(outcomes[0].is_error);
    assert!(outcomes[0].output.contains("no bash allowed"));
}

#[tokio::test]
async fn mutating_tool_awaits_approval_and_proceeds_once_approved() {
    let registry = MockRegistry { mutating: true };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let config = ToolExecutorConfig {
        approval_timeout: Duration::from_secs(5),
        ..ToolExecutorConfig::default()
    };
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, config);
    let sink = TestSink::default();

    let approve = async {
        loop {
            if let Some(Event::ApprovalRequest { id, .. }) = sink.find("approval_request") {
                gate.resolve(
                    &id,
                    ApprovalResponse {
                        approved: true,
                        message: "looks fine".into(),
                        modified_arguments: None,
                        decided_at: 0,
                    },
                )
                .unwrap();
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };

    let (outcomes, ()) = tokio::join!(executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Write", "{}")], &sink), approve);
    assert!(!outcomes[0].is_error);
    assert!(sink.find("approval_resolved").is_some());
}

#[tokio::test]
async fn custom_scrub_pattern_redacts_in_addition_to_the_built_ins() {
    let registry = MockRegistry { mutating: false };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let config = ToolExecutorConfig {
        custom_scrub_patterns: vec![Regex::new(r"(?P<prefix>internal-id: )(?P<secret>\d{6,})").unwrap()],
        ..ToolExecutorConfig::default()
    };
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, config);
    let sink = TestSink::default();

    let outcomes = executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Read", r#"{"note":"internal-id: 123456789"}"#)], &sink).await;
    assert!(outcomes[0].output.contains("internal-id: "));
    assert!(outcomes[0].output.contains("[REDACTED]"));
    assert!(!outcomes[0].output.contains("123456789"));
}

#[tokio::test]
async fn custom_block_message_template_is_used_when_set() {
    let registry = MockRegistry { mutating: false };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let mut policy = PermissionRuleEvaluator::new();
    policy.add_rule(PermissionRule::new(RuleSource::Policy, "Bash", RuleAction::Deny));
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let config = ToolExecutorConfig {
        block_message_template: Some("blocked: {tool_name} ({reason})".to_string()),
        ..ToolExecutorConfig::default()
    };
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, config);
    let sink = TestSink::default();

    let outcomes = executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Bash", "{}")], &sink).await;
    assert!(outcomes[0].output.starts_with("blocked: Bash ("));
}

#[tokio::test]
async fn mutating_tool_rejected_approval_skips_execution() {
    let registry = MockRegistry { mutating: true };
    let hook_registry = HookRegistry::new();
    let hooks = HookExecutor::new(&hook_registry);
    let policy = PermissionRuleEvaluator::new();
    let gate = ApprovalGate::new();
    let cb = breaker(3);
    let config = ToolExecutorConfig {
        approval_timeout: Duration::from_secs(5),
        ..ToolExecutorConfig::default()
    };
    let executor = ToolExecutor::new(&registry, &hooks, &policy, &gate, &cb, config);
    let sink = TestSink::default();

    let reject = async {
        loop {
            if let Some(Event::ApprovalRequest { id, .. }) = sink.find("approval_request") {
                gate.resolve(
                    &id,
                    ApprovalResponse {
                        approved: false,
                        message: "not today".into(),
                        modified_arguments: None,
                        decided_at: 0,
                    },
                )
                .unwrap();
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    };

    let (outcomes, ()) = tokio::join!(executor.execute_batch("s1", "a1", vec![ToolCall::new("1", "Write", "{}")], &sink), reject);
    assert!(outcomes[0].is_error);
    assert!(outcomes[0].output.contains("not today"));
}
