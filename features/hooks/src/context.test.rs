use super::*;
use serde_json::json;

#[test]
fn builder_sets_slots() {
    let ctx = HookContext::new(HookType::BeforeToolCall, 1_000)
        .with_session(json!({"id": "s1"}))
        .with_data("shared", json!("v"));
    assert_eq!(ctx.hook_type, Some(HookType::BeforeToolCall));
    assert_eq!(ctx.get_data("shared"), Some(&json!("v")));
    assert!(ctx.session.is_some());
}

#[test]
fn new_context_has_empty_data() {
    let ctx = HookContext::new(HookType::Startup, 0);
    assert!(ctx.data.is_empty());
    assert!(ctx.tool_call.is_none());
}
