use super::*;

#[test]
fn new_sets_fields() {
    let call = ToolCall::new("call_1", "read_file", "{\"path\":\"a.rs\"}");
    assert_eq!(call.id, "call_1");
    assert_eq!(call.name, "read_file");
    assert!(call.function.is_none());
}

#[test]
fn default_delta_has_empty_arguments() {
    let delta = ToolCallDelta::default();
    assert_eq!(delta.index, 0);
    assert!(delta.arguments_delta.is_empty());
}
