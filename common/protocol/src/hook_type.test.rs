use super::*;
use strum::IntoEnumIterator;

#[test]
fn as_str_is_snake_case() {
    assert_eq!(HookType::BeforeToolCall.as_str(), "before_tool_call");
    assert_eq!(HookType::OnError.as_str(), "on_error");
}

#[test]
fn closed_enumeration_has_fourteen_members() {
    assert_eq!(HookType::iter().count(), 14);
}

#[test]
fn serde_roundtrip() {
    let json = serde_json::to_string(&HookType::SessionCreate).unwrap();
    assert_eq!(json, "\"session_create\"");
    let parsed: HookType = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, HookType::SessionCreate);
}
