use super::*;

#[test]
fn kind_matches_serde_tag() {
    let event = Event::ToolResult {
        id: "1".into(),
        name: "read_file".into(),
        output: "ok".into(),
        is_error: false,
        duration_ms: 12,
    };
    assert_eq!(event.kind(), "tool_result");

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "tool_result");
}

#[test]
fn heartbeat_serializes_with_tag_only() {
    let json = serde_json::to_value(Event::Heartbeat).unwrap();
    assert_eq!(json["type"], "heartbeat");
}

#[test]
fn done_carries_usage() {
    let event = Event::Done {
        usage: Usage::new(10, 5),
    };
    assert_eq!(event.kind(), "done");
}
