use super::*;

#[test]
fn finish_reason_serializes_snake_case() {
    let json = serde_json::to_string(&FinishReason::ToolCalls).unwrap();
    assert_eq!(json, "\"tool_calls\"");
}

#[test]
fn chat_request_round_trips() {
    let req = ChatRequest {
        model: "gpt-5".into(),
        messages: vec![ChatMessage {
            role: "user".into(),
            content: "hi".into(),
            tool_calls: vec![],
            tool_call_id: None,
        }],
        tools: vec![],
        temperature: 0.7,
        max_tokens: 8000,
        stream: true,
        conversation_id: "s1".into(),
    };
    let json = serde_json::to_string(&req).unwrap();
    let parsed: ChatRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.model, "gpt-5");
    assert_eq!(parsed.messages.len(), 1);
}
