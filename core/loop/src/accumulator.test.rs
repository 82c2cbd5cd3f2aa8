use super::*;

#[test]
fn content_deltas_concatenate_in_order() {
    let mut acc = StreamAccumulator::new();
    acc.push_content("Hello, ");
    acc.push_content("world");
    assert_eq!(acc.effective_content(), "Hello, world");
}

#[test]
fn falls_back_to_thinking_when_content_is_empty() {
    let mut acc = StreamAccumulator::new();
    acc.push_thinking("reasoning about it");
    assert_eq!(acc.effective_content(), "reasoning about it");
}

#[test]
fn prefers_content_over_thinking_when_both_present() {
    let mut acc = StreamAccumulator::new();
    acc.push_thinking("scratch work");
    acc.push_content("final answer");
    assert_eq!(acc.effective_content(), "final answer");
}

#[test]
fn interleaved_tool_call_deltas_merge_by_index() {
    let mut acc = StreamAccumulator::new();
    acc.push_tool_call(ToolCallDelta {
        index: 0,
        id: Some("call_a".to_string()),
        name: Some("Read".to_string()),
        arguments_delta: "{\"path\":".to_string(),
        function: None,
    });
    acc.push_tool_call(ToolCallDelta {
        index: 1,
        id: Some("call_b".to_string()),
        name: Some("Write".to_string()),
        arguments_delta: "{\"path\":\"b\"}".to_string(),
        function: None,
    });
    acc.push_tool_call(ToolCallDelta {
        index: 0,
        id: None,
        name: None,
        arguments_delta: "\"a\"}".to_string(),
        function: None,
    });

    let calls = acc.tool_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].id, "call_a");
    assert_eq!(calls[0].arguments, "{\"path\":\"a\"}");
    assert_eq!(calls[1].id, "call_b");
}

#[test]
fn non_empty_tool_calls_override_stop_reason() {
    let mut acc = StreamAccumulator::new();
    acc.push_tool_call(ToolCallDelta {
        index: 0,
        id: Some("call_a".to_string()),
        name: Some("Read".to_string()),
        arguments_delta: "{}".to_string(),
        function: None,
    });
    assert_eq!(acc.effective_finish_reason(FinishReason::Stop), FinishReason::ToolCalls);
    assert_eq!(acc.effective_finish_reason(FinishReason::Length), FinishReason::ToolCalls);
}

#[test]
fn finish_reason_passes_through_without_tool_calls() {
    let acc = StreamAccumulator::new();
    assert_eq!(acc.effective_finish_reason(FinishReason::Stop), FinishReason::Stop);
}
