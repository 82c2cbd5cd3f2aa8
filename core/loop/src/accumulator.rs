//! Accumulates one turn's streamed deltas into a finished assistant message.
//!
//! Tool-call deltas arrive interleaved by `index` because a provider may
//! stream several concurrent tool calls at once; this keeps one builder per
//! index and merges `arguments` string-wise until the stream ends.

use agentcore_protocol::FinishReason;
use agentcore_protocol::FunctionCall;
use agentcore_protocol::ToolCall;
use agentcore_protocol::ToolCallDelta;

#[derive(Debug, Default, Clone)]
struct ToolCallBuilder {
    id: String,
    name: String,
    arguments: String,
    function: Option<FunctionCall>,
}

/// Per-turn scratch space fed by [`agentcore_protocol::StreamEvent`] deltas.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    content: String,
    thinking: String,
    tool_calls: Vec<Option<ToolCallBuilder>>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_content(&mut self, delta: &str) {
        self.content.push_str(delta);
    }

    pub fn push_thinking(&mut self, delta: &str) {
        self.thinking.push_str(delta);
    }

    pub fn push_tool_call(&mut self, delta: ToolCallDelta) {
        if self.tool_calls.len() <= delta.index {
            self.tool_calls.resize(delta.index + 1, None);
        }
        let slot = self.tool_calls[delta.index].get_or_insert_with(ToolCallBuilder::default);
        if let Some(id) = delta.id {
            slot.id = id;
        }
        if let Some(name) = delta.name {
            slot.name = name;
        }
        slot.arguments.push_str(&delta.arguments_delta);
        if let Some(function) = delta.function {
            slot.function = Some(function);
        }
    }

    /// The content the assistant message should carry: `content` if
    /// non-empty, otherwise the thinking buffer (some models route all
    /// output to the reasoning channel).
    pub fn effective_content(&self) -> &str {
        if self.content.is_empty() { &self.thinking } else { &self.content }
    }

    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.tool_calls
            .iter()
            .flatten()
            .map(|b| ToolCall {
                id: b.id.clone(),
                name: b.name.clone(),
                arguments: b.arguments.clone(),
                function: b.function.clone(),
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.iter().flatten().next().is_some()
    }

    /// Non-empty accumulated tool calls always take precedence over a
    /// `stop`/`length` finish reason reported alongside them — some
    /// providers report `stop` even when they also emitted tool calls.
    pub fn effective_finish_reason(&self, reported: FinishReason) -> FinishReason {
        if self.has_tool_calls() { FinishReason::ToolCalls } else { reported }
    }
}

#[cfg(test)]
#[path = "accumulator.test.rs"]
mod tests;
