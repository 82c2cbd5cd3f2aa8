//! Tool-call data model, as emitted by a model and as accumulated from a
//! stream of deltas.

use serde::Deserialize;
use serde::Serialize;

/// Legacy nested `function{name,arguments}` representation some providers
/// still emit alongside (or instead of) the flattened `name`/`arguments`
/// fields on [`ToolCall`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// A tool call requested by the model, fully accumulated (post-stream).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    /// Raw arguments, typically JSON. May have been assembled from many
    /// streamed deltas; callers parse it themselves (see the tool executor).
    pub arguments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionCall>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
            function: None,
        }
    }
}

/// One streamed fragment of a tool call, keyed by `index` so interleaved
/// deltas from multiple concurrent tool calls can be demultiplexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallDelta {
    pub index: usize,
    pub id: Option<String>,
    pub name: Option<String>,
    pub arguments_delta: String,
    pub function: Option<FunctionCall>,
}

#[cfg(test)]
#[path = "tool_call.test.rs"]
mod tests;
