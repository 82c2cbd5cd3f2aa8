//! The model-provider capability consumed by the run loop.
//!
//! The wire format, authentication, and model routing are explicitly out of
//! scope for this crate (see the top-level design notes); only the streaming
//! contract below is consumed.

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::tool_call::ToolCallDelta;
use crate::usage::Usage;

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
}

/// One chat message in the request transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<crate::tool_call::ToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A tool schema advertised to the model, as produced by the tool registry's
/// `ToProviderTools()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub tools: Vec<ToolSchema>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
    pub conversation_id: String,
}

/// A non-streaming chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    pub tool_calls: Vec<crate::tool_call::ToolCall>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

/// One event on a model's streaming response.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    Content { delta: String },
    Thinking { delta: String },
    ToolCall(ToolCallDelta),
    ToolCallUpdate {
        id: String,
        name: String,
        status: String,
        arguments: String,
    },
    Done {
        finish_reason: FinishReason,
        usage: Usage,
    },
    Error { message: String },
}

/// Streaming/non-streaming model transport, consumed via this interface
/// only — implementations live entirely outside this crate.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Stream a chat completion, yielding deltas as they arrive.
    async fn stream(
        &self,
        request: ChatRequest,
    ) -> Result<tokio::sync::mpsc::Receiver<StreamEvent>, Box<dyn std::error::Error + Send + Sync>>;

    /// Non-streaming chat completion.
    async fn chat(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponse, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
#[path = "model.test.rs"]
mod tests;
