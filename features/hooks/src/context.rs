//! Per-firing scratch space shared across one handler chain invocation.

use std::collections::HashMap;

use agentcore_protocol::HookType;
use agentcore_protocol::ToolCall;
use serde_json::Value;

/// Scratch space for one hook firing.
///
/// A handler may read any populated slot and may write `data`; it must not
/// null out a slot another handler populated. The context itself must not
/// be shared across firings — each `fire()` call gets its own instance.
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    pub hook_type: Option<HookType>,
    pub timestamp: i64,

    pub session: Option<Value>,
    pub message: Option<Value>,
    pub tool_call: Option<ToolCall>,
    pub response: Option<Value>,
    pub memory: Option<Value>,
    pub prompt: Option<Value>,
    pub error: Option<String>,

    pub data: HashMap<String, Value>,
}

impl HookContext {
    pub fn new(hook_type: HookType, timestamp: i64) -> Self {
        Self {
            hook_type: Some(hook_type),
            timestamp,
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session: Value) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_message(mut self, message: Value) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_tool_call(mut self, tool_call: ToolCall) -> Self {
        self.tool_call = Some(tool_call);
        self
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}

#[cfg(test)]
#[path = "context.test.rs"]
mod tests;
