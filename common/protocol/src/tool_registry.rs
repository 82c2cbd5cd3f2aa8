//! The tool-registry capability consumed by the tool executor.
//!
//! Only `Execute`/`List`/`ToProviderTools` are consumed; how tools are
//! implemented or registered is out of scope for this crate.

use async_trait::async_trait;
use serde_json::Value;

use crate::model::ToolSchema;

/// The outcome of one tool execution.
#[derive(Debug, Clone)]
pub struct ToolExecResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolExecResult {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// Registry of available tools, consumed only through this interface.
#[async_trait]
pub trait ToolRegistry: Send + Sync {
    /// Execute one tool call by name with a parsed JSON argument map.
    async fn execute(
        &self,
        ctx_session_id: &str,
        name: &str,
        args: &Value,
    ) -> Result<ToolExecResult, Box<dyn std::error::Error + Send + Sync>>;

    /// List all tools this registry knows about.
    fn list(&self) -> Vec<ToolSchema>;

    /// Project the registry's tools into the model-provider's schema shape.
    fn to_provider_tools(&self) -> Vec<ToolSchema> {
        self.list()
    }

    /// Static read-only/mutating classification, consulted by the policy
    /// gate only when no rule decided. Conservative by default: an unknown
    /// tool is treated as mutating.
    fn is_mutating(&self, _name: &str) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "tool_registry.test.rs"]
mod tests;
