//! The outcome of one handler invocation, and of a whole chain firing.

use std::collections::HashMap;

use serde_json::Value;

/// Outcome of one handler.
#[derive(Debug, Clone)]
pub struct HookResult {
    /// If false, the remaining handlers for this firing are skipped.
    pub continue_chain: bool,
    /// If true, `data` carries replacement values merged back into the
    /// shared context.
    pub modified: bool,
    pub data: HashMap<String, Value>,
    /// Attached when `continue_chain=false` due to a hard failure.
    pub error: Option<String>,
}

impl HookResult {
    /// The default outcome: keep going, nothing modified.
    pub fn cont() -> Self {
        Self {
            continue_chain: true,
            modified: false,
            data: HashMap::new(),
            error: None,
        }
    }

    /// Stop the chain here, optionally with an explanatory error.
    pub fn halt(error: impl Into<String>) -> Self {
        Self {
            continue_chain: false,
            modified: false,
            data: HashMap::new(),
            error: Some(error.into()),
        }
    }

    /// Keep going, merging `data` into the shared context.
    pub fn with_data(data: HashMap<String, Value>) -> Self {
        Self {
            continue_chain: true,
            modified: true,
            data,
            error: None,
        }
    }
}

impl Default for HookResult {
    fn default() -> Self {
        Self::cont()
    }
}

/// What a single handler invocation returned: an optional [`HookResult`]
/// (defaults to `HookResult::cont()` if absent) paired with an optional
/// error that is only meaningful when the result's `continue_chain` is
/// false — mirrors the (result, err) return convention handlers use.
#[derive(Debug, Clone, Default)]
pub struct HandlerOutcome {
    pub result: Option<HookResult>,
    pub error: Option<String>,
}

impl HandlerOutcome {
    pub fn ok(result: HookResult) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(result: HookResult, error: impl Into<String>) -> Self {
        Self {
            result: Some(result),
            error: Some(error.into()),
        }
    }

    pub fn into_result(self) -> HookResult {
        self.result.unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "result.test.rs"]
mod tests;
