//! The closed set of lifecycle points the run loop fires hooks at.
//!
//! Kept in the shared protocol crate (rather than the hooks crate itself)
//! because other crates — the run loop, the tool executor, the run queue —
//! need to name a `HookType` to fire against without depending on the full
//! hook registry/executor machinery.

use serde::Deserialize;
use serde::Serialize;
use strum::AsRefStr;
use strum::EnumIter;

/// A lifecycle point a hook can be registered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HookType {
    BeforeMessage,
    AfterMessage,
    BeforeToolCall,
    AfterToolCall,
    SessionCreate,
    SessionEnd,
    Startup,
    Shutdown,
    BeforeResponse,
    AfterResponse,
    BeforeMemoryWrite,
    AfterMemoryWrite,
    PromptBuild,
    OnError,
}

impl HookType {
    pub fn as_str(&self) -> &'static str {
        self.as_ref()
    }
}

impl std::fmt::Display for HookType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "hook_type.test.rs"]
mod tests;
