//! Handler identity, ordering, and behavior.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use agentcore_protocol::HookType;

use crate::context::HookContext;
use crate::result::HandlerOutcome;

/// A handler's in-process implementation: takes ownership of the context
/// (so a panicking invocation can be isolated behind a spawned task — see
/// the executor), returns it back alongside the outcome.
pub type HandlerFuture = Pin<Box<dyn Future<Output = (HookContext, HandlerOutcome)> + Send>>;
pub type HandlerFn = Arc<dyn Fn(HookContext) -> HandlerFuture + Send + Sync>;

/// Either an in-process handler function or a reference to an external
/// script invoked out-of-process by the executor.
#[derive(Clone)]
pub enum HandlerBehavior {
    InProcess(HandlerFn),
    External { script_path: String },
}

impl fmt::Debug for HandlerBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerBehavior::InProcess(_) => f.debug_tuple("InProcess").field(&"<fn>").finish(),
            HandlerBehavior::External { script_path } => {
                f.debug_struct("External").field("script_path", script_path).finish()
            }
        }
    }
}

/// A registered hook implementation.
///
/// Immutable after registration except for `enabled`.
#[derive(Debug, Clone)]
pub struct Handler {
    /// Unique within one hook type.
    pub id: String,
    pub hook_type: HookType,
    /// `"_builtin"` or a skill identifier.
    pub source: String,
    /// Higher runs first; ties broken by registration order.
    pub priority: i32,
    pub enabled: bool,
    pub behavior: HandlerBehavior,
}

impl Handler {
    pub fn in_process<F, Fut>(
        id: impl Into<String>,
        hook_type: HookType,
        source: impl Into<String>,
        priority: i32,
        f: F,
    ) -> Self
    where
        F: Fn(HookContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = (HookContext, HandlerOutcome)> + Send + 'static,
    {
        Self {
            id: id.into(),
            hook_type,
            source: source.into(),
            priority,
            enabled: true,
            behavior: HandlerBehavior::InProcess(Arc::new(move |ctx| Box::pin(f(ctx)))),
        }
    }

    pub fn external(
        id: impl Into<String>,
        hook_type: HookType,
        source: impl Into<String>,
        priority: i32,
        script_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            hook_type,
            source: source.into(),
            priority,
            enabled: true,
            behavior: HandlerBehavior::External {
                script_path: script_path.into(),
            },
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[cfg(test)]
#[path = "handler.test.rs"]
mod tests;
