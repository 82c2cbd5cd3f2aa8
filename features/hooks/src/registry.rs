//! The set of handlers registered for each [`HookType`].

use std::collections::HashMap;

use agentcore_protocol::HookType;
use snafu::ensure;

use crate::error::Result;
use crate::error::hook_error::DuplicateHandlerSnafu;
use crate::error::hook_error::EmptyHandlerIdSnafu;
use crate::error::hook_error::HandlerNotFoundSnafu;
use crate::handler::Handler;

/// Handlers for one [`HookType`], kept sorted priority-descending with
/// registration order as the tiebreak.
#[derive(Debug, Default)]
struct Bucket {
    handlers: Vec<Handler>,
}

impl Bucket {
    fn insert(&mut self, handler: Handler) {
        let pos = self
            .handlers
            .iter()
            .position(|h| h.priority < handler.priority)
            .unwrap_or(self.handlers.len());
        self.handlers.insert(pos, handler);
    }
}

/// All handlers across all hook types.
///
/// Registration is append-only by priority; nothing is re-sorted on read.
#[derive(Debug, Default)]
pub struct HookRegistry {
    buckets: HashMap<HookType, Bucket>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler. Rejects an empty id or one already in use for
    /// this handler's hook type.
    pub fn register(&mut self, handler: Handler) -> Result<()> {
        ensure!(!handler.id.is_empty(), EmptyHandlerIdSnafu);
        let bucket = self.buckets.entry(handler.hook_type).or_default();
        ensure!(
            !bucket.handlers.iter().any(|h| h.id == handler.id),
            DuplicateHandlerSnafu { id: handler.id.clone() }
        );
        bucket.insert(handler);
        Ok(())
    }

    /// Removes a handler by id, searching every hook type.
    pub fn unregister(&mut self, id: &str) -> Result<()> {
        for bucket in self.buckets.values_mut() {
            if let Some(pos) = bucket.handlers.iter().position(|h| h.id == id) {
                bucket.handlers.remove(pos);
                return Ok(());
            }
        }
        HandlerNotFoundSnafu { id: id.to_string() }.fail()
    }

    /// Enabled handlers for `hook_type`, priority-descending.
    pub fn get_handlers(&self, hook_type: HookType) -> Vec<&Handler> {
        self.buckets
            .get(&hook_type)
            .map(|b| b.handlers.iter().filter(|h| h.enabled).collect())
            .unwrap_or_default()
    }

    /// All handlers for `hook_type`, including disabled ones.
    pub fn get_all_handlers(&self, hook_type: HookType) -> Vec<&Handler> {
        self.buckets.get(&hook_type).map(|b| b.handlers.iter().collect()).unwrap_or_default()
    }

    pub fn has_handlers(&self, hook_type: HookType) -> bool {
        self.buckets.get(&hook_type).is_some_and(|b| b.handlers.iter().any(|h| h.enabled))
    }

    pub fn count(&self, hook_type: HookType) -> usize {
        self.buckets.get(&hook_type).map(|b| b.handlers.len()).unwrap_or(0)
    }

    /// Hook types that currently have at least one handler registered.
    pub fn list_types(&self) -> Vec<HookType> {
        self.buckets.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
