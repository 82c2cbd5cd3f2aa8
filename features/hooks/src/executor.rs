//! Sequential, panic-isolated execution of a hook chain.

use agentcore_protocol::HookType;
use tracing::debug;
use tracing::warn;

use crate::context::HookContext;
use crate::error::hook_error::HandlerPanickedSnafu;
use crate::handler::HandlerBehavior;
use crate::registry::HookRegistry;
use crate::result::HandlerOutcome;
use crate::result::HookResult;

/// Runs the handlers registered for a [`HookType`] in priority order,
/// sequentially, folding each handler's output back into the context
/// before the next one runs.
///
/// A handler that panics is treated as a failed invocation (`continue_chain
/// = false`, carrying the panic message) rather than unwinding the caller;
/// the context as of just before the panicking call is preserved, since
/// `std::panic::catch_unwind` does not compose with `.await` points.
pub struct HookExecutor<'a> {
    registry: &'a HookRegistry,
}

impl<'a> HookExecutor<'a> {
    pub fn new(registry: &'a HookRegistry) -> Self {
        Self { registry }
    }

    /// Fires every enabled handler for `ctx.hook_type`, stopping early if a
    /// handler halts the chain. Returns the final context and the result of
    /// whichever handler produced the terminal outcome (or `cont()` if the
    /// chain ran to completion / had no handlers).
    pub async fn fire(&self, mut ctx: HookContext) -> (HookContext, HookResult) {
        let hook_type = match ctx.hook_type {
            Some(t) => t,
            None => return (ctx, HookResult::cont()),
        };

        let handlers = self.registry.get_handlers(hook_type);
        if handlers.is_empty() {
            return (ctx, HookResult::cont());
        }

        let mut last = HookResult::cont();
        for handler in handlers {
            let (next_ctx, outcome) = match &handler.behavior {
                HandlerBehavior::InProcess(f) => {
                    let f = f.clone();
                    let pre_call_ctx = ctx.clone();
                    match tokio::spawn(f(ctx)).await {
                        Ok((returned_ctx, outcome)) => (returned_ctx, outcome),
                        Err(join_err) => {
                            let panicked = HandlerPanickedSnafu {
                                id: handler.id.clone(),
                                message: join_err.to_string(),
                            }
                            .build();
                            warn!(handler = %handler.id, error = %panicked, "hook handler panicked");
                            (pre_call_ctx, HandlerOutcome::failed(HookResult::halt(panicked.to_string()), panicked.to_string()))
                        }
                    }
                }
                HandlerBehavior::External { script_path } => {
                    debug!(handler = %handler.id, script = %script_path, "external hook handlers run out of process");
                    (ctx, HandlerOutcome::ok(HookResult::cont()))
                }
            };

            ctx = next_ctx;
            last = fold_outcome(&mut ctx, outcome);
            if !last.continue_chain {
                break;
            }
        }

        (ctx, last)
    }
}

fn fold_outcome(ctx: &mut HookContext, outcome: HandlerOutcome) -> HookResult {
    let result = outcome.into_result();
    if result.modified {
        for (k, v) in &result.data {
            ctx.data.insert(k.clone(), v.clone());
        }
    }
    result
}

#[cfg(test)]
#[path = "executor.test.rs"]
mod tests;
