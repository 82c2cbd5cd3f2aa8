//! Lifecycle hook registry and sequential chain executor.

mod context;
mod error;
mod executor;
mod handler;
mod registry;
mod result;

pub use context::HookContext;
pub use error::HookError;
pub use error::Result;
pub use error::hook_error;
pub use executor::HookExecutor;
pub use handler::Handler;
pub use handler::HandlerBehavior;
pub use handler::HandlerFn;
pub use handler::HandlerFuture;
pub use registry::HookRegistry;
pub use result::HandlerOutcome;
pub use result::HookResult;
