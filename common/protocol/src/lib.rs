//! Shared data model and external-capability interfaces for the agent
//! execution core: the event union emitted to callers, tool-call and usage
//! types, the closed hook-type enumeration, and the consumed
//! model/tool-registry/session-store contracts.

pub mod event;
pub mod event_sink;
pub mod hook_type;
pub mod model;
pub mod session_store;
pub mod tool_call;
pub mod tool_registry;
pub mod usage;

pub use event::Event;
pub use event_sink::EventSink;
pub use hook_type::HookType;
pub use model::ChatMessage;
pub use model::ChatRequest;
pub use model::ChatResponse;
pub use model::FinishReason;
pub use model::ModelProvider;
pub use model::StreamEvent;
pub use model::ToolSchema;
pub use session_store::CachedSession;
pub use session_store::SessionStore;
pub use tool_call::FunctionCall;
pub use tool_call::ToolCall;
pub use tool_call::ToolCallDelta;
pub use tool_registry::ToolExecResult;
pub use tool_registry::ToolRegistry;
pub use usage::Usage;
