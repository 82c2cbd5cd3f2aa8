//! The output-stream capability consumed by the run loop and tool executor.

use async_trait::async_trait;

use crate::event::Event;

/// Where a run's [`Event`]s go. Implementations live entirely outside this
/// crate — an SSE stream, a websocket, a test collector.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

#[cfg(test)]
#[path = "event_sink.test.rs"]
mod tests;
