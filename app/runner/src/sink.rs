//! Adapts a bounded `mpsc` channel into the run loop's [`EventSink`]
//! capability: the event type the composition root hands back to callers of
//! [`crate::Runner::run`].

use agentcore_protocol::Event;
use agentcore_protocol::EventSink;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

/// Forwards every emitted event onto a bounded channel. A blocking send is
/// raced against the run's cancellation so a consumer that stopped reading
/// cannot hang the producer; `Heartbeat` uses a non-blocking `try_send`
/// instead, since dropping a heartbeat under backpressure is harmless.
pub struct ChannelEventSink {
    tx: mpsc::Sender<Event>,
    cancel: tokio_util::sync::CancellationToken,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<Event>, cancel: tokio_util::sync::CancellationToken) -> Self {
        Self { tx, cancel }
    }
}

#[async_trait]
impl EventSink for ChannelEventSink {
    async fn emit(&self, event: Event) {
        if matches!(event, Event::Heartbeat) {
            if self.tx.try_send(event).is_err() {
                warn!("dropped a heartbeat event under backpressure");
            }
            return;
        }

        tokio::select! {
            _ = self.cancel.cancelled() => {}
            result = self.tx.send(event) => {
                if result.is_err() {
                    warn!("event receiver dropped; remaining events for this run are discarded");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "sink.test.rs"]
mod tests;
