use super::*;
use std::sync::Mutex;

struct Collector(Mutex<Vec<Event>>);

#[async_trait]
impl EventSink for Collector {
    async fn emit(&self, event: Event) {
        self.0.lock().expect("mutex poisoned").push(event);
    }
}

#[tokio::test]
async fn emit_appends_to_the_sink() {
    let sink = Collector(Mutex::new(Vec::new()));
    sink.emit(Event::Heartbeat).await;
    assert_eq!(sink.0.lock().expect("mutex poisoned").len(), 1);
}
