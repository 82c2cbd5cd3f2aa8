use super::*;

#[tokio::test]
async fn content_event_is_delivered() {
    let (tx, mut rx) = mpsc::channel(4);
    let sink = ChannelEventSink::new(tx, tokio_util::sync::CancellationToken::new());

    sink.emit(Event::Content { delta: "hi".to_string() }).await;

    match rx.recv().await {
        Some(Event::Content { delta }) => assert_eq!(delta, "hi"),
        other => panic!("expected Content, got {other:?}"),
    }
}

#[tokio::test]
async fn heartbeat_is_dropped_silently_when_the_channel_is_full() {
    let (tx, rx) = mpsc::channel(1);
    let sink = ChannelEventSink::new(tx, tokio_util::sync::CancellationToken::new());

    sink.emit(Event::Heartbeat).await;
    sink.emit(Event::Heartbeat).await;

    drop(rx);
}

#[tokio::test]
async fn cancelled_token_unblocks_a_pending_send() {
    let (tx, rx) = mpsc::channel(1);
    let cancel = tokio_util::sync::CancellationToken::new();
    let sink = ChannelEventSink::new(tx, cancel.clone());
    // fill the one slot so the next send would otherwise block
    sink.emit(Event::Content { delta: "first".to_string() }).await;
    cancel.cancel();

    sink.emit(Event::Content { delta: "second".to_string() }).await;

    drop(rx);
}
