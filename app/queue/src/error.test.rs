use super::*;
use crate::error::run_queue_error::SessionBusySnafu;
use agentcore_error::ErrorExt;
use agentcore_error::StatusCode;

#[test]
fn session_busy_maps_to_queue_full() {
    let err = SessionBusySnafu { session_id: "s1", depth: 10u32 }.build();
    assert_eq!(err.status_code(), StatusCode::QueueFull);
    assert!(err.to_string().contains("s1"));
}
