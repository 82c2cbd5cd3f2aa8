use super::*;
use std::time::Duration;

#[tokio::test]
async fn resolve_delivers_the_response_to_the_waiter() {
    let gate = ApprovalGate::new();
    let (pending, rx) = gate.create_request("Bash", "{}", "ask rule matched", "s1", Duration::from_secs(60), 1_000);
    assert_eq!(pending.tool_name, "Bash");
    assert_eq!(pending.expires_at, 1_060);

    let id = pending.id.clone();
    gate.resolve(
        &id,
        ApprovalResponse {
            approved: true,
            message: "ok".into(),
            modified_arguments: None,
            decided_at: 1_010,
        },
    )
    .unwrap();

    let response = ApprovalGate::await_decision(&id, rx, Duration::from_secs(5)).await.unwrap();
    assert!(response.approved);
}

#[test]
fn resolve_unknown_id_is_an_error() {
    let gate = ApprovalGate::new();
    let response = ApprovalResponse {
        approved: false,
        message: "n/a".into(),
        modified_arguments: None,
        decided_at: 0,
    };
    assert!(gate.resolve("missing", response).is_err());
}

#[tokio::test]
async fn await_decision_times_out_if_never_resolved() {
    let gate = ApprovalGate::new();
    let (pending, rx) = gate.create_request("Bash", "{}", "ask", "s1", Duration::from_secs(60), 0);
    let result = ApprovalGate::await_decision(&pending.id, rx, Duration::from_millis(10)).await;
    assert!(result.is_err());
}

#[test]
fn expire_removes_the_pending_sender() {
    let gate = ApprovalGate::new();
    let (pending, _rx) = gate.create_request("Bash", "{}", "ask", "s1", Duration::from_secs(60), 0);
    gate.expire(&pending.id, pending.expires_at).unwrap();
    assert!(gate.expire(&pending.id, pending.expires_at).is_err());
}
