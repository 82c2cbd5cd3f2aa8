use super::*;
use agentcore_protocol::ToolCall;
use std::time::Duration;

#[test]
fn arm_twice_without_checking_fails() {
    let controller = PauseController::new(Duration::from_secs(60));
    controller.arm("s1").unwrap();
    let err = controller.arm("s1").unwrap_err();
    assert!(err.to_string().contains("already paused"));
}

#[test]
fn check_without_arming_returns_none() {
    let controller = PauseController::new(Duration::from_secs(60));
    assert!(controller.check("s1", vec![], 0).is_none());
}

#[test]
fn status_for_unknown_session_is_not_paused() {
    let controller = PauseController::new(Duration::from_secs(60));
    let status = controller.status("unknown");
    assert!(!status.paused);
    assert!(status.pending_tools.is_empty());
}

#[tokio::test]
async fn resume_delivers_user_input_through_the_rendezvous() {
    let controller = PauseController::new(Duration::from_secs(60));
    controller.arm("s1").unwrap();
    let pending = vec![ToolCall::new("1", "Bash", "{}")];
    let rx = controller.check("s1", pending, 100).expect("should be armed");

    let status = controller.status("s1");
    assert!(status.paused);
    assert_eq!(status.paused_at, Some(100));
    assert_eq!(status.pending_tools.len(), 1);

    controller.resume("s1", Some("go ahead".to_string())).unwrap();
    match controller.await_resume(rx).await {
        ResumeOutcome::Resumed { user_input } => assert_eq!(user_input, Some("go ahead".to_string())),
        ResumeOutcome::TimedOut => panic!("expected a resumed outcome"),
    }
}

#[tokio::test]
async fn resume_without_a_pending_rendezvous_fails() {
    let controller = PauseController::new(Duration::from_secs(60));
    let err = controller.resume("s1", None).unwrap_err();
    assert!(err.to_string().contains("no pending pause"));
}

#[tokio::test]
async fn unanswered_rendezvous_times_out() {
    let controller = PauseController::new(Duration::from_millis(20));
    controller.arm("s1").unwrap();
    let rx = controller.check("s1", vec![], 0).expect("should be armed");
    match controller.await_resume(rx).await {
        ResumeOutcome::TimedOut => {}
        ResumeOutcome::Resumed { .. } => panic!("expected a timeout"),
    }
}

#[test]
fn cleanup_is_idempotent() {
    let controller = PauseController::new(Duration::from_secs(60));
    controller.arm("s1").unwrap();
    controller.cleanup("s1");
    controller.cleanup("s1");
    assert!(!controller.status("s1").paused);
}
