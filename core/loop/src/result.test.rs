use super::*;

#[test]
fn completed_outcome_is_not_an_error() {
    let outcome = RunOutcome::completed(3, Usage::new(100, 50));
    assert!(!outcome.is_error());
    assert_eq!(outcome.stop_reason, StopReason::ModelStopSignal);
}

#[test]
fn error_outcome_carries_its_message() {
    let outcome = RunOutcome::error(1, Usage::default(), "boom");
    assert!(outcome.is_error());
    match outcome.stop_reason {
        StopReason::Error { message } => assert_eq!(message, "boom"),
        other => panic!("expected Error, got {other:?}"),
    }
}

#[test]
fn max_iterations_outcome_is_distinguishable_from_cancelled() {
    let a = RunOutcome::max_iterations_reached(10, Usage::default());
    let b = RunOutcome::cancelled(2, Usage::default());
    assert_ne!(a.stop_reason, b.stop_reason);
}
