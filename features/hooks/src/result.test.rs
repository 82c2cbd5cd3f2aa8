use super::*;

#[test]
fn cont_is_the_default() {
    let result = HookResult::default();
    assert!(result.continue_chain);
    assert!(!result.modified);
}

#[test]
fn halt_carries_error_and_stops() {
    let result = HookResult::halt("boom");
    assert!(!result.continue_chain);
    assert_eq!(result.error.as_deref(), Some("boom"));
}

#[test]
fn outcome_without_result_defaults_to_continue() {
    let outcome = HandlerOutcome::default();
    assert!(outcome.into_result().continue_chain);
}

#[test]
fn outcome_with_error_but_continuing_keeps_result_continue() {
    let outcome = HandlerOutcome::failed(HookResult::cont(), "transient");
    assert_eq!(outcome.error.as_deref(), Some("transient"));
    assert!(outcome.result.as_ref().unwrap().continue_chain);
}
