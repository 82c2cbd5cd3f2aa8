use super::*;
use crate::error::pause_controller_error::AlreadyPausedSnafu;
use crate::error::pause_controller_error::NotPausedSnafu;
use crate::error::run_loop_error::HookInterruptedSnafu;
use crate::error::run_loop_error::MaxIterationsSnafu;
use crate::error::run_loop_error::SessionNotFoundSnafu;
use agentcore_error::ErrorExt;
use agentcore_error::StatusCode;

#[test]
fn max_iterations_maps_to_max_iterations_status() {
    let err = MaxIterationsSnafu { max: 10u32 }.build();
    assert_eq!(err.status_code(), StatusCode::MaxIterations);
    assert!(err.to_string().contains("10"));
}

#[test]
fn hook_interrupted_maps_to_cancelled() {
    let err = HookInterruptedSnafu.build();
    assert_eq!(err.status_code(), StatusCode::Cancelled);
}

#[test]
fn session_not_found_includes_id_in_message() {
    let err = SessionNotFoundSnafu { session_id: "s1" }.build();
    assert!(err.to_string().contains("s1"));
}

#[test]
fn already_paused_maps_to_invalid_arguments() {
    let err = AlreadyPausedSnafu { session_id: "s1" }.build();
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
}

#[test]
fn not_paused_maps_to_invalid_arguments() {
    let err = NotPausedSnafu { session_id: "s1" }.build();
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
}
