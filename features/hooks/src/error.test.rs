use super::*;

#[test]
fn duplicate_handler_message_includes_id() {
    let err = hook_error::DuplicateHandlerSnafu { id: "x".to_string() }.build();
    assert!(err.to_string().contains('x'));
    assert_eq!(err.status_code(), StatusCode::InvalidArguments);
}

#[test]
fn handler_panicked_maps_to_internal() {
    let err = hook_error::HandlerPanickedSnafu {
        id: "h1".to_string(),
        message: "boom".to_string(),
    }
    .build();
    assert_eq!(err.status_code(), StatusCode::Internal);
}
