use super::*;

#[test]
fn approval_expired_maps_to_timeout() {
    let err = policy_error::ApprovalExpiredSnafu {
        id: "a1".to_string(),
        expires_at: 1_000_i64,
    }
    .build();
    assert_eq!(err.status_code(), StatusCode::ApprovalTimeout);
    assert!(err.to_string().contains("a1"));
}

#[test]
fn channel_closed_maps_to_internal() {
    let err = policy_error::ApprovalChannelClosedSnafu {}.build();
    assert_eq!(err.status_code(), StatusCode::Internal);
}

#[test]
fn timed_out_maps_to_approval_timeout() {
    let err = policy_error::ApprovalTimedOutSnafu { id: "a1".to_string() }.build();
    assert_eq!(err.status_code(), StatusCode::ApprovalTimeout);
}
