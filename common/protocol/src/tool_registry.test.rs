use super::*;

#[test]
fn ok_result_is_not_error() {
    let result = ToolExecResult::ok("done");
    assert!(!result.is_error);
    assert_eq!(result.content, "done");
}

#[test]
fn error_result_is_marked() {
    let result = ToolExecResult::error("boom");
    assert!(result.is_error);
}
