use super::*;

#[test]
fn output_under_the_ceiling_is_untouched() {
    let output = "short output";
    assert_eq!(truncate_tool_output(output, 1024), output);
}

#[test]
fn oversized_output_is_head_tail_truncated() {
    let body = "x".repeat(200_000);
    let result = truncate_tool_output(&body, 1_000);
    assert!(result.len() <= 1_200);
    assert!(result.contains("bytes truncated"));
}

#[test]
fn base64_data_uri_is_collapsed() {
    let body = "a".repeat(64);
    let input = format!("before data:image/png;base64,{body} after{}", "y".repeat(2_000));
    let result = truncate_tool_output(&input, 1_000);
    assert!(result.contains("[base64 data removed, 64 bytes]"));
    assert!(!result.contains(&body));
}

#[test]
fn short_base64_looking_strings_are_left_alone() {
    let input = format!("data:image/png;base64,{}", "a".repeat(10));
    assert_eq!(truncate_tool_output(&input, 1_000), input);
}

#[test]
fn hex_runs_are_collapsed() {
    let hex = "a1b2".repeat(100);
    let input = format!("prefix {hex} suffix {}", "z".repeat(2_000));
    let result = truncate_tool_output(&input, 1_000);
    assert!(result.contains("[hex data removed, 400 bytes]"));
}
