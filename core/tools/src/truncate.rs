//! Shrinks oversized tool output before it is scrubbed and handed back to
//! the model.

use regex::Regex;
use std::sync::LazyLock;

static BASE64_DATA_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"data:[^;,\s]+;base64,([A-Za-z0-9+/=]{64,})").expect("valid regex"));

static HEX_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9a-fA-F]{256,}").expect("valid regex"));

/// Applies the three-stage shrink procedure if `output` exceeds `max_bytes`:
/// collapse base64 data URIs, then contiguous hex runs, then a head/tail
/// keep-window with an interstitial marker.
pub fn truncate_tool_output(output: &str, max_bytes: usize) -> String {
    if output.len() <= max_bytes {
        return output.to_string();
    }

    let mut shrunk = replace_base64_data_uris(output);
    if shrunk.len() > max_bytes {
        shrunk = replace_hex_runs(&shrunk);
    }
    if shrunk.len() > max_bytes {
        shrunk = keep_head_and_tail(&shrunk, max_bytes);
    }
    shrunk
}

fn replace_base64_data_uris(input: &str) -> String {
    BASE64_DATA_URI
        .replace_all(input, |caps: &regex::Captures| format!("[base64 data removed, {} bytes]", caps[1].len()))
        .into_owned()
}

fn replace_hex_runs(input: &str) -> String {
    HEX_RUN
        .replace_all(input, |caps: &regex::Captures| format!("[hex data removed, {} bytes]", caps[0].len()))
        .into_owned()
}

fn keep_head_and_tail(input: &str, max_bytes: usize) -> String {
    let head_len = floor_char_boundary(input, max_bytes * 2 / 5);
    let tail_start_target = input.len().saturating_sub(max_bytes * 2 / 5);
    let tail_start = ceil_char_boundary(input, tail_start_target);

    if tail_start <= head_len {
        return input.to_string();
    }

    let truncated_bytes = tail_start - head_len;
    format!(
        "{}[... {truncated_bytes} bytes truncated ...]{}",
        &input[..head_len],
        &input[tail_start..]
    )
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut idx = index.min(s.len());
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(s: &str, index: usize) -> usize {
    let mut idx = index.min(s.len());
    while idx < s.len() && !s.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
#[path = "truncate.test.rs"]
mod tests;
