use super::*;

#[test]
fn accumulate_sums_all_fields() {
    let mut total = Usage::new(10, 5);
    total.accumulate(Usage::new(3, 7));
    assert_eq!(total.prompt_tokens, 13);
    assert_eq!(total.completion_tokens, 12);
    assert_eq!(total.total_tokens, 25);
}

#[test]
fn new_computes_total() {
    let usage = Usage::new(100, 50);
    assert_eq!(usage.total_tokens, 150);
}
