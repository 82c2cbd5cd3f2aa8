use super::*;

#[test]
fn in_range_value_is_unchanged_and_unrecorded() {
    let mut v = Validator::new();
    let result = v.clamp_u32("max_iterations", 10, 1..=100);
    assert_eq!(result, 10);
    assert!(v.is_valid());
}

#[test]
fn negative_style_underflow_is_clamped_to_lower_bound() {
    let mut v = Validator::new();
    let result = v.clamp_u32("max_iterations", 0, 1..=100);
    assert_eq!(result, 1);
    assert!(!v.is_valid());
    assert_eq!(v.corrections().len(), 1);
}

#[test]
fn over_range_is_clamped_to_upper_bound() {
    let mut v = Validator::new();
    let result = v.clamp_u32("max_tokens", 1_000_000, 1..=200_000);
    assert_eq!(result, 200_000);
}

#[test]
fn temperature_clamps_as_float() {
    let mut v = Validator::new();
    let result = v.clamp_f32("temperature", 3.5, 0.0..=2.0);
    assert_eq!(result, 2.0);
}
