use super::*;

#[test]
fn default_matches_documented_defaults() {
    let config = RunnerConfig::default();
    assert_eq!(config.max_iterations, 10);
    assert_eq!(config.max_tokens, 8_000);
    assert_eq!(config.max_messages, 100);
    assert_eq!(config.timeout, Duration::from_secs(300));
    assert!(config.stream_output);
    assert_eq!(config.temperature, 0.7);
    assert_eq!(config.circuit_breaker_threshold, 3);
}

#[test]
fn negative_style_zero_iterations_clamps_to_one() {
    let config = RunnerConfig::new(0, 8_000, 100, 300, true, 0.7, "");
    assert_eq!(config.max_iterations, 1);
}

#[test]
fn over_range_temperature_clamps_to_two() {
    let config = RunnerConfig::new(10, 8_000, 100, 300, true, 5.0, "");
    assert_eq!(config.temperature, 2.0);
}

#[test]
fn in_range_values_pass_through_unchanged() {
    let config = RunnerConfig::new(5, 4_000, 50, 120, false, 1.0, "be terse");
    assert_eq!(config.max_iterations, 5);
    assert_eq!(config.max_tokens, 4_000);
    assert_eq!(config.system_prompt, "be terse");
    assert!(!config.stream_output);
}
