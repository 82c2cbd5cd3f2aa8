use super::*;

#[test]
fn trips_after_threshold_blocks() {
    let mut breaker = CircuitBreaker::new(3);
    assert!(!breaker.is_tripped("s1", "Bash"));
    breaker.record_block("s1", "Bash");
    breaker.record_block("s1", "Bash");
    assert!(!breaker.is_tripped("s1", "Bash"));
    breaker.record_block("s1", "Bash");
    assert!(breaker.is_tripped("s1", "Bash"));
}

#[test]
fn counters_are_scoped_per_session_and_tool() {
    let mut breaker = CircuitBreaker::new(1);
    breaker.record_block("s1", "Bash");
    assert!(breaker.is_tripped("s1", "Bash"));
    assert!(!breaker.is_tripped("s2", "Bash"));
    assert!(!breaker.is_tripped("s1", "Edit"));
}

#[test]
fn zero_threshold_never_trips() {
    let mut breaker = CircuitBreaker::new(0);
    breaker.record_block("s1", "Bash");
    assert!(!breaker.is_tripped("s1", "Bash"));
}

#[test]
fn reset_clears_a_single_counter() {
    let mut breaker = CircuitBreaker::new(1);
    breaker.record_block("s1", "Bash");
    breaker.reset("s1", "Bash");
    assert!(!breaker.is_tripped("s1", "Bash"));
}

#[test]
fn reset_session_clears_all_its_tools() {
    let mut breaker = CircuitBreaker::new(1);
    breaker.record_block("s1", "Bash");
    breaker.record_block("s1", "Edit");
    breaker.reset_session("s1");
    assert!(!breaker.is_tripped("s1", "Bash"));
    assert!(!breaker.is_tripped("s1", "Edit"));
}
