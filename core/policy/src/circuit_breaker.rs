//! Per-(session, tool) block counters.
//!
//! Tracks how many times a tool call for a given session has been blocked
//! by policy so the block message can warn the model to stop retrying once
//! a threshold is crossed.

use std::collections::HashMap;

/// Counts policy blocks keyed by `(session_id, tool_name)`.
#[derive(Debug, Default)]
pub struct CircuitBreaker {
    threshold: u32,
    counts: HashMap<(String, String), u32>,
}

impl CircuitBreaker {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            counts: HashMap::new(),
        }
    }

    /// Records a block and returns the new count for this (session, tool).
    pub fn record_block(&mut self, session_id: &str, tool_name: &str) -> u32 {
        let key = (session_id.to_string(), tool_name.to_string());
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Has this (session, tool) hit the configured block threshold?
    pub fn is_tripped(&self, session_id: &str, tool_name: &str) -> bool {
        self.threshold > 0
            && self
                .counts
                .get(&(session_id.to_string(), tool_name.to_string()))
                .is_some_and(|&count| count >= self.threshold)
    }

    pub fn reset(&mut self, session_id: &str, tool_name: &str) {
        self.counts.remove(&(session_id.to_string(), tool_name.to_string()));
    }

    pub fn reset_session(&mut self, session_id: &str) {
        self.counts.retain(|(sid, _), _| sid != session_id);
    }
}

#[cfg(test)]
#[path = "circuit_breaker.test.rs"]
mod tests;
