//! The config surface consumed by every component of the agent execution core.

use std::time::Duration;

use tracing::warn;

use crate::validation::Validator;

/// Runtime configuration for one [`agentcore_runner::Runner`]-equivalent
/// composition root. Out-of-range fields are clamped to their documented
/// bounds rather than rejected — construction always succeeds.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub max_iterations: u32,
    pub max_tokens: u32,
    pub max_messages: u32,
    pub timeout: Duration,
    pub stream_output: bool,
    pub temperature: f32,
    pub system_prompt: String,

    /// Interval between heartbeat events while a stream or tool batch is open.
    pub heartbeat_interval: Duration,
    /// Bound on the caller-facing event channel (§5 backpressure).
    pub event_channel_capacity: usize,
    /// Max pending tasks per session before `Enqueue` returns busy.
    pub run_queue_depth: u32,
    /// Per-task timeout enforced by the run queue.
    pub run_queue_task_timeout: Duration,
    /// Window a pause/approval rendezvous waits before timing out.
    pub rendezvous_timeout: Duration,
    /// Ceiling (bytes) tool output is pre-truncated to.
    pub tool_output_truncation_ceiling: usize,
    /// Policy-block count per (session, tool) before the circuit breaker trips.
    pub circuit_breaker_threshold: u32,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_tokens: 8_000,
            max_messages: 100,
            timeout: Duration::from_secs(5 * 60),
            stream_output: true,
            temperature: 0.7,
            system_prompt: String::new(),

            heartbeat_interval: Duration::from_secs(15),
            event_channel_capacity: 100,
            run_queue_depth: 10,
            run_queue_task_timeout: Duration::from_secs(5 * 60),
            rendezvous_timeout: Duration::from_secs(5 * 60),
            tool_output_truncation_ceiling: 64 * 1024,
            circuit_breaker_threshold: 3,
        }
    }
}

impl RunnerConfig {
    /// Build a config from explicit values, clamping anything out of range
    /// to its documented bound and logging what was corrected.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        max_iterations: u32,
        max_tokens: u32,
        max_messages: u32,
        timeout_secs: u64,
        stream_output: bool,
        temperature: f32,
        system_prompt: impl Into<String>,
    ) -> Self {
        let mut validator = Validator::new();
        let config = Self {
            max_iterations: validator.clamp_u32("max_iterations", max_iterations, 1..=100),
            max_tokens: validator.clamp_u32("max_tokens", max_tokens, 1..=200_000),
            max_messages: validator.clamp_u32("max_messages", max_messages, 1..=10_000),
            timeout: Duration::from_secs(validator.clamp_secs("timeout", timeout_secs, 1..=3_600)),
            stream_output,
            temperature: validator.clamp_f32("temperature", temperature, 0.0..=2.0),
            system_prompt: system_prompt.into(),
            ..Self::default()
        };

        for correction in validator.finish() {
            warn!(correction = %correction, "clamped out-of-range config field");
        }

        config
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
