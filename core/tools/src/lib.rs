//! Tool-call execution: JSON argument parsing, the policy/approval gate,
//! before/after hook firing, output truncation, and credential scrubbing.

mod executor;
mod scrub;
mod truncate;

pub use executor::ToolExecOutcome;
pub use executor::ToolExecutor;
pub use executor::ToolExecutorConfig;
pub use scrub::CredentialScrubber;
pub use truncate::truncate_tool_output;
