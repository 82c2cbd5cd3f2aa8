//! The agent run loop: per-session conversation driver, streaming
//! accumulation, and the pause/resume controller.

mod accumulator;
mod driver;
mod error;
mod pause;
mod result;

pub use accumulator::StreamAccumulator;
pub use driver::AgentLoop;
pub use error::PauseControllerError;
pub use error::RunLoopError;
pub use error::pause_controller_error;
pub use error::run_loop_error;
pub use pause::PauseController;
pub use pause::PauseStatus;
pub use pause::ResumeOutcome;
pub use result::RunOutcome;
pub use result::StopReason;
