//! Policy rule evaluation, per-(session, tool) circuit breaking, and the
//! approval rendezvous the tool executor blocks on while a human or
//! automated handler decides a `require-approval` tool call.

mod approval;
mod circuit_breaker;
mod decision;
mod error;
mod evaluator;
mod rule;

pub use approval::ApprovalGate;
pub use approval::ApprovalResponse;
pub use approval::PendingApproval;
pub use circuit_breaker::CircuitBreaker;
pub use decision::PolicyDecision;
pub use error::PolicyError;
pub use error::Result;
pub use error::policy_error;
pub use evaluator::PermissionRuleEvaluator;
pub use rule::PermissionRule;
pub use rule::RuleAction;
pub use rule::RuleSource;
