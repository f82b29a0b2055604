//! Orchestration domain
//!
//! Pure pieces of the request flow: the gate that decides whether the
//! function-calling path is taken, and the outcome record returned to
//! the caller.

pub mod decider;
pub mod outcome;

pub use decider::{Intent, OrchestrationDecider};
pub use outcome::{DetectionMethod, OrchestrationOutcome, WorkflowPath};
