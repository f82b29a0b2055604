//! Rendering of tool results into the final localized reply.

pub mod integrator;
pub mod payloads;
pub mod texts;

pub use integrator::ResponseIntegrator;
pub use texts::{TextKey, localized};
