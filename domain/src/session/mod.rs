//! Conversation history.
//!
//! - [`entities::ChatTurn`] - one prior message supplied by the caller

pub mod entities;
