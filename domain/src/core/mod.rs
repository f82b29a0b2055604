//! Core domain concepts shared across all subdomains.
//!
//! - [`language::Language`] - the closed set of supported reply languages
//! - [`channel::Channel`] - the conversational surface a request arrives on
//! - [`error::RegistryError`] - tool registry failures
//! - [`text`] - small UTF-8 safe string helpers

pub mod channel;
pub mod error;
pub mod language;
pub mod text;
