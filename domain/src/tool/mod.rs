//! Tool domain module
//!
//! A tool is a named, schema-described capability the orchestration engine
//! can invoke to fetch structured data for a reply: product search, stock,
//! company details, keyword extraction.
//!
//! ```text
//! ┌────────────────┐    ┌────────────────────┐    ┌─────────────────────┐
//! │ ToolDefinition │───▶│ ParsedFunctionCall │───▶│ ToolExecutionResult │
//! │ (registry)     │    │ (model output)     │    │ (one per call)      │
//! └────────────────┘    └────────────────────┘    └─────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolRegistry`] - explicit registry built once at startup and shared
//!   read-only between requests
//! - [`ToolDefinition`] - identity, category, parameter schema, keywords,
//!   priority and timeout
//! - [`Tool`] - async execution capability bound to a definition
//! - [`ToolValidator`] - pure parameter validation against a definition
//! - [`ExtractionKeywords`] - the keyword buckets chained into multi-search tools

pub mod codes;
pub mod entities;
pub mod extraction;
pub mod registry;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ParamValue, ParsedFunctionCall, ToolCategory, ToolDefinition, ToolParameter};
pub use extraction::{ExtractionKeywords, ExtractionResult};
pub use registry::ToolRegistry;
pub use traits::{DefaultToolValidator, Tool, ToolValidator};
pub use value_objects::{ToolError, ToolExecutionResult};
