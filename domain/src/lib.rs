//! Domain layer for agentic-livechat
//!
//! This crate contains the pure logic of the function-calling engine. It has
//! no dependencies on infrastructure or presentation concerns and performs
//! no I/O.
//!
//! # Core Concepts
//!
//! ## Tools and function calls
//!
//! The model is shown a listing of [`ToolDefinition`]s and may answer with
//! `FUNCTION_CALL[code](key="value", ...)` markers. The
//! [`FunctionCallParser`] turns those into [`ParsedFunctionCall`]s, each of
//! which yields exactly one [`ToolExecutionResult`].
//!
//! ## Channels
//!
//! - **livechat**: public visitors, product and general tools only
//! - **internal**: staff, every registered tool
//!
//! ## Reply language
//!
//! Replies are rendered in one of three [`Language`]s; anything else
//! collapses to `en_US`.

pub mod core;
pub mod function_call;
pub mod orchestration;
pub mod prompt;
pub mod response;
pub mod search;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use core::{channel::Channel, error::RegistryError, language::Language};
pub use function_call::{FunctionCallParser, ParseReport, ParseSkip};
pub use orchestration::{
    DetectionMethod, Intent, OrchestrationDecider, OrchestrationOutcome, WorkflowPath,
};
pub use prompt::PromptTemplate;
pub use response::{ResponseIntegrator, TextKey, localized};
pub use search::{SearchRequest, SearchResponse};
pub use session::entities::{ChatRole, ChatTurn};
pub use tool::{
    DefaultToolValidator, ExtractionKeywords, ExtractionResult, ParamType, ParamValue,
    ParsedFunctionCall, Tool, ToolCategory, ToolDefinition, ToolError, ToolExecutionResult,
    ToolParameter, ToolRegistry, ToolValidator, codes,
};
