//! Prompt domain
//!
//! Templates for every model round-trip: language detection, keyword
//! extraction, the function-calling prompt and the per-channel system
//! prompts of the direct path.

pub mod template;

pub use template::{
    FUNCTION_CALLING_MAIN, INTERNAL_UNRESTRICTED_SYSTEM, LIVECHAT_BUSINESS_SYSTEM, PromptTemplate,
};
