//! Extraction of function calls from free-form model output.

pub mod parser;

pub use parser::{FunctionCallParser, ParseReport, ParseSkip};
