//! Output formatter trait

use agentic_domain::{OrchestrationOutcome, ToolDefinition};

/// Trait for formatting orchestration outcomes
pub trait OutputFormatter {
    /// Answer with a summary of provider and tool activity
    fn format(&self, outcome: &OrchestrationOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &OrchestrationOutcome) -> String;

    /// Listing of tool definitions
    fn format_tools(&self, tools: &[&ToolDefinition]) -> String;
}
