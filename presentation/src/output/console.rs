//! Console output formatter for orchestration outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use agentic_domain::{OrchestrationOutcome, ToolDefinition, WorkflowPath};

/// Formats outcomes and tool listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Answer followed by what the engine did to produce it
    pub fn format(outcome: &OrchestrationOutcome) -> String {
        let mut output = String::new();

        output.push_str(&outcome.answer);
        output.push_str("\n\n");

        let workflow = match outcome.workflow {
            WorkflowPath::FunctionCalling => "function calling",
            WorkflowPath::Direct => "direct",
        };
        output.push_str(&format!(
            "{} {} ({}) | {} {} | {} {} | {} {}\n",
            "Provider:".dimmed(),
            outcome.provider,
            outcome.provider_code,
            "Channel:".dimmed(),
            outcome.channel,
            "Language:".dimmed(),
            outcome.language.code(),
            "Workflow:".dimmed(),
            workflow
        ));

        if outcome.function_calling_used {
            output.push_str(&format!(
                "{} {} made, {} failed\n",
                "Tool calls:".dimmed(),
                outcome.function_calls_made,
                outcome.failed_calls()
            ));
            for result in &outcome.function_results {
                let line = match &result.error {
                    None => format!("  {} {}", "v".green(), result.tool),
                    Some(error) => format!("  {} {}: {}", "x".red(), result.tool, error),
                };
                output.push_str(&line);
                output.push('\n');
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &OrchestrationOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_tools(tools: &[&ToolDefinition]) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Available Tools"));
        output.push('\n');

        for tool in tools {
            output.push_str(&format!(
                "\n{} {} {}\n",
                tool.code.yellow().bold(),
                format!("[{}]", tool.category.as_str()).dimmed(),
                format!("priority {}", tool.priority).dimmed()
            ));
            output.push_str(&format!("  {}\n", tool.description));
            for param in &tool.parameters {
                let required = if param.required { "required" } else { "optional" };
                output.push_str(&format!(
                    "    {} ({}, {}): {}\n",
                    param.name.cyan(),
                    param.param_type.as_str(),
                    required,
                    param.description
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &OrchestrationOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &OrchestrationOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_tools(&self, tools: &[&ToolDefinition]) -> String {
        Self::format_tools(tools)
    }
}
