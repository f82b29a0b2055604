//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer plus a short summary of tool activity
    Text,
    /// The full orchestration outcome as JSON
    Json,
}

/// CLI arguments for agentic-livechat
#[derive(Parser, Debug)]
#[command(name = "agentic-livechat")]
#[command(author, version, about = "Livechat assistant with LLM tool calling")]
#[command(long_about = r#"
Agentic Livechat answers a customer message through a configured LLM provider.

On both channels the model may call tools when the message asks for them,
and their results are turned into a localized answer. The livechat channel
offers product and general tools (product search, categories, company info);
the internal channel offers every registered tool.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. AGENTIC_* environment variables (nested keys use __)
3. ./agentic.toml or ./.agentic.toml     Project-level config
4. ~/.config/agentic-livechat/config.toml   Global config

Example:
  agentic-livechat "Ce lac recomanzi pentru parchet?"
  agentic-livechat --lang hu_HU --output json "Van raktáron Bona lakk?"
  agentic-livechat --channel internal --provider ollama "Summarize our stock"
"#)]
pub struct Cli {
    /// The customer message (not required with --list-tools or --show-config)
    pub message: Option<String>,

    /// Conversation channel (livechat or internal)
    #[arg(long, value_name = "CHANNEL")]
    pub channel: Option<String>,

    /// Reply language (en_US, ro_RO, hu_HU); detected when omitted
    #[arg(long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Provider code to answer with; the default provider when omitted
    #[arg(short, long, value_name = "CODE")]
    pub provider: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// List the tools visible on the channel and exit
    #[arg(long)]
    pub list_tools: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_long_about_describes_both_channels() {
        let command = Cli::command();
        let about = command.get_long_about().unwrap().to_string();
        assert!(about.contains("On both channels the model may call tools"));
        assert!(about.contains("the internal channel offers every registered tool"));
        assert!(!about.contains("directly"));
    }

    #[test]
    fn test_message_with_flags() {
        let cli = Cli::parse_from([
            "agentic-livechat",
            "--lang",
            "ro_RO",
            "--output",
            "json",
            "-vv",
            "Salut",
        ]);
        assert_eq!(cli.message.as_deref(), Some("Salut"));
        assert_eq!(cli.lang.as_deref(), Some("ro_RO"));
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.channel.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["agentic-livechat", "--list-tools"]);
        assert!(cli.list_tools);
        assert!(cli.message.is_none());
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(cli.log_dir.is_none());
    }
}
