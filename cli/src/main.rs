//! CLI entrypoint for Agentic Livechat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use agentic_application::{AskInput, ConversationOrchestrator, ProviderCatalog};
use agentic_domain::Channel;
use agentic_infrastructure::{ConfigLoader, ConfiguredProviderCatalog, FileConfig, build_default_registry};
use agentic_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressNotifier, ProgressReporter, SilentProgress,
};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const LOG_FILE_PREFIX: &str = "agentic-livechat.log";

fn env_filter(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    }
}

/// Console logging, plus daily-rotated files when `log_dir` is set.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter(verbose));

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Cannot create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(env_filter(verbose.max(1)));

            tracing_subscriber::registry().with(console).with(file).init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(console).init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting Agentic Livechat");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let channel = cli
        .channel
        .as_deref()
        .map(Channel::parse)
        .unwrap_or_else(|| config.agent.channel());

    // === Dependency Injection ===
    let client = reqwest::Client::new();
    let catalog = Arc::new(ConfiguredProviderCatalog::new(&config.providers, client.clone()));
    if catalog.is_empty() {
        warn!("No active providers configured");
    }
    let providers: Arc<dyn ProviderCatalog> = catalog;
    let registry = build_default_registry(&config, providers.clone(), client)
        .context("Failed to build tool registry")?;

    if cli.list_tools {
        println!("{}", ConsoleFormatter::format_tools(&registry.for_channel(channel)));
        return Ok(());
    }

    let message = match cli.message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => bail!("A message is required. Use --list-tools or --show-config to inspect the setup."),
    };

    let mut input = AskInput::new(message, channel);
    if let Some(code) = &cli.provider {
        input = input.with_provider(code.clone());
    }
    if let Some(lang) = &cli.lang {
        input = input.with_lang(lang.clone());
    }

    let provider_label = cli.provider.as_deref().unwrap_or("default provider");
    let progress: Box<dyn ProgressNotifier> = if cli.quiet || cli.output == OutputFormat::Json {
        Box::new(SilentProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let orchestrator = ConversationOrchestrator::new(providers, Arc::new(registry));
    progress.on_start(provider_label, channel.as_str());
    let outcome = orchestrator.ask(input).await;
    progress.on_finish(outcome.is_ok());
    let outcome = outcome?;

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };
    println!("{}", output);

    Ok(())
}
