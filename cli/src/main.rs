//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod cli;
mod output;
mod progress;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, OutputFormat};
use council_application::{RunCouncilInput, RunCouncilUseCase};
use council_domain::{Model, Question};
use council_infrastructure::{ConfigLoader, FileConfig, OpenRouterClient};
use output::ConsoleFormatter;
use progress::{ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };

    let question = match cli.question {
        Some(q) => Question::try_new(q).context("question must not be empty")?,
        None => bail!("Question is required. See --help for usage."),
    };

    // CLI flags override config file values
    let members: Vec<Model> = if cli.model.is_empty() {
        config.members()
    } else {
        cli.model
            .iter()
            .map(|s| s.parse().expect("model parsing is infallible"))
            .collect()
    };

    let lead: Model = match &cli.lead {
        Some(lead) => lead.parse().expect("model parsing is infallible"),
        None => config.lead(),
    };

    info!("Starting council: {} members, lead {}", members.len(), lead);

    let client = build_client(&config)?;

    // Ctrl-C cancels between stages rather than killing mid-write
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling after the current stage");
            signal_token.cancel();
        }
    });

    let mut input =
        RunCouncilInput::new(question.clone(), members.clone(), lead.clone()).with_cancellation(cancel);
    if !cli.no_title {
        input = input.with_title();
    }

    if !cli.quiet {
        println!();
        println!("Question: {}", question.content());
        println!(
            "Members: {}",
            members
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Lead: {}", lead);
        println!();
    }

    let use_case = RunCouncilUseCase::new(client);

    // Progress bars only make sense on a terminal; plain line output
    // when stderr is piped or redirected.
    let bundle = if cli.quiet {
        use_case.execute(input).await?
    } else if std::io::stderr().is_terminal() {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    } else {
        use_case.execute_with_progress(input, &SimpleProgress).await?
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&bundle),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&bundle),
        OutputFormat::Json => ConsoleFormatter::format_json(&bundle),
    };

    println!("{}", output);

    Ok(())
}

fn build_client(config: &FileConfig) -> Result<Arc<OpenRouterClient>> {
    let api_key = config.resolve_api_key().context(
        "no OpenRouter API key found; set OPENROUTER_API_KEY or add api_key to the config file",
    )?;

    let client = OpenRouterClient::new(api_key)?
        .with_api_url(config.openrouter.api_url.clone())
        .with_retry(config.openrouter.retry.to_policy());

    Ok(Arc::new(client))
}
