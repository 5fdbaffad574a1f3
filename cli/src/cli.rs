//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with all stages
    Full,
    /// Only the final synthesis
    Synthesis,
    /// JSON bundle
    Json,
}

/// CLI arguments for the council binary
#[derive(Parser, Debug)]
#[command(name = "council")]
#[command(author, version, about = "LLM Council - multiple models answer, rank each other, one synthesizes")]
#[command(long_about = r#"
Runs a council of LLMs over a single question in three stages:
1. Member Answers: every member answers the question in parallel
2. Peer Rankings: each member ranks the anonymized answer set
3. Synthesis: the lead model merges everything into one final answer

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml or ./.council.toml   Project-level config
3. ~/.config/llm-council/config.toml   Global config

Example:
  council "What's the best way to handle errors in Rust?"
  council -m openai/gpt-5.1 -m anthropic/claude-sonnet-4.5 "Compare async runtimes"
  council --lead google/gemini-3-pro-preview -o full "Tabs or spaces?"
"#)]
pub struct Cli {
    /// The question to ask the council
    pub question: Option<String>,

    /// Council members (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model that synthesizes the final answer (must be a member)
    #[arg(long, value_name = "MODEL")]
    pub lead: Option<String>,

    /// Skip the conversation-title side task
    #[arg(long)]
    pub no_title: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "synthesis")]
    pub output: OutputFormat,

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
}
