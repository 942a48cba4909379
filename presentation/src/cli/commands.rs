//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final answer
    Answer,
    /// Answer plus domain, calculator calls and verification details
    Full,
    /// JSON output
    Json,
}

impl From<OutputFormat> for reasoner_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => reasoner_domain::OutputFormat::Answer,
            OutputFormat::Full => reasoner_domain::OutputFormat::Full,
            OutputFormat::Json => reasoner_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for reasoner
#[derive(Parser, Debug)]
#[command(name = "reasoner")]
#[command(author, version, about = "Answer tasks with a calculator-equipped, self-checking LLM agent")]
#[command(long_about = r#"
Reasoner answers one task by orchestrating calls to an OpenAI-compatible model.

Each run goes through these stages:
1. Classification: the task is assigned a domain (math, planning, coding,
   future prediction, common sense) by keyword rules
2. Tool loop: the model may call a sandboxed calculator a bounded number of times
3. Ensemble check (math and planning only): three verification passes vote
4. Format check: one pass repairs the answer's format

Configuration files are loaded from (in priority order):
1. REASONER_<SECTION>__<KEY>   Environment variables
2. --config <path>             Explicit config file
3. ./reasoner.toml             Project-level config
4. ~/.config/reasoner/config.toml   Global config

Example:
  reasoner "What is 17% of 250?"
  reasoner --max-tool-uses 4 -o full "A shirt costs $20 after a 20% discount. What was the price?"
  reasoner --input tasks.json --answers answers.json
"#)]
pub struct Cli {
    /// The task to answer (not required in batch mode)
    pub task: Option<String>,

    /// Batch mode: JSON array of tasks (strings or objects with an "input" field)
    #[arg(long, value_name = "PATH", requires = "answers", conflicts_with = "task")]
    pub input: Option<PathBuf>,

    /// Batch mode: where to write the answers JSON array
    #[arg(long, value_name = "PATH", requires = "input")]
    pub answers: Option<PathBuf>,

    /// Output format (overrides [output].format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Maximum calculator calls per run (overrides [agent].max_tool_uses)
    #[arg(long, value_name = "N")]
    pub max_tool_uses: Option<usize>,

    /// Model identifier (overrides [provider].model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// API base URL (overrides [provider].base_url)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Append a JSONL transcript of every run event to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Whether the invocation is a batch run
    pub fn is_batch(&self) -> bool {
        self.input.is_some()
    }
}
