//! CLI entrypoint for reasoner
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use reasoner_application::{
    AgentProgressNotifier, ConversationLogger, LlmGateway, NoAgentProgress, NoConversationLogger,
    RunAgentInput, RunAgentUseCase,
};
use reasoner_domain::Task;
use reasoner_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiGateway, Severity,
};
use reasoner_presentation::{
    BatchAnswer, Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, SimpleProgress,
    parse_batch_input,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!("\nEffective configuration:\n");
        println!("{}", config.to_toml_redacted()?);
        return Ok(ExitCode::SUCCESS);
    }

    check_config(&config)?;

    ConsoleFormatter::set_color(config.output.use_color(cli.no_color));
    let format = config.output.resolve_format(cli.output.map(Into::into));

    info!(
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        max_tool_uses = config.agent.max_tool_uses,
        "Starting reasoner"
    );

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.provider)?);

    let logger: Arc<dyn ConversationLogger> = match &config.logging.transcript {
        Some(path) => match JsonlConversationLogger::open(path) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let use_case = RunAgentUseCase::new(gateway)
        .with_params(config.execution_params())
        .with_conversation_logger(logger);

    // Batch mode
    if let (Some(input), Some(answers)) = (&cli.input, &cli.answers) {
        run_batch(&use_case, input, answers, cli.quiet).await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single task mode - task is required
    let task = match cli.task {
        Some(t) if !t.trim().is_empty() => Task::new(t),
        Some(_) => bail!("Task is empty."),
        None => bail!("Task is required. Use --input/--answers for batch mode."),
    };

    let progress: Box<dyn AgentProgressNotifier> = if cli.quiet {
        Box::new(NoAgentProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    match use_case
        .execute_with_progress(RunAgentInput::new(task), progress.as_ref())
        .await
    {
        Ok(output) => {
            println!("{}", ConsoleFormatter.render(&output, format));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::format_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(max) = cli.max_tool_uses {
        config.agent.max_tool_uses = max;
    }
    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.provider.base_url = base_url.clone();
    }
    if let Some(transcript) = &cli.transcript {
        config.logging.transcript = Some(transcript.clone());
    }
}

/// Report configuration issues; fail on errors
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
        warn!("config: {}", issue);
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.to_string())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

/// Run every task of a batch file sequentially and write the answers file.
///
/// A failed task records a `null` answer and the batch continues.
async fn run_batch<G: LlmGateway + 'static>(
    use_case: &RunAgentUseCase<G>,
    input: &Path,
    answers: &Path,
    quiet: bool,
) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let tasks = parse_batch_input(&json)
        .with_context(|| format!("{} is not a JSON array of tasks", input.display()))?;

    let progress: Box<dyn AgentProgressNotifier> = if quiet {
        Box::new(NoAgentProgress)
    } else {
        Box::new(SimpleProgress)
    };

    let total = tasks.len();
    let mut results = Vec::with_capacity(total);
    for (i, task) in tasks.into_iter().enumerate() {
        if !quiet {
            eprintln!("[{}/{}] {}", i + 1, total, preview(task.content()));
        }
        let result = use_case
            .execute_with_progress(RunAgentInput::new(task), progress.as_ref())
            .await;
        if let Err(e) = &result {
            eprintln!("{}", ConsoleFormatter::format_error(e));
        }
        results.push(BatchAnswer::from_result(&result));
    }

    write_answers(answers, &results)?;

    let answered = results.iter().filter(|a| a.is_success()).count();
    eprintln!(
        "Answered {}/{} tasks, wrote {}",
        answered,
        total,
        answers.display()
    );
    Ok(())
}

fn write_answers(path: &Path, answers: &[BatchAnswer]) -> Result<()> {
    let json = serde_json::to_string_pretty(answers)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// First line of a task, shortened for progress output
fn preview(task: &str) -> String {
    const MAX_CHARS: usize = 60;
    let first_line = task.lines().next().unwrap_or_default();
    if first_line.chars().count() > MAX_CHARS {
        format!("{}...", first_line.chars().take(MAX_CHARS).collect::<String>())
    } else {
        first_line.to_string()
    }
}
