//! Progress reporting for agent runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reasoner_application::AgentProgressNotifier;
use reasoner_domain::{PluralityOutcome, RunStage, TaskDomain, ToolInvocation};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress on stderr with a spinner per stage
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_domain_classified(&self, domain: TaskDomain) {
        eprintln!("{} domain: {}", "->".cyan(), domain.to_string().bold());
    }

    fn on_stage_start(&self, stage: RunStage) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("starting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(previous) = guard.take() {
                previous.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn on_model_call_start(&self, _stage: RunStage, call_index: usize) {
        self.with_spinner(|pb| pb.set_message(format!("model call {}", call_index)));
    }

    fn on_tool_result(&self, invocation: &ToolInvocation) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "  {} {} = {}",
                "calc".dimmed(),
                invocation.expression,
                invocation.display_value().green()
            ))
        });
    }

    fn on_stage_degraded(&self, stage: RunStage, reason: &str) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "  {} {}: {}",
                "!".yellow(),
                stage.display_name(),
                reason
            ))
        });
    }

    fn on_vote_tallied(&self, outcome: &PluralityOutcome) {
        self.with_spinner(|pb| {
            pb.set_message(format!(
                "{} {}/{}",
                outcome.vote_summary(),
                outcome.winner_count,
                outcome.total_votes
            ))
        });
    }

    fn on_stage_complete(&self, stage: RunStage, changed: bool) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            let status = if changed && stage != RunStage::ToolLoop {
                "answer revised".yellow().to_string()
            } else {
                "done".green().to_string()
            };
            pb.finish_with_message(status);
        }
    }

    fn on_run_failed(&self, _error: &str) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.abandon_with_message("failed".red().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AgentProgressNotifier for SimpleProgress {
    fn on_domain_classified(&self, domain: TaskDomain) {
        eprintln!("{} domain: {}", "->".cyan(), domain);
    }

    fn on_stage_start(&self, stage: RunStage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_tool_result(&self, invocation: &ToolInvocation) {
        eprintln!(
            "  {} {} = {}",
            "v".green(),
            invocation.expression,
            invocation.display_value()
        );
    }

    fn on_stage_degraded(&self, stage: RunStage, reason: &str) {
        eprintln!("  {} {}: {}", "x".red(), stage.display_name(), reason);
    }

    fn on_vote_tallied(&self, outcome: &PluralityOutcome) {
        eprintln!(
            "  {} {}/{}",
            outcome.vote_summary(),
            outcome.winner_count,
            outcome.total_votes
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_spinner(reporter: &ProgressReporter) -> bool {
        reporter.spinner.lock().unwrap().is_some()
    }

    #[test]
    fn test_failure_releases_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_start(RunStage::ToolLoop);
        assert!(has_spinner(&reporter));

        reporter.on_run_failed("Malformed action");
        assert!(!has_spinner(&reporter));
    }

    #[test]
    fn test_stage_complete_releases_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_start(RunStage::SelfVerification);
        reporter.on_stage_complete(RunStage::SelfVerification, false);
        assert!(!has_spinner(&reporter));
    }
}
