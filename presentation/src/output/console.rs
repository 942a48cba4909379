//! Console output formatter for run results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use reasoner_application::{RunAgentError, RunAgentOutput};

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for everything printed afterwards
    pub fn set_color(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// Format the complete run result
    pub fn format(output: &RunAgentOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Reasoner Result"));
        text.push('\n');

        text.push_str(&format!("{} {}\n", "Domain:".cyan().bold(), output.domain));

        // Tool loop
        text.push_str(&Self::section_header("Tool loop"));
        if output.tool_invocations.is_empty() {
            text.push_str(&format!("{}\n", "(no calculator calls)".dimmed()));
        }
        for (i, call) in output.tool_invocations.iter().enumerate() {
            text.push_str(&format!(
                "  {}. {} = {}\n",
                i + 1,
                call.expression,
                call.display_value().green()
            ));
        }
        text.push_str(&format!(
            "{}\n{}\n",
            "Candidate:".yellow().bold(),
            Self::indent(&output.tool_loop_answer, "  ")
        ));

        // Ensemble (math / planning only)
        if let Some(ensemble) = &output.ensemble {
            text.push_str(&Self::section_header("Ensemble check"));
            text.push_str(&format!(
                "  {} {}/{} agree{}\n",
                ensemble.vote_summary(),
                ensemble.winner_count,
                ensemble.total_votes,
                match ensemble.fallback_count() {
                    0 => String::new(),
                    n => format!(", {} unusable", n).yellow().to_string(),
                }
            ));
        }

        // Self-verification
        text.push_str(&Self::section_header("Format check"));
        let status = match (&output.self_verification.degraded, output.self_verification.changed) {
            (Some(reason), _) => format!("{} ({})", "skipped".yellow(), reason),
            (None, true) => "answer repaired".green().to_string(),
            (None, false) => "answer unchanged".to_string(),
        };
        text.push_str(&format!("  {}\n", status));

        text.push_str(&Self::section_header("Answer"));
        text.push_str(&output.answer);
        text.push('\n');

        text.push_str(&Self::footer());
        text
    }

    /// Format as JSON
    pub fn format_json(output: &RunAgentOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (the default)
    pub fn format_answer_only(output: &RunAgentOutput) -> String {
        output.answer.clone()
    }

    /// One-line error report for stderr
    pub fn format_error(error: &RunAgentError) -> String {
        format!(
            "{} [{}] {}",
            "Error:".red().bold(),
            error.category(),
            error
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &RunAgentOutput) -> String {
        Self::format(output)
    }

    fn format_json(&self, output: &RunAgentOutput) -> String {
        Self::format_json(output)
    }

    fn format_answer_only(&self, output: &RunAgentOutput) -> String {
        Self::format_answer_only(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasoner_application::SelfVerificationReport;
    use reasoner_domain::{Ballot, OutputFormat, PluralityOutcome, TaskDomain, ToolInvocation};

    fn sample_output() -> RunAgentOutput {
        RunAgentOutput {
            answer: "5".to_string(),
            domain: TaskDomain::Math,
            tool_invocations: vec![ToolInvocation::new("3+2", 5.0)],
            tool_loop_answer: "5".to_string(),
            ensemble: PluralityOutcome::tally(vec![
                Ballot::revised("5"),
                Ballot::revised("5"),
                Ballot::fallback("5"),
            ]),
            self_verification: SelfVerificationReport::default(),
        }
    }

    #[test]
    fn test_answer_only_is_bare() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(&sample_output(), OutputFormat::Answer);
        assert_eq!(text, "5");
    }

    #[test]
    fn test_full_includes_trace() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&sample_output());
        assert!(text.contains("Domain: math"));
        assert!(text.contains("1. 3+2 = 5"));
        assert!(text.contains("[●●●] 3/3 agree, 1 unusable"));
        assert!(text.contains("answer unchanged"));
    }

    #[test]
    fn test_json_is_parseable() {
        let text = ConsoleFormatter::format_json(&sample_output());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["answer"], "5");
        assert_eq!(value["domain"], "math");
        assert_eq!(value["tool_invocations"][0]["expression"], "3+2");
        assert_eq!(value["ensemble"]["winner_count"], 3);
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
