//! Output formatter trait

use reasoner_application::RunAgentOutput;
use reasoner_domain::OutputFormat;

/// Trait for formatting run results
pub trait OutputFormatter {
    /// Format the complete run result with its trace
    fn format(&self, output: &RunAgentOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &RunAgentOutput) -> String;

    /// Format the answer only
    fn format_answer_only(&self, output: &RunAgentOutput) -> String;

    /// Dispatch on the configured format
    fn render(&self, output: &RunAgentOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => self.format_answer_only(output),
            OutputFormat::Full => self.format(output),
            OutputFormat::Json => self.format_json(output),
        }
    }
}
