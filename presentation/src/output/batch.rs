//! Batch input parsing and answer records

use reasoner_application::{FailureCategory, RunAgentError, RunAgentOutput};
use reasoner_domain::{Task, TaskDomain};
use serde::{Deserialize, Serialize};

/// One entry of a batch input file.
///
/// Accepts either a bare string or an object with an `input` field;
/// other fields on the object are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BatchInputEntry {
    Plain(String),
    Object { input: String },
}

/// Parse a batch input file (a JSON array) into tasks, in order.
pub fn parse_batch_input(json: &str) -> Result<Vec<Task>, serde_json::Error> {
    let entries: Vec<BatchInputEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            BatchInputEntry::Plain(input) | BatchInputEntry::Object { input } => Task::new(input),
        })
        .collect())
}

/// One entry of a batch answers file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchAnswer {
    /// Final answer, `null` when the run failed
    pub output: Option<String>,
    /// Domain of the task, `null` when the run failed
    pub domain: Option<TaskDomain>,
    /// Failure category, `null` on success
    pub error: Option<FailureCategory>,
}

impl BatchAnswer {
    pub fn from_result(result: &Result<RunAgentOutput, RunAgentError>) -> Self {
        match result {
            Ok(output) => Self {
                output: Some(output.answer.clone()),
                domain: Some(output.domain),
                error: None,
            },
            Err(e) => Self {
                output: None,
                domain: None,
                error: Some(e.category()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reasoner_domain::ToolBudgetExceeded;

    #[test]
    fn test_parse_mixed_entries() {
        let json = r#"[
            {"input": "What is 3+2?", "domain": "math", "id": 7},
            "Where do penguins live?"
        ]"#;

        let tasks = parse_batch_input(json).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].content(), "What is 3+2?");
        assert_eq!(tasks[1].content(), "Where do penguins live?");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(parse_batch_input(r#"{"input": "x"}"#).is_err());
        assert!(parse_batch_input(r#"[{"question": "x"}]"#).is_err());
    }

    #[test]
    fn test_failed_run_serializes_nulls() {
        let result: Result<RunAgentOutput, RunAgentError> =
            Err(ToolBudgetExceeded { limit: 2 }.into());
        let answer = BatchAnswer::from_result(&result);

        assert!(!answer.is_success());
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "output": null,
                "domain": null,
                "error": "tool_budget_exceeded"
            })
        );
    }
}
