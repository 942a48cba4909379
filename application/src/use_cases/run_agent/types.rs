//! Type definitions for the RunAgent use case.

use crate::ports::llm_gateway::GatewayError;
use crate::use_cases::self_verify::SelfVerificationReport;
use reasoner_domain::{
    ActionParseError, CalculatorError, PluralityOutcome, Task, TaskDomain, ToolBudgetExceeded,
    ToolInvocation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that abort an agent run.
///
/// A gateway failure can come from any stage. The other variants come only
/// from the tool-use loop.
#[derive(Error, Debug)]
pub enum RunAgentError {
    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),

    #[error("Malformed action: {0}")]
    MalformedAction(#[from] ActionParseError),

    #[error("Calculator error: {0}")]
    Calculator(#[from] CalculatorError),

    #[error("{0}")]
    ToolBudgetExceeded(#[from] ToolBudgetExceeded),
}

impl RunAgentError {
    /// Failure category for reporting
    pub fn category(&self) -> FailureCategory {
        match self {
            RunAgentError::GatewayError(_) => FailureCategory::GatewayFailure,
            RunAgentError::MalformedAction(_) => FailureCategory::MalformedAction,
            RunAgentError::Calculator(e) if e.is_unsafe() => FailureCategory::UnsafeExpression,
            RunAgentError::Calculator(_) => FailureCategory::Arithmetic,
            RunAgentError::ToolBudgetExceeded(_) => FailureCategory::ToolBudgetExceeded,
        }
    }
}

/// Category of a fatal run error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    GatewayFailure,
    MalformedAction,
    UnsafeExpression,
    Arithmetic,
    ToolBudgetExceeded,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::GatewayFailure => "gateway_failure",
            FailureCategory::MalformedAction => "malformed_action",
            FailureCategory::UnsafeExpression => "unsafe_expression",
            FailureCategory::Arithmetic => "arithmetic",
            FailureCategory::ToolBudgetExceeded => "tool_budget_exceeded",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for the RunAgent use case
#[derive(Debug, Clone)]
pub struct RunAgentInput {
    /// The task to answer
    pub task: Task,
    /// Overrides the configured calculator budget for this run
    pub max_tool_uses: Option<usize>,
}

impl RunAgentInput {
    pub fn new(task: impl Into<Task>) -> Self {
        Self {
            task: task.into(),
            max_tool_uses: None,
        }
    }

    pub fn with_max_tool_uses(mut self, max: usize) -> Self {
        self.max_tool_uses = Some(max);
        self
    }
}

/// Output from the RunAgent use case
#[derive(Debug, Clone, Serialize)]
pub struct RunAgentOutput {
    /// Final answer, free of protocol markers
    pub answer: String,
    /// Domain assigned by the classifier
    pub domain: TaskDomain,
    /// Calculator calls made by the tool-use loop, in order
    pub tool_invocations: Vec<ToolInvocation>,
    /// Candidate produced by the tool-use loop, before refinement
    pub tool_loop_answer: String,
    /// Ensemble tally (math and planning only)
    pub ensemble: Option<PluralityOutcome>,
    /// Outcome of the final format check
    pub self_verification: SelfVerificationReport,
}

impl RunAgentOutput {
    /// Whether any refinement stage replaced the tool-loop answer
    pub fn was_refined(&self) -> bool {
        self.answer != self.tool_loop_answer
    }
}
