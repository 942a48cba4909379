//! Task domain definitions.
//!
//! A [`TaskDomain`] is assigned once per task, before the first model call,
//! and controls which prompt contract and refinement stages apply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category a task belongs to.
///
/// | Domain | Ensemble verification | Output shape |
/// |--------|-----------------------|--------------|
/// | Math | yes | exact numeric / boxed answer |
/// | Planning | yes | lowercase parenthesized action lines |
/// | Coding | no | code only |
/// | FuturePrediction | no | `\boxed{...}` on one line |
/// | CommonSense | no | one concise line |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDomain {
    Math,
    Planning,
    Coding,
    FuturePrediction,
    #[default]
    CommonSense,
}

impl TaskDomain {
    /// All domains in declaration order.
    pub const ALL: [TaskDomain; 5] = [
        TaskDomain::Math,
        TaskDomain::Planning,
        TaskDomain::Coding,
        TaskDomain::FuturePrediction,
        TaskDomain::CommonSense,
    ];

    /// Stable identifier used in logs and serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskDomain::Math => "math",
            TaskDomain::Planning => "planning",
            TaskDomain::Coding => "coding",
            TaskDomain::FuturePrediction => "future_prediction",
            TaskDomain::CommonSense => "common_sense",
        }
    }

    /// Whether answers in this domain go through ensemble (chain-of-thought) verification.
    pub fn uses_ensemble_verification(&self) -> bool {
        matches!(self, TaskDomain::Math | TaskDomain::Planning)
    }
}

impl fmt::Display for TaskDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
