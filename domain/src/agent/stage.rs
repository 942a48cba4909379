//! Pipeline stages of one agent run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of an agent run, in execution order.
///
/// Classification happens before any stage and involves no model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// Model + calculator loop producing the first candidate
    ToolLoop,
    /// Repeated stochastic verification with plurality vote (math, planning)
    EnsembleVerification,
    /// Single deterministic format check
    SelfVerification,
}

impl RunStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStage::ToolLoop => "tool_loop",
            RunStage::EnsembleVerification => "ensemble_verification",
            RunStage::SelfVerification => "self_verification",
        }
    }

    /// Short label for progress display
    pub fn display_name(&self) -> &'static str {
        match self {
            RunStage::ToolLoop => "Solving",
            RunStage::EnsembleVerification => "Ensemble check",
            RunStage::SelfVerification => "Format check",
        }
    }
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_snake_case() {
        assert_eq!(RunStage::ToolLoop.to_string(), "tool_loop");
        assert_eq!(RunStage::EnsembleVerification.display_name(), "Ensemble check");
    }
}
