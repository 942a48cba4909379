//! Calculator invocation budget.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of calculator calls allowed per run
pub const DEFAULT_MAX_TOOL_USES: usize = 2;

/// The run requested more calculator calls than allowed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Exceeded tool-use limit of {limit}")]
pub struct ToolBudgetExceeded {
    pub limit: usize,
}

/// Bounded per-run counter of calculator invocations.
///
/// Scoped to one run; never shared between runs.
///
/// # Example
///
/// ```
/// use reasoner_domain::agent::ToolBudget;
///
/// let mut budget = ToolBudget::new(1);
/// assert!(budget.consume().is_ok());
/// assert!(budget.consume().is_err());
/// assert_eq!(budget.used(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolBudget {
    limit: usize,
    used: usize,
}

impl ToolBudget {
    pub fn new(limit: usize) -> Self {
        Self { limit, used: 0 }
    }

    /// Record one invocation.
    ///
    /// Fails without incrementing when the limit has already been reached.
    pub fn consume(&mut self) -> Result<(), ToolBudgetExceeded> {
        if self.used >= self.limit {
            return Err(ToolBudgetExceeded { limit: self.limit });
        }
        self.used += 1;
        Ok(())
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for ToolBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOOL_USES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit() {
        let budget = ToolBudget::default();
        assert_eq!(budget.limit(), 2);
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn test_consume_until_exhausted() {
        let mut budget = ToolBudget::new(2);
        budget.consume().unwrap();
        budget.consume().unwrap();

        let err = budget.consume().unwrap_err();
        assert_eq!(err, ToolBudgetExceeded { limit: 2 });
        assert_eq!(budget.used(), 2);
    }

    #[test]
    fn test_zero_budget_rejects_first_call() {
        let mut budget = ToolBudget::new(0);
        assert!(budget.consume().is_err());
        assert_eq!(budget.used(), 0);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            ToolBudgetExceeded { limit: 2 }.to_string(),
            "Exceeded tool-use limit of 2"
        );
    }
}
