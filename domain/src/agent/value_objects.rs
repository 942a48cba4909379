//! Agent run value objects.

use serde::{Deserialize, Serialize};

use crate::calculator::format_value;

/// One calculator call made during the tool-use loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Expression as sent by the model
    pub expression: String,
    /// Evaluated result
    pub value: f64,
}

impl ToolInvocation {
    pub fn new(expression: impl Into<String>, value: f64) -> Self {
        Self {
            expression: expression.into(),
            value,
        }
    }

    /// Result rendered the way it is shown to the model
    pub fn display_value(&self) -> String {
        format_value(self.value)
    }
}
