//! Calculator error types

use thiserror::Error;

/// Errors raised while evaluating a calculator expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// The expression uses a name, token or construct outside the grammar
    #[error("Unsafe expression: {0}")]
    UnsafeExpression(String),

    /// The expression is well-formed but cannot be evaluated numerically
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),
}

impl CalculatorError {
    pub(crate) fn unsafe_expr(msg: impl Into<String>) -> Self {
        CalculatorError::UnsafeExpression(msg.into())
    }

    pub(crate) fn arithmetic(msg: impl Into<String>) -> Self {
        CalculatorError::Arithmetic(msg.into())
    }

    /// Check if the expression was rejected by the sandbox
    pub fn is_unsafe(&self) -> bool {
        matches!(self, CalculatorError::UnsafeExpression(_))
    }
}
