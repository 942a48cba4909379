//! Sandboxed arithmetic calculator
//!
//! Expressions come from model output, so evaluation is restricted to a tiny
//! grammar: numeric literals, `+ - * / **`, parentheses and `round(x[, n])`.
//! There is no name lookup, attribute access or function table beyond
//! `round`; anything else is rejected with
//! [`CalculatorError::UnsafeExpression`].

mod error;
mod lexer;
mod parser;

pub use error::CalculatorError;
pub use lexer::ROUND_FN;

use parser::Parser;

/// Longest expression accepted, in characters
pub const MAX_EXPRESSION_CHARS: usize = 1024;

/// Evaluate a calculator expression.
///
/// # Examples
///
/// ```
/// use reasoner_domain::calculator::evaluate;
///
/// assert_eq!(evaluate("round((3*2.49)*1.07, 2)").unwrap(), 7.99);
/// assert!(evaluate("__import__('os')").is_err());
/// ```
pub fn evaluate(expression: &str) -> Result<f64, CalculatorError> {
    if expression.chars().count() > MAX_EXPRESSION_CHARS {
        return Err(CalculatorError::UnsafeExpression(format!(
            "expression longer than {} characters",
            MAX_EXPRESSION_CHARS
        )));
    }

    let tokens = lexer::tokenize(expression)?;
    let value = Parser::new(tokens).parse()?.eval()?;

    if !value.is_finite() {
        return Err(CalculatorError::Arithmetic(format!(
            "result is not a finite number: {}",
            value
        )));
    }
    // Normalize negative zero so it renders as "0"
    Ok(if value == 0.0 { 0.0 } else { value })
}

/// Render a calculator result the way it is shown to the model.
///
/// Integral values have no trailing `.0`.
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_example_matches_direct_evaluation() {
        let direct: f64 = format!("{:.2}", (3.0_f64 * 2.49) * 1.07).parse().unwrap();
        assert_eq!(evaluate("round((3*2.49)*1.07, 2)").unwrap(), direct);
        assert_eq!(direct, 7.99);
    }

    #[test]
    fn test_simple_addition() {
        assert_eq!(evaluate("3+2").unwrap(), 5.0);
        assert_eq!(format_value(evaluate("3+2").unwrap()), "5");
    }

    #[test]
    fn test_injection_attempts_fail() {
        for expr in [
            "__import__('os')",
            "__import__('os').system('ls')",
            "open('/etc/passwd').read()",
            "().__class__.__bases__",
            "eval('1')",
            "round.__self__",
            "lambda: 1",
        ] {
            let err = evaluate(expr).unwrap_err();
            assert!(err.is_unsafe(), "expected unsafe: {expr} -> {err}");
        }
    }

    #[test]
    fn test_overflow_is_arithmetic_error() {
        let err = evaluate("10 ** 400").unwrap_err();
        assert!(matches!(err, CalculatorError::Arithmetic(_)));
    }

    #[test]
    fn test_complex_result_is_arithmetic_error() {
        let err = evaluate("(-8) ** (1/3)").unwrap_err();
        assert!(matches!(err, CalculatorError::Arithmetic(_)));
    }

    #[test]
    fn test_length_limit() {
        let long = vec!["1"; MAX_EXPRESSION_CHARS].join("+");
        assert!(evaluate(&long).unwrap_err().is_unsafe());
    }

    #[test]
    fn test_negative_zero_normalized() {
        assert_eq!(format_value(evaluate("-0").unwrap()), "0");
    }

    #[test]
    fn test_format_fraction() {
        assert_eq!(format_value(evaluate("7/2").unwrap()), "3.5");
    }
}
