//! Tokenizer for calculator expressions.

use super::error::CalculatorError;

/// The only function name the grammar accepts
pub const ROUND_FN: &str = "round";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Round,
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Round => f.write_str(ROUND_FN),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::DoubleStar => f.write_str("**"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

/// Split an expression into tokens.
///
/// Identifiers other than `round` and any character outside the grammar are
/// rejected here, before parsing starts.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, CalculatorError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let (number, next) = lex_number(&chars, i)?;
                tokens.push(Token::Number(number));
                i = next;
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let ident: String = chars[start..i].iter().collect();
                if ident != ROUND_FN {
                    return Err(CalculatorError::unsafe_expr(format!(
                        "name '{}' is not allowed",
                        ident
                    )));
                }
                tokens.push(Token::Round);
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::DoubleStar);
                i += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            other => {
                return Err(CalculatorError::unsafe_expr(format!(
                    "character '{}' is not allowed",
                    other
                )));
            }
        }
    }

    Ok(tokens)
}

/// Lex `digits [. digits] [e [+-] digits]` (or `. digits ...`) starting at `start`.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), CalculatorError> {
    let mut i = start;
    let mut saw_digit = false;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        saw_digit = true;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return Err(CalculatorError::unsafe_expr(
            "attribute access is not allowed",
        ));
    }
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        let exp_start = j;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
        if j == exp_start {
            return Err(CalculatorError::unsafe_expr("malformed numeric literal"));
        }
        i = j;
    }

    let literal: String = chars[start..i].iter().collect();
    literal
        .parse::<f64>()
        .map(|n| (n, i))
        .map_err(|_| CalculatorError::unsafe_expr(format!("malformed numeric literal '{}'", literal)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_operators() {
        let tokens = tokenize("2**3 * (1 - 4) / 2").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::DoubleStar,
                Token::Number(3.0),
                Token::Star,
                Token::LParen,
                Token::Number(1.0),
                Token::Minus,
                Token::Number(4.0),
                Token::RParen,
                Token::Slash,
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("1.").unwrap(), vec![Token::Number(1.0)]);
        assert_eq!(tokenize("2.5e3").unwrap(), vec![Token::Number(2500.0)]);
        assert_eq!(tokenize("1E-2").unwrap(), vec![Token::Number(0.01)]);
    }

    #[test]
    fn test_round_is_the_only_name() {
        assert_eq!(tokenize("round").unwrap(), vec![Token::Round]);
        assert!(tokenize("abs(1)").unwrap_err().is_unsafe());
        assert!(tokenize("__import__").unwrap_err().is_unsafe());
        assert!(tokenize("ROUND(1)").unwrap_err().is_unsafe());
    }

    #[test]
    fn test_rejects_foreign_characters() {
        for expr in ["'os'", "1 % 2", "[1]", "a.b", "1;2", "x=1", "1 @ 2"] {
            assert!(tokenize(expr).is_err(), "expected rejection: {expr}");
        }
    }

    #[test]
    fn test_rejects_malformed_exponent() {
        assert!(tokenize("1e").is_err());
        assert!(tokenize("1e+").is_err());
    }
}
