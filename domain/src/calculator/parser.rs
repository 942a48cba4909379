//! Recursive-descent parser and evaluator for calculator expressions.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | '(' expr ')' | 'round' '(' expr (',' expr)? ')'
//! ```
//!
//! `**` is right-associative and binds tighter than a unary minus on its
//! left, so `-2**2 == -4` and `2**-1 == 0.5`.

use super::error::CalculatorError;
use super::lexer::Token;

/// Maximum nesting of parentheses / unary operators
const MAX_DEPTH: usize = 64;

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Round(Box<Expr>, Option<Box<Expr>>),
}

impl Expr {
    /// Evaluate the tree.
    pub(crate) fn eval(&self) -> Result<f64, CalculatorError> {
        match self {
            Expr::Number(n) => Ok(*n),
            Expr::Neg(inner) => Ok(-inner.eval()?),
            Expr::Add(l, r) => Ok(l.eval()? + r.eval()?),
            Expr::Sub(l, r) => Ok(l.eval()? - r.eval()?),
            Expr::Mul(l, r) => Ok(l.eval()? * r.eval()?),
            Expr::Div(l, r) => {
                let numerator = l.eval()?;
                let divisor = r.eval()?;
                if divisor == 0.0 {
                    return Err(CalculatorError::arithmetic("division by zero"));
                }
                Ok(numerator / divisor)
            }
            Expr::Pow(base, exponent) => {
                let base = base.eval()?;
                let exponent = exponent.eval()?;
                if base == 0.0 && exponent < 0.0 {
                    return Err(CalculatorError::arithmetic(
                        "zero cannot be raised to a negative power",
                    ));
                }
                Ok(base.powf(exponent))
            }
            Expr::Round(value, ndigits) => {
                let value = value.eval()?;
                match ndigits {
                    None => Ok(value.round_ties_even()),
                    Some(ndigits) => round_to(value, ndigits.eval()?),
                }
            }
        }
    }
}

/// Round `value` to `ndigits` decimal places (negative rounds left of the point).
///
/// Rounds the exact binary value of `value`, so `round(1.725, 2) == 1.73`
/// because `1.725` is stored as `1.72500000000000008882...`. Exact ties go
/// to the even digit.
fn round_to(value: f64, ndigits: f64) -> Result<f64, CalculatorError> {
    if ndigits.fract() != 0.0 || !ndigits.is_finite() {
        return Err(CalculatorError::arithmetic(format!(
            "round() ndigits must be an integer, got {}",
            ndigits
        )));
    }
    if !value.is_finite() || ndigits > MAX_ROUND_DIGITS {
        return Ok(value);
    }

    let rounded = if ndigits >= 0.0 {
        format!("{:.*}", ndigits as usize, value)
    } else {
        round_integer_digits(value, (-ndigits).min(MAX_ROUND_DIGITS) as usize)
    };
    rounded
        .parse::<f64>()
        .map_err(|e| CalculatorError::arithmetic(format!("round() failed: {}", e)))
}

/// Beyond this many fractional digits every finite `f64` is already exact
const MAX_ROUND_DIGITS: f64 = 400.0;

/// Round `value` to a multiple of `10^places` and return it as a decimal string.
fn round_integer_digits(value: f64, places: usize) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let magnitude = value.abs();
    let digits = format!("{:.0}", magnitude.trunc());
    let has_fraction = magnitude.fract() != 0.0;

    if places > digits.len() {
        return format!("{}0", sign);
    }
    let (head, tail) = digits.split_at(digits.len() - places);
    let mut tail_digits = tail.bytes();
    let round_up = match tail_digits.next() {
        Some(b'6'..=b'9') => true,
        Some(b'5') => {
            let sticky = has_fraction || tail_digits.any(|d| d != b'0');
            sticky || head.bytes().last().is_some_and(|d| (d - b'0') % 2 == 1)
        }
        _ => false,
    };

    let mut head = if head.is_empty() { "0".to_string() } else { head.to_string() };
    if round_up {
        head = increment_decimal(&head);
    }
    format!("{}{}{}", sign, head, "0".repeat(places))
}

/// Add one to a string of ASCII decimal digits.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the whole token stream as one expression.
    pub(crate) fn parse(mut self) -> Result<Expr, CalculatorError> {
        if self.tokens.is_empty() {
            return Err(CalculatorError::unsafe_expr("empty expression"));
        }
        let expr = self.expr()?;
        match self.peek() {
            None => Ok(expr),
            Some(tok) => Err(CalculatorError::unsafe_expr(format!(
                "unexpected token '{}'",
                tok
            ))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token) -> Result<(), CalculatorError> {
        match self.next() {
            Some(tok) if tok == expected => Ok(()),
            Some(tok) => Err(CalculatorError::unsafe_expr(format!(
                "expected '{}', found '{}'",
                expected, tok
            ))),
            None => Err(CalculatorError::unsafe_expr(format!(
                "expected '{}', found end of expression",
                expected
            ))),
        }
    }

    fn descend(&mut self) -> Result<(), CalculatorError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalculatorError::unsafe_expr("expression is nested too deeply"));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Expr, CalculatorError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, CalculatorError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.unary()?));
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    lhs = Expr::Div(Box::new(lhs), Box::new(self.unary()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, CalculatorError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.ascend();
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let inner = self.unary()?;
                self.ascend();
                Ok(inner)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, CalculatorError> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::DoubleStar) {
            self.pos += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.ascend();
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, CalculatorError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::LParen) => {
                self.descend()?;
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                self.ascend();
                Ok(inner)
            }
            Some(Token::Round) => {
                self.expect(Token::LParen)?;
                self.descend()?;
                let value = self.expr()?;
                let ndigits = if self.peek() == Some(&Token::Comma) {
                    self.pos += 1;
                    Some(Box::new(self.expr()?))
                } else {
                    None
                };
                self.expect(Token::RParen)?;
                self.ascend();
                Ok(Expr::Round(Box::new(value), ndigits))
            }
            Some(tok) => Err(CalculatorError::unsafe_expr(format!(
                "unexpected token '{}'",
                tok
            ))),
            None => Err(CalculatorError::unsafe_expr("unexpected end of expression")),
        }
    }
}
