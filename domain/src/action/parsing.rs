//! Action response parsing.
//!
//! Pure text matching over one model response; no I/O.

use super::Action;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Wire format: optional whitespace, verb, colon, payload to end of text.
static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)^\s*(CALCULATE|FINAL)\s*:\s*(.+?)\s*$").expect("action regex is valid")
});

/// A protocol verb at the start of a payload, with or without text after it.
static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(CALCULATE|FINAL)\s*:").expect("marker regex is valid")
});

/// Longest excerpt of the raw response kept in error messages
const MAX_EXCERPT_CHARS: usize = 200;

/// The response did not match the one-line action protocol.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized action format: {excerpt:?}")]
pub struct ActionParseError {
    /// Leading part of the offending response
    pub excerpt: String,
}

impl ActionParseError {
    fn new(raw: &str) -> Self {
        Self {
            excerpt: raw.chars().take(MAX_EXCERPT_CHARS).collect(),
        }
    }
}

/// Parse a model response into an [`Action`].
///
/// A `FINAL` payload that itself starts with `FINAL:` (models sometimes echo
/// `FINAL: FINAL: 42`) is unwrapped. A `FINAL` payload that starts with
/// `CALCULATE:` is rejected, so a returned answer never carries a marker.
///
/// # Examples
///
/// ```
/// use reasoner_domain::action::{Action, parse_action};
///
/// assert_eq!(parse_action("FINAL: 42").unwrap(), Action::Final("42".into()));
/// assert_eq!(parse_action("calculate: 1+1").unwrap(), Action::Calculate("1+1".into()));
/// assert!(parse_action("42").is_err());
/// ```
pub fn parse_action(text: &str) -> Result<Action, ActionParseError> {
    let (verb, payload) = split_action(text).ok_or_else(|| ActionParseError::new(text))?;

    if verb.eq_ignore_ascii_case("CALCULATE") {
        return Ok(Action::Calculate(payload.to_string()));
    }

    let mut answer = payload;
    while let Some((inner_verb, inner_payload)) = split_action(answer) {
        if !inner_verb.eq_ignore_ascii_case("FINAL") {
            return Err(ActionParseError::new(text));
        }
        answer = inner_payload;
    }
    if MARKER_RE.is_match(answer) {
        return Err(ActionParseError::new(text));
    }
    Ok(Action::Final(answer.to_string()))
}

fn split_action(text: &str) -> Option<(&str, &str)> {
    let caps = ACTION_RE.captures(text.trim())?;
    let verb = caps.get(1)?.as_str();
    let payload = caps.get(2)?.as_str().trim();
    Some((verb, payload))
}
