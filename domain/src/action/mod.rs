//! Action protocol
//!
//! Every model response is expected to be a single instruction in one of two
//! shapes:
//!
//! ```text
//! CALCULATE: <arithmetic expression>
//! FINAL: <answer>
//! ```
//!
//! The verb is case-insensitive and the payload runs to the end of the text,
//! so multi-line payloads (code, plans) are accepted. Anything else is a
//! [`ActionParseError`].

mod parsing;

pub use parsing::{ActionParseError, parse_action};

use serde::{Deserialize, Serialize};

/// A parsed model instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum Action {
    /// Request to evaluate an arithmetic expression with the calculator tool
    Calculate(String),
    /// The final answer, with protocol markers already removed
    Final(String),
}

impl Action {
    /// Protocol verb for this action
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Calculate(_) => "CALCULATE",
            Action::Final(_) => "FINAL",
        }
    }

    /// The payload text
    pub fn payload(&self) -> &str {
        match self {
            Action::Calculate(p) | Action::Final(p) => p,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.verb(), self.payload())
    }
}
