//! Domain layer for reasoner
//!
//! This crate contains the pure decision logic of the agent. It performs no
//! I/O and knows nothing about model providers or configuration files.
//!
//! # Core Concepts
//!
//! ## Classification
//!
//! Each task is assigned one [`TaskDomain`] by an ordered table of lexical
//! rules before the first model call. The domain is fixed for the rest of
//! the run.
//!
//! ## Action protocol
//!
//! The model answers with one line, `CALCULATE: <expr>` or `FINAL: <answer>`,
//! parsed into an [`Action`]. Markers never leave this layer: a
//! `FINAL` payload is the plain answer string.
//!
//! ## Calculator
//!
//! A recursive-descent evaluator over numbers, `+ - * / **`, parentheses and
//! `round`, with no other names reachable.
//!
//! ## Ensemble
//!
//! Plurality voting over repeated verification passes, first-seen tie-break.

pub mod action;
pub mod agent;
pub mod calculator;
pub mod classification;
pub mod config;
pub mod core;
pub mod ensemble;
pub mod prompt;

// Re-export commonly used types
pub use action::{Action, ActionParseError, parse_action};
pub use agent::{
    DEFAULT_MAX_TOOL_USES, RunStage, ToolBudget, ToolBudgetExceeded, ToolInvocation,
    ToolLoopState,
};
pub use calculator::{CalculatorError, evaluate, format_value};
pub use classification::{TaskDomain, classify};
pub use config::OutputFormat;
pub use core::task::Task;
pub use ensemble::{Ballot, BallotSource, ENSEMBLE_PASSES, PluralityOutcome};
pub use prompt::{DomainContract, PromptTemplate, contract_for};
