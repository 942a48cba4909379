//! Prompt domain
//!
//! Per-domain output contracts and the templates that embed them into the
//! prompts of each stage.

pub mod contract;
mod template;

pub use contract::{DomainContract, contract_for};
pub use template::PromptTemplate;
