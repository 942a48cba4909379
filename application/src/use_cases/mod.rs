//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub(crate) mod ensemble_verify;
pub mod run_agent;
pub mod self_verify;
pub(crate) mod shared;
pub(crate) mod tool_loop;
