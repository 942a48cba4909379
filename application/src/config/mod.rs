//! Application configuration
//!
//! Static parameters for running the agent, built by the binary from the
//! loaded file configuration and CLI overrides.

pub mod execution_params;

pub use execution_params::ExecutionParams;
