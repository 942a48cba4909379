//! Core domain concepts shared across all subdomains.
//!
//! - [`task::Task`]: the natural-language input of one run

pub mod task;
