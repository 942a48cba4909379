//! Output formatting for single runs and batch files

pub mod batch;
pub mod console;
pub mod formatter;
