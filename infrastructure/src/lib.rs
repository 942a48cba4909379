//! Infrastructure layer for reasoner
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileAgentConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, Severity,
};
pub use logging::JsonlConversationLogger;
pub use providers::OpenAiGateway;
