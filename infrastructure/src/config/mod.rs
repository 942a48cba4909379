//! Configuration file loading for reasoner
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `REASONER_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./reasoner.toml` or `./.reasoner.toml`
//! 4. Global: `$XDG_CONFIG_HOME/reasoner/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileAgentConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, Severity,
};
pub use loader::ConfigLoader;
