//! Agent configuration from TOML (`[agent]` section)

use reasoner_application::config::execution_params::{
    DEFAULT_DETERMINISTIC_TEMPERATURE, DEFAULT_ENSEMBLE_TEMPERATURE,
};
use reasoner_domain::DEFAULT_MAX_TOOL_USES;
use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_tool_uses = 2
/// ensemble_temperature = 0.7
/// deterministic_temperature = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Calculator calls allowed per run
    pub max_tool_uses: usize,
    /// Sampling temperature for ensemble verification passes
    pub ensemble_temperature: f32,
    /// Sampling temperature for the tool loop and self-verification
    pub deterministic_temperature: f32,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_tool_uses: DEFAULT_MAX_TOOL_USES,
            ensemble_temperature: DEFAULT_ENSEMBLE_TEMPERATURE,
            deterministic_temperature: DEFAULT_DETERMINISTIC_TEMPERATURE,
        }
    }
}
