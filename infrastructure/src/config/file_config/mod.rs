//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod logging;
mod output;
mod provider;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;

use reasoner_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key path, e.g. `provider.model`
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint settings
    pub provider: FileProviderConfig,
    /// Agent loop settings
    pub agent: FileAgentConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

/// Temperatures above this are accepted by most servers but rarely useful
const MAX_TEMPERATURE: f32 = 2.0;

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make a run impossible; warnings are reported and ignored.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.provider.model.trim().is_empty() {
            issues.push(ConfigIssue::error("provider.model", "model name cannot be empty"));
        }
        if self.provider.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error("provider.base_url", "base URL cannot be empty"));
        } else if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            issues.push(ConfigIssue::error(
                "provider.base_url",
                format!("'{}' is not an http(s) URL", self.provider.base_url),
            ));
        }
        if self.provider.timeout_seconds == 0 {
            issues.push(ConfigIssue::error("provider.timeout_seconds", "timeout cannot be 0"));
        }
        if self.provider.max_output_tokens == 0 {
            issues.push(ConfigIssue::error(
                "provider.max_output_tokens",
                "max_output_tokens cannot be 0",
            ));
        }

        for (field, value) in [
            ("agent.ensemble_temperature", self.agent.ensemble_temperature),
            (
                "agent.deterministic_temperature",
                self.agent.deterministic_temperature,
            ),
        ] {
            if !(0.0..=MAX_TEMPERATURE).contains(&value) {
                issues.push(ConfigIssue::error(
                    field,
                    format!("{} is outside 0.0..={}", value, MAX_TEMPERATURE),
                ));
            }
        }
        if self.agent.ensemble_temperature == 0.0 {
            issues.push(ConfigIssue::error(
                "agent.ensemble_temperature",
                "ensemble passes need a non-zero temperature",
            ));
        }
        if self.agent.deterministic_temperature > 0.0 {
            issues.push(ConfigIssue::warning(
                "agent.deterministic_temperature",
                "non-zero temperature makes the tool loop and format check non-deterministic",
            ));
        }

        issues
    }

    /// Build run parameters from the `[agent]` and `[provider]` sections
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_uses(self.agent.max_tool_uses)
            .with_ensemble_temperature(self.agent.ensemble_temperature)
            .with_deterministic_temperature(self.agent.deterministic_temperature)
            .with_max_output_tokens(self.provider.max_output_tokens)
    }

    /// Render the effective configuration as TOML, with any literal API key masked
    pub fn to_toml_redacted(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if shown.provider.api_key.is_some() {
            shown.provider.api_key = Some("***".to_string());
        }
        toml::to_string_pretty(&shown)
    }
}
