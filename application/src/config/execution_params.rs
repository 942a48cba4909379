//! Execution parameters: use case loop control.
//!
//! [`ExecutionParams`] groups the static parameters that control one run of
//! [`RunAgentUseCase`](crate::use_cases::run_agent::RunAgentUseCase).
//! These are application-layer concerns, not domain policy.

use reasoner_domain::DEFAULT_MAX_TOOL_USES;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default sampling temperature for ensemble verification passes
pub const DEFAULT_ENSEMBLE_TEMPERATURE: f32 = 0.7;

/// Default sampling temperature for the tool loop and self-verification
pub const DEFAULT_DETERMINISTIC_TEMPERATURE: f32 = 0.0;

/// Default completion length cap per model call
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;

/// Execution loop control parameters.
///
/// | Stage               | Temperature                 |
/// |---------------------|-----------------------------|
/// | Tool loop           | `deterministic_temperature` |
/// | Ensemble passes     | `ensemble_temperature`      |
/// | Self-verification   | `deterministic_temperature` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum calculator calls in the tool-use loop.
    pub max_tool_uses: usize,
    /// Sampling temperature for the ensemble verification passes. Always > 0.
    pub ensemble_temperature: f32,
    /// Sampling temperature for every other model call.
    pub deterministic_temperature: f32,
    /// Completion length cap sent with each request.
    pub max_output_tokens: u32,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_uses: DEFAULT_MAX_TOOL_USES,
            ensemble_temperature: DEFAULT_ENSEMBLE_TEMPERATURE,
            deterministic_temperature: DEFAULT_DETERMINISTIC_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_tool_uses(mut self, max: usize) -> Self {
        self.max_tool_uses = max;
        self
    }

    /// Set the ensemble temperature.
    ///
    /// Ensemble passes must sample, so a value that is not strictly positive
    /// is ignored and the current temperature is kept.
    pub fn with_ensemble_temperature(mut self, temperature: f32) -> Self {
        if temperature > 0.0 && temperature.is_finite() {
            self.ensemble_temperature = temperature;
        } else {
            warn!(
                temperature,
                kept = self.ensemble_temperature,
                "Ignoring non-positive ensemble temperature"
            );
        }
        self
    }

    pub fn with_deterministic_temperature(mut self, temperature: f32) -> Self {
        self.deterministic_temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_tool_uses, 2);
        assert_eq!(params.ensemble_temperature, 0.7);
        assert_eq!(params.deterministic_temperature, 0.0);
        assert_eq!(params.max_output_tokens, 512);
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_tool_uses(5)
            .with_ensemble_temperature(1.0)
            .with_max_output_tokens(128);

        assert_eq!(params.max_tool_uses, 5);
        assert_eq!(params.ensemble_temperature, 1.0);
        assert_eq!(params.deterministic_temperature, 0.0);
        assert_eq!(params.max_output_tokens, 128);
    }

    #[test]
    fn test_non_positive_ensemble_temperature_is_ignored() {
        for temperature in [0.0, -0.5, f32::NAN] {
            let params = ExecutionParams::default().with_ensemble_temperature(temperature);
            assert_eq!(params.ensemble_temperature, DEFAULT_ENSEMBLE_TEMPERATURE);
        }

        let params = ExecutionParams::default()
            .with_ensemble_temperature(1.2)
            .with_ensemble_temperature(0.0);
        assert_eq!(params.ensemble_temperature, 1.2);
    }
}
