//! Provider configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible endpoint settings.
///
/// # Example
///
/// ```toml
/// [provider]
/// base_url = "http://localhost:8000/v1"
/// model = "qwen2.5-7b-instruct"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_seconds = 60
/// max_output_tokens = 512
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Base URL of the API; `/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer `api_key_env`).
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout_seconds: u64,
    /// Completion length cap per request.
    pub max_output_tokens: u32,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1".to_string(),
            model: "default".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            timeout_seconds: 60,
            max_output_tokens: 512,
        }
    }
}

impl FileProviderConfig {
    /// Resolve the API key: literal key first, then the configured env var.
    ///
    /// Local OpenAI-compatible servers often need no key, so a missing key
    /// is not an error here.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key
            && !key.is_empty()
        {
            return Some(key.clone());
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}
