//! Output configuration from TOML (`[output]` section)
//!
//! ```toml
//! [output]
//! format = "full"   # answer | full | json
//! color = false
//! ```

use reasoner_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// How results are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Default format when `--output` is not given. Unset means the bare answer.
    pub format: Option<OutputFormat>,
    /// Colored progress and `full` output. `--no-color` always wins.
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl FileOutputConfig {
    /// Format to print with: the command-line choice, then this section, then `answer`
    pub fn resolve_format(&self, cli_format: Option<OutputFormat>) -> OutputFormat {
        cli_format.or(self.format).unwrap_or_default()
    }

    /// Whether colors stay enabled given the `--no-color` flag
    pub fn use_color(&self, no_color_flag: bool) -> bool {
        self.color && !no_color_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    #[test]
    fn test_output_section_deserialize() {
        let toml_str = r#"
[output]
format = "full"
color = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
    }

    #[test]
    fn test_format_precedence() {
        let unset = FileOutputConfig::default();
        assert_eq!(unset.resolve_format(None), OutputFormat::Answer);

        let config = FileOutputConfig {
            format: Some(OutputFormat::Json),
            color: true,
        };
        assert_eq!(config.resolve_format(None), OutputFormat::Json);
        assert_eq!(config.resolve_format(Some(OutputFormat::Full)), OutputFormat::Full);
    }

    #[test]
    fn test_no_color_flag_wins() {
        let config = FileOutputConfig::default();
        assert!(config.use_color(false));
        assert!(!config.use_color(true));

        let disabled = FileOutputConfig {
            format: None,
            color: false,
        };
        assert!(!disabled.use_color(false));
    }
}
