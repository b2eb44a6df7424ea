//! Emission settings
//!
//! Settings can be read from the `[emit]` table of a TOML file:
//!
//! ```toml
//! [emit]
//! escape = "always"
//! log_diagnostics = false
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// How VHDL names are spelled in the Verilog output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeMode {
    /// Escape only names that are not legal Verilog identifiers or are keywords
    #[default]
    AsNeeded,
    /// Emit every name as an escaped identifier (`\name `)
    Always,
}

/// Settings for Verilog emission
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    /// Identifier escaping policy
    pub escape: EscapeMode,
    /// Echo every reported diagnostic through `log::error!`
    pub log_diagnostics: bool,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            escape: EscapeMode::AsNeeded,
            log_diagnostics: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    emit: EmitConfig,
}

/// Parse emission settings from a TOML string
pub fn from_str(s: &str) -> Result<EmitConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(file.emit)
}

/// Parse emission settings from a TOML file
pub fn from_path(path: impl AsRef<Path>) -> Result<EmitConfig, ConfigError> {
    let contents =
        std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
    from_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = from_str("").unwrap();
        assert_eq!(config, EmitConfig::default());
        assert_eq!(config.escape, EscapeMode::AsNeeded);
        assert!(config.log_diagnostics);
    }

    #[test]
    fn test_emit_table() {
        let toml = r#"
            [emit]
            escape = "always"
            log_diagnostics = false
        "#;

        let config = from_str(toml).unwrap();
        assert_eq!(config.escape, EscapeMode::Always);
        assert!(!config.log_diagnostics);
    }

    #[test]
    fn test_partial_emit_table() {
        let config = from_str("[emit]\nlog_diagnostics = false\n").unwrap();
        assert_eq!(config.escape, EscapeMode::AsNeeded);
        assert!(!config.log_diagnostics);
    }

    #[test]
    fn test_bad_escape_mode() {
        let err = from_str("[emit]\nescape = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = from_path("/nonexistent/skalp-vhdl.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
