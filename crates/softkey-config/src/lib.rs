//! Softkey configuration system
//!
//! Loads embedding-level settings from `softkey.toml` as an alternative to
//! environment variables. The core engine never reads configuration; these
//! values are applied by the composition roots (FFI init, demo binary).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for a softkey embedding
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SoftkeyConfig {
    /// Diagnostic logging settings
    pub diagnostics: DiagnosticsConfig,
    /// Metrics normalization settings
    pub metrics: MetricsConfig,
}

/// Diagnostic logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Start with the diagnostic sink enabled (host `startLogging` /
    /// `stopLogging` calls can flip it later)
    pub enabled: bool,
}

/// Metrics normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Override the platform-reported density factor (physical px per
    /// device-independent unit); useful on hosts that misreport it
    pub density_override: Option<f64>,
}

impl SoftkeyConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the softkey.toml configuration file
    ///
    /// # Returns
    /// * `Ok(SoftkeyConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from the default location (softkey.toml in the
    /// current directory) or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("softkey.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("SOFTKEY_DIAGNOSTICS") {
            self.diagnostics.enabled = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("SOFTKEY_DENSITY_OVERRIDE") {
            if let Ok(density) = val.parse::<f64>() {
                self.metrics.density_override = Some(density);
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from softkey.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SoftkeyConfig::default();
        assert!(!config.diagnostics.enabled);
        assert!(config.metrics.density_override.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let config = SoftkeyConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: SoftkeyConfig = toml::from_str(&toml_str).unwrap();
        assert!(!parsed.diagnostics.enabled);
    }

    #[test]
    fn test_parse_partial_file() {
        let parsed: SoftkeyConfig = toml::from_str("[diagnostics]\nenabled = true\n").unwrap();
        assert!(parsed.diagnostics.enabled);
        assert!(parsed.metrics.density_override.is_none());
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if softkey.toml doesn't exist
        let config = SoftkeyConfig::load_or_default();
        assert!(config.metrics.density_override.is_none());
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("SOFTKEY_DIAGNOSTICS", "true");
            std::env::set_var("SOFTKEY_DENSITY_OVERRIDE", "2.625");
        }

        let mut config = SoftkeyConfig::default();
        config.merge_with_env();

        assert!(config.diagnostics.enabled);
        assert_eq!(config.metrics.density_override, Some(2.625));

        unsafe {
            std::env::remove_var("SOFTKEY_DIAGNOSTICS");
            std::env::remove_var("SOFTKEY_DENSITY_OVERRIDE");
        }
    }
}
