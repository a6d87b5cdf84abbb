//! Configuration schema for pkgdocs
//!
//! Configuration is stored at `~/.config/pkgdocs/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Registry connection settings
    pub registry: RegistryConfig,

    /// Page display settings
    pub display: DisplayConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Registry connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the package registry
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "https://package.elm-lang.org".to_string(),
            timeout_secs: 30,
            user_agent: format!("pkgdocs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Page display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colorize page output
    pub color: bool,

    /// Print cache statistics after each page
    pub show_footer: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_footer: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[registry]"));
        assert!(toml.contains("package.elm-lang.org"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.registry.timeout_secs, 30);
        assert!(config.display.show_footer);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [registry]
            base_url = "http://localhost:8000"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.registry.base_url, "http://localhost:8000");
        assert_eq!(config.registry.timeout_secs, 30); // default preserved
        assert_eq!(config.general.log_format, "text");
    }
}
