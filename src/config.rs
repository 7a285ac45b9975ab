//! # Configuration
//!
//! Centralizes the settings the network core consumes, with a clear
//! override hierarchy: defaults → config file → env vars.
//!
//! The embedding app decides where the config file lives and passes the
//! path in; a missing file just means defaults.

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info};
use serde::Deserialize;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct VitrineConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://fakenft.example.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Load config from the given TOML file.
///
/// A missing file is not an error; it yields `VitrineConfig::default()`.
/// An existing but malformed file returns `ConfigError::Parse`.
pub fn load_config(path: &Path) -> Result<VitrineConfig, ConfigError> {
    if !path.exists() {
        info!("no config file at {}, using defaults", path.display());
        return Ok(VitrineConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: VitrineConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("loaded config from {}", path.display());
    debug!("config: {:?}", config);
    Ok(config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &VitrineConfig) -> ResolvedConfig {
    // Base URL: env → config → default
    let base_url = std::env::var("VITRINE_BASE_URL")
        .ok()
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default
    let timeout_secs = std::env::var("VITRINE_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .or(config.api.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = VitrineConfig::default();
        let resolved = resolve(&config);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = VitrineConfig {
            api: ApiConfig {
                base_url: Some("https://staging.example.com".to_string()),
                timeout_secs: Some(5),
            },
        };
        let resolved = resolve(&config);
        assert_eq!(resolved.base_url, "https://staging.example.com");
        assert_eq!(resolved.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[api]
timeout_secs = 30
"#;
        let config: VitrineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.timeout_secs, Some(30));
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_empty_toml_parses() {
        let config: VitrineConfig = toml::from_str("").unwrap();
        assert!(config.api.base_url.is_none());
        assert!(config.api.timeout_secs.is_none());
    }
}
