//! taskdeck configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main taskdeck configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend selection ("http" or "memory")
    pub backend: String,

    /// REST API configuration
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.backend.as_str(), "http" | "memory") {
            return Err(eyre::eyre!(
                "Unknown backend '{}'. Supported: http, memory",
                self.backend
            ));
        }
        if self.backend == "http" && !self.api.base_url.starts_with("http") {
            return Err(eyre::eyre!(
                "api.base-url must be an http(s) URL, got '{}'",
                self.api.base_url
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .taskdeck.yml
        let local_config = PathBuf::from(".taskdeck.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/taskdeck/taskdeck.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("taskdeck").join("taskdeck.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the task backend
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_ms: 30_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.backend, "http");
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
backend: http

api:
  base-url: https://tasks.example.com/v1
  timeout-ms: 5000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.api.base_url, "https://tasks.example.com/v1");
        assert_eq!(config.api.timeout_ms, 5000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
api:
  base-url: http://127.0.0.1:8080/api
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/api");

        // Defaults for unspecified
        assert_eq!(config.backend, "http");
        assert_eq!(config.api.timeout_ms, 30_000);
    }

    #[test]
    fn test_validate_rejects_unknown_backend() {
        let config = Config {
            backend: "carrier-pigeon".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "backend: memory").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.backend, "memory");
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/taskdeck.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
