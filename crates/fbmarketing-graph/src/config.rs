//! Configuration module for fbmarketing.
//!
//! Typed configuration structs that map to the YAML configuration file, with
//! loading, saving, validation, defaults, and a builder for programmatic use.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::client::{DEFAULT_LIMIT, DEFAULT_VERSION};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub client: ClientConfig,
    pub logging: LoggingConfig,
}

/// Facebook App credentials.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Facebook App ID. `None` until set.
    pub app_id: Option<String>,
    /// App secret, used for `appsecret_proof` and the OAuth token endpoints.
    pub app_secret: Option<String>,
    /// Graph API version, with or without the leading `v`.
    pub version: String,
}

/// Request behavior of the Graph client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Follow `paging.next` on GET responses.
    pub paginate: bool,
    /// Page size sent as `limit` by list endpoints.
    pub limit: u32,
    /// Upper bound on pages fetched by one call. `None` is unbounded.
    pub max_pages: Option<u32>,
    /// Alternative Graph host, e.g. a local mock server.
    pub graph_host: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            app_secret: None,
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_id", &self.app_id)
            .field(
                "app_secret",
                &self.app_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("version", &self.version)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            paginate: true,
            limit: DEFAULT_LIMIT,
            max_pages: None,
            graph_host: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading and saving
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Write the configuration to `path` as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create configuration directory")?;
        }
        let yaml = serde_yaml::to_string(self).context("Failed to serialize configuration")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/fbmarketing/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("fbmarketing")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"client.limit"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid. Missing credentials
    /// are not errors here; they are reported when a client is built.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- app ---
        if self.app.app_id.as_deref() == Some("") {
            errors.push(ValidationError {
                field: "app.app_id".into(),
                message: "must not be empty".into(),
            });
        }
        if self.app.app_secret.as_deref() == Some("") {
            errors.push(ValidationError {
                field: "app.app_secret".into(),
                message: "must not be empty".into(),
            });
        }
        if !is_valid_version(&self.app.version) {
            errors.push(ValidationError {
                field: "app.version".into(),
                message: format!(
                    "expected a version like 'v12.0' or '12.0', got '{}'",
                    self.app.version
                ),
            });
        }

        // --- client ---
        if self.client.limit == 0 {
            errors.push(ValidationError {
                field: "client.limit".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.client.max_pages == Some(0) {
            errors.push(ValidationError {
                field: "client.max_pages".into(),
                message: "must be greater than 0 when set".into(),
            });
        }
        if let Some(host) = &self.client.graph_host {
            match url::Url::parse(host) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => errors.push(ValidationError {
                    field: "client.graph_host".into(),
                    message: format!("not an http(s) URL: {host}"),
                }),
            }
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid log level '{}', expected one of: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

/// `v12.0`, `12.0`, `v2.10`: optional `v`, then dot-separated numbers
fn is_valid_version(version: &str) -> bool {
    let digits = version.trim().trim_start_matches('v');
    !digits.is_empty()
        && digits
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for [`Config`], starting from defaults.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.config.app.app_id = Some(app_id.into());
        self
    }

    pub fn app_secret(mut self, app_secret: impl Into<String>) -> Self {
        self.config.app.app_secret = Some(app_secret.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.app.version = version.into();
        self
    }

    pub fn paginate(mut self, paginate: bool) -> Self {
        self.config.client.paginate = paginate;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.config.client.limit = limit;
        self
    }

    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.client.max_pages = Some(max_pages);
        self
    }

    pub fn graph_host(mut self, host: impl Into<String>) -> Self {
        self.config.client.graph_host = Some(host.into());
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
