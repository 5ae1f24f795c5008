//! Config command - View and manage fbmarketing configuration
//!
//! Provides the `fbmarketing config` CLI command which:
//! 1. Shows the current configuration (YAML or JSON), with the secret masked
//! 2. Sets individual configuration values via dot-notation keys
//! 3. Validates the configuration file and reports errors

use anyhow::{Context, Result};
use clap::Subcommand;
use fbmarketing_graph::config::Config;
use tracing::info;

use super::Session;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "client.limit")
        key: String,
        /// New value
        value: String,
    },
    /// Validate configuration file
    Validate,
}

/// Keys accepted by `config set`, with a short description
const SUPPORTED_KEYS: &[(&str, &str)] = &[
    ("app.app_id", "Facebook App ID"),
    ("app.app_secret", "App secret"),
    ("app.version", "Graph API version, e.g. v12.0"),
    ("client.paginate", "true|false"),
    ("client.limit", "Page size for list endpoints"),
    ("client.max_pages", "Page cap per call, or 'none'"),
    ("client.graph_host", "Alternative Graph host, or 'none'"),
    ("logging.level", "trace|debug|info|warn|error"),
];

impl ConfigCommand {
    /// Execute the config command
    pub async fn execute(&self, session: &Session, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format == OutputFormat::Json);
        match self {
            ConfigCommand::Show => self.execute_show(session, format, &*formatter),
            ConfigCommand::Set { key, value } => {
                self.execute_set(session, key, value, format, &*formatter)
            }
            ConfigCommand::Validate => self.execute_validate(session, format, &*formatter),
        }
    }

    fn execute_show(
        &self,
        session: &Session,
        format: OutputFormat,
        formatter: &dyn OutputFormatter,
    ) -> Result<()> {
        let config = masked(&session.config);

        info!(config_path = %session.config_path.display(), "Showing configuration");

        if format == OutputFormat::Json {
            let json = serde_json::to_value(&config)
                .context("Failed to serialize configuration to JSON")?;
            formatter.print_json(&json);
        } else {
            formatter.success(&format!("Configuration ({})", session.config_path.display()));
            formatter.info("");

            let yaml = serde_yaml::to_string(&config)
                .context("Failed to serialize configuration to YAML")?;
            for line in yaml.lines() {
                formatter.info(line);
            }
        }

        Ok(())
    }

    fn execute_set(
        &self,
        session: &Session,
        key: &str,
        value: &str,
        format: OutputFormat,
        formatter: &dyn OutputFormatter,
    ) -> Result<()> {
        let config_path = &session.config_path;
        let mut config = session.config.clone();

        info!(key = %key, "Setting configuration value");

        if let Err(e) = apply_config_value(&mut config, key, value) {
            if format == OutputFormat::Json {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "error": e.to_string(),
                }));
            } else {
                formatter.error(&format!("Failed to set '{}': {}", key, e));
                formatter.info("");
                formatter.info("Supported keys:");
                for (key, description) in SUPPORTED_KEYS {
                    formatter.info(&format!("  {:<20} - {}", key, description));
                }
            }
            return Ok(());
        }

        let errors = config.validate();
        if !errors.is_empty() {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            if format == OutputFormat::Json {
                formatter.print_json(&serde_json::json!({
                    "success": false,
                    "key": key,
                    "errors": messages,
                }));
            } else {
                formatter.error(&format!(
                    "Invalid value for '{}': {}",
                    key,
                    messages.join("; ")
                ));
            }
            return Ok(());
        }

        config.save(config_path)?;

        let shown = if key == "app.app_secret" { "********" } else { value };
        if format == OutputFormat::Json {
            formatter.print_json(&serde_json::json!({
                "success": true,
                "key": key,
                "value": shown,
                "config_path": config_path.display().to_string(),
            }));
        } else {
            formatter.success(&format!("Set {} = {}", key, shown));
            formatter.info(&format!("Saved to {}", config_path.display()));
        }

        Ok(())
    }

    fn execute_validate(
        &self,
        session: &Session,
        format: OutputFormat,
        formatter: &dyn OutputFormatter,
    ) -> Result<()> {
        let config_path = &session.config_path;

        // Load explicitly: a parse error must be reported, not defaulted away
        let config = match Config::load(config_path) {
            Ok(config) => config,
            Err(e) => {
                let message = if config_path.exists() {
                    format!("Failed to parse configuration: {e:#}")
                } else {
                    "Configuration file not found. Using defaults.".to_string()
                };
                if format == OutputFormat::Json {
                    formatter.print_json(&serde_json::json!({
                        "valid": false,
                        "config_path": config_path.display().to_string(),
                        "errors": [message],
                    }));
                } else {
                    formatter.error(&message);
                    formatter.info(&format!("File: {}", config_path.display()));
                }
                return Ok(());
            }
        };

        info!(config_path = %config_path.display(), "Validating configuration");

        let errors = config.validate();

        if format == OutputFormat::Json {
            let error_strings: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            formatter.print_json(&serde_json::json!({
                "valid": errors.is_empty(),
                "config_path": config_path.display().to_string(),
                "errors": error_strings,
            }));
        } else if errors.is_empty() {
            formatter.success("Configuration is valid");
            formatter.info(&format!("File: {}", config_path.display()));
            if config.app.app_id.is_none() || config.app.app_secret.is_none() {
                formatter.warn("app.app_id or app.app_secret is not set");
            }
        } else {
            formatter.error(&format!(
                "Configuration has {} error{}:",
                errors.len(),
                if errors.len() == 1 { "" } else { "s" }
            ));
            formatter.info(&format!("File: {}", config_path.display()));
            formatter.info("");
            for error in &errors {
                formatter.info(&format!("  {} - {}", error.field, error.message));
            }
        }

        Ok(())
    }
}

/// Copy of `config` safe to print
fn masked(config: &Config) -> Config {
    let mut config = config.clone();
    if config.app.app_secret.is_some() {
        config.app.app_secret = Some("********".to_string());
    }
    config
}

/// `None` for an empty value or the literal `none`
fn optional(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(value.to_string())
    }
}

/// Apply a dot-notation key/value pair to a Config struct
fn apply_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        // --- app ---
        "app.app_id" => config.app.app_id = optional(value),
        "app.app_secret" => config.app.app_secret = optional(value),
        "app.version" => config.app.version = value.to_string(),

        // --- client ---
        "client.paginate" => {
            config.client.paginate = value
                .parse::<bool>()
                .context("Expected 'true' or 'false' for client.paginate")?;
        }
        "client.limit" => {
            config.client.limit = value
                .parse::<u32>()
                .context("Expected a positive integer for client.limit")?;
        }
        "client.max_pages" => {
            config.client.max_pages = optional(value)
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("Expected a positive integer or 'none' for client.max_pages")?;
        }
        "client.graph_host" => config.client.graph_host = optional(value),

        // --- logging ---
        "logging.level" => config.logging.level = value.to_string(),

        _ => {
            anyhow::bail!("Unknown configuration key: '{}'", key);
        }
    }

    Ok(())
}
