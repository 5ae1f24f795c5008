//! CLI subcommands and the state they share
//!
//! [`Session`] resolves the configuration file and the credential flags
//! once, and builds a [`GraphClient`] for commands that talk to the API.

pub mod auth;
pub mod call;
pub mod config;
pub mod endpoints;

use std::{fmt, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fbmarketing_graph::{config::Config, GraphClient};
use tracing::debug;

/// Credential flags; each falls back to an environment variable
#[derive(Clone, Default, Args)]
pub struct CredentialArgs {
    /// Facebook App ID (overrides app.app_id)
    #[arg(long, env = "FB_APP_ID", global = true)]
    pub app_id: Option<String>,

    /// App secret (overrides app.app_secret)
    #[arg(long, env = "FB_APP_SECRET", global = true, hide_env_values = true)]
    pub app_secret: Option<String>,

    /// User, page or app access token for authenticated calls
    #[arg(long, env = "FB_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub access_token: Option<String>,
}

impl fmt::Debug for CredentialArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("CredentialArgs")
            .field("app_id", &self.app_id)
            .field("app_secret", &redacted(&self.app_secret))
            .field("access_token", &redacted(&self.access_token))
            .finish()
    }
}

/// Configuration and credentials resolved for one invocation
#[derive(Debug)]
pub struct Session {
    pub config_path: PathBuf,
    pub config: Config,
    credentials: CredentialArgs,
}

impl Session {
    /// Loads the config at `config_path` (or the default path), falling back
    /// to defaults when the file does not exist
    pub fn load(config_path: Option<&str>, credentials: CredentialArgs) -> Self {
        let config_path = config_path
            .map(PathBuf::from)
            .unwrap_or_else(Config::default_path);
        let config = Config::load_or_default(&config_path);
        debug!(config_path = %config_path.display(), "Loaded configuration");
        Self {
            config_path,
            config,
            credentials,
        }
    }

    /// Config with the credential flags applied on top
    pub fn effective_config(&self) -> Config {
        let mut config = self.config.clone();
        if let Some(app_id) = &self.credentials.app_id {
            config.app.app_id = Some(app_id.clone());
        }
        if let Some(app_secret) = &self.credentials.app_secret {
            config.app.app_secret = Some(app_secret.clone());
        }
        config
    }

    pub fn access_token(&self) -> Option<&str> {
        self.credentials
            .access_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }

    /// Builds a client, with the access token set when one was given
    pub fn client(&self) -> Result<GraphClient> {
        let mut client = GraphClient::from_config(&self.effective_config()).context(
            "Missing app credentials. Use --app-id/--app-secret, FB_APP_ID/FB_APP_SECRET \
             or 'fbmarketing config set app.app_id <id>'",
        )?;
        if let Some(token) = self.access_token() {
            client.set_access_token(token);
        }
        Ok(client)
    }
}
