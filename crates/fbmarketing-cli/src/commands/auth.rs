//! Auth commands - OAuth helpers
//!
//! Provides the `fbmarketing auth` CLI subcommands which:
//! 1. `url`       - Prints the OAuth login dialog URL (no request)
//! 2. `app-token` - Generates an app access token
//! 3. `exchange`  - Exchanges an OAuth code for a user token
//! 4. `extend`    - Trades a short-lived user token for a long-lived one
//! 5. `inspect`   - Inspects a token with debug_token

use anyhow::{Context, Result};
use clap::Subcommand;
use fbmarketing_graph::auth::TokenResponse;
use tracing::info;

use super::Session;
use crate::output::{get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Print the OAuth login dialog URL
    Url {
        /// Redirect URI registered in the app settings
        #[arg(long)]
        redirect_uri: String,
        /// Opaque value echoed back to the redirect
        #[arg(long)]
        state: String,
        /// Permission to request (repeatable)
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },
    /// Generate an app access token
    AppToken,
    /// Exchange an OAuth code for a user access token
    Exchange {
        #[arg(long)]
        redirect_uri: String,
        #[arg(long)]
        code: String,
    },
    /// Trade a short-lived user token for a long-lived one
    Extend {
        /// Token to extend (defaults to --access-token)
        #[arg(long)]
        token: Option<String>,
    },
    /// Inspect an access token
    Inspect {
        /// Token to inspect
        #[arg(long)]
        input_token: String,
        /// App token or developer user token (defaults to --access-token)
        #[arg(long)]
        token: Option<String>,
    },
}

impl AuthCommand {
    pub async fn execute(&self, session: &Session, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format == OutputFormat::Json);
        match self {
            AuthCommand::Url {
                redirect_uri,
                state,
                scopes,
            } => self.execute_url(session, redirect_uri, state, scopes, &*fmt),
            AuthCommand::AppToken => {
                let client = session.client()?;
                let token = client
                    .get_app_token()
                    .await
                    .context("Failed to generate app token")?;
                print_token(&token, "App token generated", &*fmt)
            }
            AuthCommand::Exchange { redirect_uri, code } => {
                let client = session.client()?;
                let token = client
                    .exchange_code(redirect_uri, code)
                    .await
                    .context("Failed to exchange authorization code")?;
                print_token(&token, "User token obtained", &*fmt)
            }
            AuthCommand::Extend { token } => {
                let token = resolve_token(token.as_deref(), session)?;
                let client = session.client()?;
                let extended = client
                    .extend_token(token)
                    .await
                    .context("Failed to extend token")?;
                print_token(&extended, "Long-lived token obtained", &*fmt)
            }
            AuthCommand::Inspect { input_token, token } => {
                let token = resolve_token(token.as_deref(), session)?;
                let client = session.client()?;
                let inspection = client
                    .inspect_token(input_token, token)
                    .await
                    .context("Failed to inspect token")?;

                let json = serde_json::to_value(&inspection)
                    .context("Failed to serialize token inspection")?;
                if format == OutputFormat::Json {
                    fmt.print_json(&json);
                } else {
                    if inspection.is_valid {
                        fmt.success("Token is valid");
                    } else {
                        fmt.warn("Token is not valid");
                    }
                    fmt.print_value(&json);
                }
                Ok(())
            }
        }
    }

    fn execute_url(
        &self,
        session: &Session,
        redirect_uri: &str,
        state: &str,
        scopes: &[String],
        fmt: &dyn OutputFormatter,
    ) -> Result<()> {
        let client = session.client()?;
        let url = client
            .authorization_url(redirect_uri, state, scopes)
            .context("Failed to build authorization URL")?;

        info!(scopes = scopes.len(), "Built authorization URL");

        fmt.print_json(&serde_json::json!({ "authorization_url": url }));
        fmt.success("Open this URL to log in:");
        fmt.info(&url);
        Ok(())
    }
}

fn resolve_token<'a>(explicit: Option<&'a str>, session: &'a Session) -> Result<&'a str> {
    explicit
        .filter(|token| !token.is_empty())
        .or_else(|| session.access_token())
        .context("No token provided. Use --token, --access-token or FB_ACCESS_TOKEN")
}

fn print_token(token: &TokenResponse, headline: &str, fmt: &dyn OutputFormatter) -> Result<()> {
    let json = serde_json::to_value(token).context("Failed to serialize token")?;
    fmt.print_json(&json);
    fmt.success(headline);
    fmt.info(&format!("Access token: {}", token.access_token));
    if let Some(expires_in) = token.expires_in {
        fmt.info(&format!("Expires in:   {} s", expires_in));
    }
    Ok(())
}
