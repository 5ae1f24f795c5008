//! Call command - Invoke any catalog endpoint
//!
//! `fbmarketing call <name> [ARGS...]` fills the endpoint's path
//! placeholders from ARGS in order, adds `--param key=value` pairs and
//! prints the (paginated) response.

use anyhow::{bail, Context, Result};
use clap::Args;
use fbmarketing_graph::{catalog, CallArgs};
use tracing::info;

use super::Session;
use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct CallCommand {
    /// Endpoint name, see `fbmarketing endpoints`
    pub name: String,

    /// Path arguments, in placeholder order
    pub args: Vec<String>,

    /// Comma-separated fields to request
    #[arg(long)]
    pub fields: Option<String>,

    /// Extra query parameter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// JSON request body; audience records in it are hashed before sending
    #[arg(long)]
    pub body: Option<String>,

    /// Use this token instead of --access-token (e.g. a page token)
    #[arg(long)]
    pub token: Option<String>,

    /// Return only the first page of a list
    #[arg(long)]
    pub no_paginate: bool,
}

impl CallCommand {
    pub async fn execute(&self, session: &Session, format: OutputFormat) -> Result<()> {
        let formatter = get_formatter(format == OutputFormat::Json);

        let Some(endpoint) = catalog::find(&self.name) else {
            bail!(
                "Unknown endpoint '{}'. Run 'fbmarketing endpoints' to list them",
                self.name
            );
        };

        let positional = endpoint.positional_args();
        if self.args.len() != positional.len() {
            bail!(
                "{} expects {} argument(s): {}",
                endpoint.name,
                positional.len(),
                positional
                    .iter()
                    .map(|name| format!("<{name}>"))
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }

        let args = self.call_args()?;
        let client = session.client()?;

        info!(endpoint = endpoint.name, "Calling endpoint");
        let response = client
            .call(endpoint, args)
            .await
            .with_context(|| format!("{} failed", endpoint.name))?;

        formatter.print_value(&response);
        Ok(())
    }

    fn call_args(&self) -> Result<CallArgs> {
        let mut args = CallArgs::new()
            .params(self.params.iter().cloned())
            .token_opt(self.token.as_deref());

        for arg in &self.args {
            args = args.arg(arg.as_str());
        }
        if let Some(fields) = &self.fields {
            args = args.fields(
                fields
                    .split(',')
                    .map(str::trim)
                    .filter(|field| !field.is_empty()),
            );
        }
        if let Some(body) = &self.body {
            let body = serde_json::from_str(body).context("--body is not valid JSON")?;
            args = args.json(body);
        }
        if self.no_paginate {
            args = args.paginate(false);
        }
        Ok(args)
    }
}

/// Parses `key=value`; the value may itself contain `=`
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
