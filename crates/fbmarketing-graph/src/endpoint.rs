//! Data-driven endpoint descriptors
//!
//! Each Graph endpoint is described by a static [`Endpoint`] (verb, path
//! template, auth mode and parameter rules) and invoked with [`CallArgs`]
//! through [`GraphClient::call`](crate::client::GraphClient::call). The
//! descriptors themselves live in [`catalog`](crate::catalog).

use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::Value;

use crate::{GraphError, Result};

/// Query parameters of a request, ordered for stable URLs
pub type Params = BTreeMap<String, String>;

/// HTTP verb of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn as_method(self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Delete => Method::DELETE,
        }
    }
}

/// How a call authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// No credentials attached
    None,
    /// `client_id` and `client_secret` of the app (OAuth token endpoints)
    App,
    /// `access_token` plus `appsecret_proof`; fails without a token
    Token,
}

/// Static description of one Graph API endpoint
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    /// Catalog name, used by the CLI
    pub name: &'static str,
    /// One-line description
    pub summary: &'static str,
    pub verb: Verb,
    /// Path relative to the versioned base URL, e.g. `/{page_id}/feed`.
    /// `{app_id}` is filled from the client, other placeholders from
    /// [`CallArgs::arg`] in order.
    pub path: &'static str,
    pub auth: Auth,
    /// Parameters always sent with this endpoint
    pub fixed_params: &'static [(&'static str, &'static str)],
    /// Parameters the caller must provide
    pub required_params: &'static [&'static str],
    /// Whether the client's page size is sent as `limit`
    pub uses_limit: bool,
    /// Parameters whose value must be an `https` URL
    pub https_params: &'static [&'static str],
    /// Whether the JSON body carries audience records to hash before sending
    pub hashed_records: bool,
}

impl Endpoint {
    /// Placeholder names of the path template, in order
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            names.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        names
    }

    /// Positional placeholders, i.e. those the caller has to supply
    pub fn positional_args(&self) -> Vec<&'static str> {
        self.placeholders()
            .into_iter()
            .filter(|name| *name != "app_id")
            .collect()
    }

    /// Fills the path template
    pub fn render_path(&self, app_id: &str, args: &[String]) -> Result<String> {
        let expected = self.positional_args().len();
        if args.len() != expected {
            return Err(GraphError::InvalidRequest(format!(
                "{} expects {} path argument(s), got {}",
                self.name,
                expected,
                args.len()
            )));
        }

        let mut rendered = String::with_capacity(self.path.len());
        let mut rest = self.path;
        let mut args = args.iter();
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            rendered.push_str(&rest[..start]);
            let name = &rest[start + 1..start + len];
            let value = if name == "app_id" {
                app_id
            } else {
                // Count was checked above
                args.next().map(String::as_str).unwrap_or_default()
            };
            validate_path_arg(name, value)?;
            rendered.push_str(value);
            rest = &rest[start + len + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

fn validate_path_arg(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(GraphError::InvalidRequest(format!("{name} must not be empty")));
    }
    if value.contains(|c| matches!(c, '/' | '?' | '#')) {
        return Err(GraphError::InvalidRequest(format!(
            "{name} contains a reserved character: {value}"
        )));
    }
    Ok(())
}

/// Rejects any value that is not an `https` URL
pub fn require_https(value: &str) -> Result<()> {
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "https" => Ok(()),
        _ => Err(GraphError::HttpsRequired(value.to_string())),
    }
}

/// Per-call arguments for an [`Endpoint`]
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub(crate) path_args: Vec<String>,
    pub(crate) params: Params,
    pub(crate) fields: Vec<String>,
    pub(crate) token: Option<String>,
    pub(crate) body: Option<Value>,
    pub(crate) paginate: Option<bool>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next positional path argument
    pub fn arg(mut self, value: impl Into<String>) -> Self {
        self.path_args.push(value.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Sets `key` only when `value` is present
    pub fn param_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Fields to request; sent comma-joined
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Uses this token instead of the client's token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token_opt(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    /// JSON request body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Overrides the client's pagination setting for this call
    pub fn paginate(mut self, paginate: bool) -> Self {
        self.paginate = Some(paginate);
        self
    }
}
