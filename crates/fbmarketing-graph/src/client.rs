//! Graph API client
//!
//! Holds the app credentials, the (mutable) user access token and the HTTP
//! client, and dispatches every [`Endpoint`] through one path: precondition
//! checks, parameter building, the request itself, error classification and,
//! for GET requests, pagination.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fbmarketing_graph::GraphClient;
//!
//! # async fn example() -> fbmarketing_graph::Result<()> {
//! let mut client = GraphClient::new("app-id", "app-secret", "12.0");
//! client.set_access_token("user-access-token");
//! let account = client.get_account().await?;
//! println!("Hello, {}", account["name"]);
//! # Ok(())
//! # }
//! ```
//!
//! Operations borrow the client immutably and [`GraphClient::set_access_token`]
//! borrows it mutably, so the token cannot change under an in-flight call.
//! Sharing one client between tasks that also change the token needs the
//! caller's own synchronization.

use std::{fmt, sync::Arc};

use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    audience,
    classify::classify,
    config::Config,
    endpoint::{require_https, Auth, CallArgs, Endpoint, Params, Verb},
    hooks::{redact_url, ResponseEvent, ResponseHook},
    pagination, GraphError, Result,
};

/// Host serving the Graph API
pub const GRAPH_HOST: &str = "https://graph.facebook.com";

/// Host serving the OAuth login dialog
pub const DIALOG_HOST: &str = "https://facebook.com";

/// API version used when none is configured
pub const DEFAULT_VERSION: &str = "v12.0";

/// Page size sent as `limit` by list endpoints
pub const DEFAULT_LIMIT: u32 = 100;

/// Parameters a caller may not set on token-authenticated endpoints
const RESERVED_PARAMS: &[&str] = &["access_token", "appsecret_proof"];

/// Prefixes `v` to a bare version number (`"12.0"` -> `"v12.0"`)
pub fn normalize_version(version: &str) -> String {
    let version = version.trim();
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

/// HTTP client for Graph API calls
pub struct GraphClient {
    /// The underlying HTTP client
    client: Client,
    app_id: String,
    app_secret: String,
    /// Normalized API version, e.g. `v12.0`
    version: String,
    graph_host: String,
    /// `graph_host` + `/` + `version`
    base_url: String,
    /// Current user access token
    access_token: Option<String>,
    /// Whether GET responses follow `paging.next`
    paginate: bool,
    /// Page size for endpoints that send `limit`
    limit: u32,
    /// Optional cap on pages fetched by one call
    max_pages: Option<u32>,
    hook: Option<Arc<dyn ResponseHook>>,
}

impl fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphClient")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("version", &self.version)
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("paginate", &self.paginate)
            .field("limit", &self.limit)
            .field("max_pages", &self.max_pages)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

impl GraphClient {
    /// Creates a client for the given app
    ///
    /// # Arguments
    /// * `app_id` - Facebook App ID
    /// * `app_secret` - App secret, used for `appsecret_proof` and token calls
    /// * `version` - Graph API version, with or without the leading `v`
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        version: impl AsRef<str>,
    ) -> Self {
        let version = normalize_version(version.as_ref());
        Self {
            client: Client::new(),
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            base_url: format!("{GRAPH_HOST}/{version}"),
            version,
            graph_host: GRAPH_HOST.to_string(),
            access_token: None,
            paginate: true,
            limit: DEFAULT_LIMIT,
            max_pages: None,
            hook: None,
        }
    }

    /// Builds a client from a loaded [`Config`]
    ///
    /// Fails when the app id or secret is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let app_id = config
            .app
            .app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GraphError::Config("app.app_id is not set".to_string()))?;
        let app_secret = config
            .app
            .app_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| GraphError::Config("app.app_secret is not set".to_string()))?;

        let mut client = Self::new(app_id, app_secret, &config.app.version)
            .with_paginate(config.client.paginate)
            .with_limit(config.client.limit)
            .with_max_pages(config.client.max_pages);
        if let Some(host) = &config.client.graph_host {
            client = client.with_graph_host(host.as_str());
        }
        Ok(client)
    }

    /// Points the client at another Graph host (useful for testing)
    pub fn with_graph_host(mut self, host: impl Into<String>) -> Self {
        self.graph_host = host.into().trim_end_matches('/').to_string();
        self.base_url = format!("{}/{}", self.graph_host, self.version);
        self
    }

    pub fn with_paginate(mut self, paginate: bool) -> Self {
        self.paginate = paginate;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Caps the number of pages one call may fetch; `None` is unbounded
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Attaches a hook called for every HTTP response
    pub fn with_response_hook(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Sets the user access token used by authenticated calls
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
        info!("Updated GraphClient access token");
    }

    pub fn clear_access_token(&mut self) {
        self.access_token = None;
        debug!("Cleared GraphClient access token");
    }

    /// Returns the current access token, if one is set
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub(crate) fn app_secret(&self) -> &str {
        &self.app_secret
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Versioned base URL, e.g. `https://graph.facebook.com/v12.0`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn paginate(&self) -> bool {
        self.paginate
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn max_pages(&self) -> Option<u32> {
        self.max_pages
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds the query parameters for a call, running every precondition
    ///
    /// Nothing is sent; a failure here means no request would be issued.
    pub fn build_params(&self, endpoint: &Endpoint, args: &CallArgs) -> Result<Params> {
        for key in endpoint.https_params {
            if let Some(value) = args.params.get(*key) {
                require_https(value)?;
            }
        }

        let mut params = match endpoint.auth {
            Auth::None => Params::new(),
            Auth::App => self.app_credentials(),
            Auth::Token => {
                if let Some(key) = RESERVED_PARAMS
                    .iter()
                    .find(|key| args.params.contains_key(**key))
                {
                    return Err(GraphError::InvalidRequest(format!(
                        "{key} is set from the client token; use CallArgs::token instead"
                    )));
                }
                self.auth_params(args.token.as_deref())?
            }
        };

        for (key, value) in endpoint.fixed_params {
            params.insert((*key).to_string(), (*value).to_string());
        }
        if endpoint.uses_limit {
            params.insert("limit".to_string(), self.limit.to_string());
        }
        if !args.fields.is_empty() {
            params.insert("fields".to_string(), args.fields.join(","));
        }
        params.extend(args.params.clone());

        if let Some(missing) = endpoint
            .required_params
            .iter()
            .find(|key| params.get(**key).map_or(true, String::is_empty))
        {
            return Err(GraphError::InvalidRequest(format!(
                "{} requires the '{}' parameter",
                endpoint.name, missing
            )));
        }

        Ok(params)
    }

    /// Dispatches one endpoint call
    ///
    /// Preconditions (token present, https callback, required parameters,
    /// path arguments) are all checked before any request is sent. Bodies of
    /// endpoints with `hashed_records` have their records hashed here. GET
    /// responses are followed through `paging.next` unless pagination is off
    /// for the client or the call.
    pub async fn call(&self, endpoint: &Endpoint, args: CallArgs) -> Result<Value> {
        let params = self.build_params(endpoint, &args)?;
        let path = endpoint.render_path(&self.app_id, &args.path_args)?;
        let json_body = request_body(endpoint, &args)?;
        let url = self.url_for(&path);
        let method = endpoint.verb.as_method();

        debug!(endpoint = endpoint.name, %method, path = %path, "Calling Graph API");

        let body = self
            .execute(method, &url, &params, json_body.as_ref())
            .await?;

        if endpoint.verb == Verb::Get && args.paginate.unwrap_or(self.paginate) {
            pagination::follow(self, body, &params).await
        } else {
            Ok(body)
        }
    }

    /// Sends one HTTP request and classifies the response
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: &str,
        params: &Params,
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .query(params);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if let Some(hook) = &self.hook {
            hook.on_response(&ResponseEvent {
                method,
                url: redact_url(url),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        parse_body(status, &text)
    }
}

/// JSON body to send for a call
fn request_body(endpoint: &Endpoint, args: &CallArgs) -> Result<Option<Value>> {
    if !endpoint.hashed_records {
        return Ok(args.body.clone());
    }
    let body = args.body.as_ref().ok_or_else(|| {
        GraphError::InvalidRequest(format!("{} requires a JSON body", endpoint.name))
    })?;
    audience::hash_body(body).map(Some)
}

/// Parses and classifies a response body
fn parse_body(status: StatusCode, text: &str) -> Result<Value> {
    let body: Value = serde_json::from_str(text).map_err(|_| {
        GraphError::InvalidResponse(format!(
            "HTTP {}: expected a JSON body, got {} bytes",
            status.as_u16(),
            text.len()
        ))
    })?;

    let body = classify(body)?;

    if !status.is_success() {
        return Err(GraphError::InvalidResponse(format!(
            "HTTP {} without an error object: {}",
            status.as_u16(),
            body
        )));
    }

    Ok(body)
}
