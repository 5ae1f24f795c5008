//! fbmarketing Graph - Facebook Graph and Marketing API client
//!
//! Provides an async client for:
//! - OAuth token exchange and authorization URLs
//! - Pages, leads, custom audiences, Instagram and app subscription endpoints
//! - `appsecret_proof` signing of every authenticated call
//! - Classification of Graph API error codes into typed errors
//! - Transparent cursor pagination of list responses
//!
//! ## Modules
//!
//! - [`auth`] - `appsecret_proof`, auth parameters and OAuth helpers
//! - [`client`] - Graph API HTTP client and dispatch
//! - [`classify`] - Graph API error code table
//! - [`pagination`] - `paging.next` walker
//! - [`endpoint`] / [`catalog`] - data-driven endpoint descriptors
//! - [`api`] - typed convenience wrappers over the catalog
//! - [`audience`] - hashed custom audience payloads
//! - [`config`] - YAML configuration
//! - [`hooks`] - per-response observation hooks

pub mod api;
pub mod audience;
pub mod auth;
pub mod catalog;
pub mod classify;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod hooks;
pub mod pagination;

use thiserror::Error;

pub use classify::ErrorCode;
pub use client::GraphClient;
pub use endpoint::{CallArgs, Endpoint, Params};

/// Errors that can occur when communicating with the Graph API
#[derive(Debug, Error)]
pub enum GraphError {
    /// An authenticated call was attempted without an access token
    #[error("Access token required: call set_access_token() or pass a token explicitly")]
    AccessTokenRequired,

    /// A callback URL that must use https does not
    #[error("HTTPS required for callback URL: {0}")]
    HttpsRequired(String),

    /// Graph error code 1
    #[error("Unknown error: {0}")]
    Unknown(String),

    /// Graph error code 4
    #[error("Application request limit reached: {0}")]
    AppRateLimit(String),

    /// Graph error code 10
    #[error("Application does not have permission: {0}")]
    AppPermissionRequired(String),

    /// Graph error code 17
    #[error("User request limit reached: {0}")]
    UserRateLimit(String),

    /// Graph error code 100
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Graph error code 102
    #[error("Session key invalid or no longer valid: {0}")]
    SessionKeyInvalid(String),

    /// Graph error code 104
    #[error("Incorrect permission: {0}")]
    IncorrectPermission(String),

    /// Graph error code 190
    #[error("Invalid OAuth 2.0 access token: {0}")]
    InvalidOAuthToken(String),

    /// Graph error code 200
    #[error("Permission error: {0}")]
    Permission(String),

    /// Graph error code 294
    #[error("Extended permission required: {0}")]
    ExtendedPermissionRequired(String),

    /// A Graph error whose code is not in the known table
    #[error("Error: {code}. Message {message}")]
    Unexpected {
        /// Numeric Graph error code
        code: i64,
        /// Message reported by the server
        message: String,
    },

    /// The response was not JSON, or had an unusable shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The call could not be built (missing parameter, bad path argument)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Pagination went past the configured `max_pages`
    #[error("Pagination exceeded the limit of {0} pages")]
    PageLimitExceeded(u32),

    /// The client configuration is incomplete or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GraphError {
    /// Returns the Graph error code behind this error, if it came from the API
    pub fn api_code(&self) -> Option<i64> {
        match self {
            GraphError::Unexpected { code, .. } => Some(*code),
            other => ErrorCode::of(other).map(ErrorCode::code),
        }
    }

    /// True for the app-level (4) and user-level (17) rate limits
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            GraphError::AppRateLimit(_) | GraphError::UserRateLimit(_)
        )
    }

    /// True when the token must be refreshed or replaced (190, 102)
    pub fn is_token_invalid(&self) -> bool {
        matches!(
            self,
            GraphError::InvalidOAuthToken(_) | GraphError::SessionKeyInvalid(_)
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;
