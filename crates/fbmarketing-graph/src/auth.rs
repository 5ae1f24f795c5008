//! Authentication for the Graph API
//!
//! ## Components
//!
//! - [`app_secret_proof`] - HMAC-SHA256 of an access token keyed by the app secret
//! - [`GraphClient::auth_params`] - `access_token` + `appsecret_proof` for a call
//! - [`GraphClient::authorization_url`] - OAuth login dialog URL
//! - Token endpoints: [`GraphClient::exchange_code`], [`GraphClient::extend_token`],
//!   [`GraphClient::inspect_token`], [`GraphClient::get_app_token`]
//!
//! See: <https://developers.facebook.com/docs/graph-api/security>

use hmac::{Hmac, Mac};
use oauth2::{basic::BasicClient, AuthUrl, ClientId, CsrfToken, RedirectUrl, Scope};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, info};

use crate::{
    catalog,
    client::{GraphClient, DIALOG_HOST},
    endpoint::{CallArgs, Params},
    GraphError, Result,
};

type HmacSha256 = Hmac<Sha256>;

/// Computes the `appsecret_proof` for a token, as lowercase hex
pub fn app_secret_proof(app_secret: &str, access_token: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .map_err(|e| GraphError::Config(format!("unusable app secret: {e}")))?;
    mac.update(access_token.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

// ============================================================================
// Token payloads
// ============================================================================

/// Response of the `/oauth/access_token` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Usually `bearer`
    pub token_type: Option<String>,
    /// Lifetime in seconds; absent for app tokens
    pub expires_in: Option<u64>,
}

/// The `data` object of a `/debug_token` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInspection {
    pub app_id: Option<String>,
    /// `USER`, `PAGE` or `APP`
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    pub application: Option<String>,
    #[serde(default)]
    pub is_valid: bool,
    /// Unix timestamp; 0 for tokens that never expire
    pub expires_at: Option<i64>,
    pub data_access_expires_at: Option<i64>,
    pub issued_at: Option<i64>,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub user_id: Option<String>,
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| GraphError::InvalidResponse(format!("malformed {what} payload: {e}")))
}

impl GraphClient {
    /// Auth parameters for one call
    ///
    /// Uses `token` when given (and non-empty), otherwise the client's token.
    ///
    /// # Errors
    /// [`GraphError::AccessTokenRequired`] when neither is available.
    pub fn auth_params(&self, token: Option<&str>) -> Result<Params> {
        let token = token
            .filter(|t| !t.is_empty())
            .or_else(|| self.access_token().filter(|t| !t.is_empty()))
            .ok_or(GraphError::AccessTokenRequired)?;

        let mut params = Params::new();
        params.insert(
            "appsecret_proof".to_string(),
            app_secret_proof(self.app_secret(), token)?,
        );
        params.insert("access_token".to_string(), token.to_string());
        Ok(params)
    }

    /// `client_id` and `client_secret` for the OAuth token endpoints
    pub(crate) fn app_credentials(&self) -> Params {
        let mut params = Params::new();
        params.insert("client_id".to_string(), self.app_id().to_string());
        params.insert("client_secret".to_string(), self.app_secret().to_string());
        params
    }

    /// Builds the OAuth login dialog URL
    ///
    /// No request is made. The URL carries `client_id`, `redirect_uri`,
    /// `state`, the space-joined `scope` and `response_type=code`.
    ///
    /// # Arguments
    /// * `redirect_uri` - Redirect URL registered in the app settings
    /// * `state` - Opaque value echoed back to the redirect, for CSRF checks
    /// * `scopes` - Permissions to request
    pub fn authorization_url<S: AsRef<str>>(
        &self,
        redirect_uri: &str,
        state: &str,
        scopes: &[S],
    ) -> Result<String> {
        let auth_url = AuthUrl::new(format!("{DIALOG_HOST}/{}/dialog/oauth", self.version()))
            .map_err(|e| GraphError::InvalidRequest(format!("invalid dialog URL: {e}")))?;
        let redirect_url = RedirectUrl::new(redirect_uri.to_string())
            .map_err(|e| GraphError::InvalidRequest(format!("invalid redirect_uri: {e}")))?;

        let oauth = BasicClient::new(ClientId::new(self.app_id().to_string()))
            .set_auth_uri(auth_url)
            .set_redirect_uri(redirect_url);

        let state = state.to_string();
        let (mut url, _state) = oauth
            .authorize_url(move || CsrfToken::new(state))
            .add_scopes(scopes.iter().map(|s| Scope::new(s.as_ref().to_string())))
            .url();

        if scopes.is_empty() {
            url.query_pairs_mut().append_pair("scope", "");
        }

        debug!("Generated authorization URL");
        Ok(url.to_string())
    }

    /// Exchanges an OAuth `code` for a user access token
    pub async fn exchange_code(&self, redirect_uri: &str, code: &str) -> Result<TokenResponse> {
        info!("Exchanging authorization code for a user token");
        let args = CallArgs::new()
            .param("redirect_uri", redirect_uri)
            .param("code", code);
        let body = self.call(&catalog::EXCHANGE_CODE, args).await?;
        decode(body, "token")
    }

    /// Trades a short-lived user token for a long-lived one
    pub async fn extend_token(&self, token: &str) -> Result<TokenResponse> {
        info!("Extending user access token");
        let args = CallArgs::new().param("fb_exchange_token", token);
        let body = self.call(&catalog::EXTEND_TOKEN, args).await?;
        decode(body, "token")
    }

    /// Inspects a token
    ///
    /// # Arguments
    /// * `input_token` - The token to inspect
    /// * `token` - An app token, or a user token of an app developer
    pub async fn inspect_token(&self, input_token: &str, token: &str) -> Result<TokenInspection> {
        let args = CallArgs::new()
            .param("input_token", input_token)
            .param("access_token", token);
        let mut body = self.call(&catalog::INSPECT_TOKEN, args).await?;
        let data = body
            .get_mut("data")
            .map(Value::take)
            .ok_or_else(|| GraphError::InvalidResponse("debug_token without data".to_string()))?;
        decode(data, "debug_token")
    }

    /// Generates an app access token (client credentials grant)
    pub async fn get_app_token(&self) -> Result<TokenResponse> {
        info!("Requesting app access token");
        let body = self.call(&catalog::APP_TOKEN, CallArgs::new()).await?;
        decode(body, "token")
    }
}
