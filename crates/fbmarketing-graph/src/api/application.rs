//! App webhook subscriptions
//!
//! All three calls take an app access token (see
//! [`GraphClient::get_app_token`]).
//!
//! See: <https://developers.facebook.com/docs/graph-api/reference/app/subscriptions>

use serde_json::Value;
use tracing::info;

use crate::{catalog, CallArgs, GraphClient, Result};

/// A webhook subscription to create or update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSubscription {
    /// Object type, e.g. `page`, `user`, `instagram`
    pub object: String,
    /// Receiver of the update POSTs; must be `https`
    pub callback_url: String,
    /// Comma-separated fields of `object` to subscribe to
    pub fields: String,
    /// Echoed back during the endpoint verification handshake
    pub verify_token: String,
}

impl WebhookSubscription {
    fn into_args(self) -> CallArgs {
        CallArgs::new()
            .param("object", self.object)
            .param("callback_url", self.callback_url)
            .param("fields", self.fields)
            .param("verify_token", self.verify_token)
    }
}

impl GraphClient {
    pub async fn get_app_subscriptions(&self, app_token: &str) -> Result<Value> {
        let args = CallArgs::new().token(app_token);
        self.call(&catalog::APP_SUBSCRIPTIONS, args).await
    }

    /// Creates or updates a webhook subscription for the app
    ///
    /// # Errors
    /// [`GraphError::HttpsRequired`](crate::GraphError::HttpsRequired) when
    /// `callback_url` is not `https`; no request is sent in that case.
    pub async fn create_app_subscriptions(
        &self,
        subscription: WebhookSubscription,
        app_token: &str,
    ) -> Result<Value> {
        info!(object = %subscription.object, "Creating webhook subscription");
        let args = subscription.into_args().token(app_token);
        self.call(&catalog::CREATE_APP_SUBSCRIPTIONS, args).await
    }

    /// Deletes the app's webhook subscriptions
    ///
    /// Only the subscription for `object` is removed when given; otherwise
    /// all of them.
    pub async fn delete_app_subscriptions(
        &self,
        app_token: &str,
        object: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .token(app_token)
            .param_opt("object", object);
        self.call(&catalog::DELETE_APP_SUBSCRIPTIONS, args).await
    }
}
