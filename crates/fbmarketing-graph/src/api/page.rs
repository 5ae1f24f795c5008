//! Pages
//!
//! See: <https://developers.facebook.com/docs/graph-api/reference/page/>

use serde_json::Value;
use tracing::debug;

use crate::{catalog, CallArgs, GraphClient, Result};

impl GraphClient {
    /// Gets the pages the authenticated user manages, with their page tokens
    pub async fn get_pages(&self) -> Result<Value> {
        self.call(&catalog::PAGES, CallArgs::new()).await
    }

    /// Finds the page access token of one of the user's pages
    ///
    /// Walks every page of `/me/accounts`; returns `None` when the user does
    /// not manage `page_id`.
    pub async fn get_page_token(&self, page_id: &str) -> Result<Option<String>> {
        let pages = self.get_pages().await?;
        let token = pages
            .get("data")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .find(|page| page.get("id").and_then(Value::as_str) == Some(page_id))
            .and_then(|page| page.get("access_token"))
            .and_then(Value::as_str)
            .map(str::to_string);

        if token.is_none() {
            debug!(page_id, "Page not found among managed pages");
        }
        Ok(token)
    }

    pub async fn get_page(
        &self,
        page_id: &str,
        fields: &[&str],
        token: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(page_id)
            .fields(fields.iter().copied())
            .token_opt(token);
        self.call(&catalog::PAGE, args).await
    }

    /// Gets the posts of a page
    ///
    /// Feeds can be long; pass `paginate = false` to get only the first page
    /// and its `paging` cursors.
    pub async fn get_page_feed(
        &self,
        page_id: &str,
        token: Option<&str>,
        paginate: bool,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(page_id)
            .token_opt(token)
            .paginate(paginate);
        self.call(&catalog::PAGE_FEED, args).await
    }

    /// Lists the apps subscribed to a page's webhook updates
    ///
    /// # Arguments
    /// * `page_id` - Page ID
    /// * `token` - Page access token
    pub async fn get_page_subscribed_apps(&self, page_id: &str, token: &str) -> Result<Value> {
        let args = CallArgs::new().arg(page_id).token(token);
        self.call(&catalog::PAGE_SUBSCRIBED_APPS, args).await
    }

    /// Subscribes the app to a page's webhook updates
    ///
    /// # Arguments
    /// * `page_id` - Page ID
    /// * `token` - Page access token
    /// * `params` - Extra parameters, e.g. `("subscribed_fields", "leadgen")`
    pub async fn create_page_subscribed_apps(
        &self,
        page_id: &str,
        token: &str,
        params: &[(&str, &str)],
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(page_id)
            .token(token)
            .params(params.iter().copied());
        self.call(&catalog::CREATE_PAGE_SUBSCRIBED_APPS, args).await
    }

    pub async fn delete_page_subscribed_apps(&self, page_id: &str, token: &str) -> Result<Value> {
        let args = CallArgs::new().arg(page_id).token(token);
        self.call(&catalog::DELETE_PAGE_SUBSCRIBED_APPS, args).await
    }
}
