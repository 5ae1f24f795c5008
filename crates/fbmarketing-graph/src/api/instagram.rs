//! Instagram Graph API
//!
//! Instagram business accounts are reached through their linked page id.
//! Hashtag queries are scoped to the Instagram user performing them
//! (`user_id`).
//!
//! See: <https://developers.facebook.com/docs/instagram-api>

use serde_json::Value;

use crate::{catalog, CallArgs, GraphClient, Result};

impl GraphClient {
    /// Gets the Instagram account of a page, e.g. with
    /// `fields = ["instagram_business_account"]`
    pub async fn get_instagram_account(&self, page_id: &str, fields: &[&str]) -> Result<Value> {
        let args = CallArgs::new().arg(page_id).fields(fields.iter().copied());
        self.call(&catalog::INSTAGRAM_ACCOUNT, args).await
    }

    pub async fn get_instagram_media(&self, page_id: &str, fields: &[&str]) -> Result<Value> {
        let args = CallArgs::new().arg(page_id).fields(fields.iter().copied());
        self.call(&catalog::INSTAGRAM_MEDIA, args).await
    }

    pub async fn get_instagram_media_object(
        &self,
        media_id: &str,
        fields: &[&str],
    ) -> Result<Value> {
        let args = CallArgs::new().arg(media_id).fields(fields.iter().copied());
        self.call(&catalog::INSTAGRAM_MEDIA_OBJECT, args).await
    }

    pub async fn get_instagram_media_comments(&self, media_id: &str) -> Result<Value> {
        self.call(&catalog::INSTAGRAM_MEDIA_COMMENTS, CallArgs::new().arg(media_id))
            .await
    }

    /// Looks up the id of a hashtag
    ///
    /// # Arguments
    /// * `user_id` - Instagram user performing the query
    /// * `query` - Hashtag name, without `#`
    pub async fn search_instagram_hashtag(&self, user_id: &str, query: &str) -> Result<Value> {
        let args = CallArgs::new().param("user_id", user_id).param("q", query);
        self.call(&catalog::INSTAGRAM_HASHTAG_SEARCH, args).await
    }

    pub async fn get_instagram_hashtag(&self, hashtag_id: &str, fields: &[&str]) -> Result<Value> {
        let args = CallArgs::new()
            .arg(hashtag_id)
            .fields(fields.iter().copied());
        self.call(&catalog::INSTAGRAM_HASHTAG, args).await
    }

    /// Most recent media tagged with a hashtag (last 24 hours)
    pub async fn get_instagram_hashtag_recent_media(
        &self,
        hashtag_id: &str,
        user_id: &str,
        fields: &[&str],
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(hashtag_id)
            .param("user_id", user_id)
            .fields(fields.iter().copied());
        self.call(&catalog::INSTAGRAM_HASHTAG_RECENT_MEDIA, args)
            .await
    }

    /// Most popular media tagged with a hashtag
    pub async fn get_instagram_hashtag_top_media(
        &self,
        hashtag_id: &str,
        user_id: &str,
        fields: &[&str],
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(hashtag_id)
            .param("user_id", user_id)
            .fields(fields.iter().copied());
        self.call(&catalog::INSTAGRAM_HASHTAG_TOP_MEDIA, args).await
    }
}
