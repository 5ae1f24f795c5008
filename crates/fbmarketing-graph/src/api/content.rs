use serde_json::Value;

use crate::{catalog, CallArgs, GraphClient, Result};

impl GraphClient {
    pub async fn get_post(
        &self,
        post_id: &str,
        fields: &[&str],
        token: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(post_id)
            .fields(fields.iter().copied())
            .token_opt(token);
        self.call(&catalog::POST, args).await
    }

    pub async fn get_comment(
        &self,
        comment_id: &str,
        fields: &[&str],
        token: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(comment_id)
            .fields(fields.iter().copied())
            .token_opt(token);
        self.call(&catalog::COMMENT, args).await
    }

    /// Gets the comments of a post, usually with a page token
    pub async fn get_post_comments(
        &self,
        post_id: &str,
        fields: &[&str],
        token: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(post_id)
            .fields(fields.iter().copied())
            .token_opt(token);
        self.call(&catalog::POST_COMMENTS, args).await
    }

    /// Gets insights of a page, post or media object
    ///
    /// # Arguments
    /// * `object_id` - Page, post or Instagram media id
    /// * `metrics` - Metric names, sent comma-joined as `metric`
    /// * `params` - Extra parameters such as `period`, `since`, `until`
    /// * `token` - Page token; page insights need one. Defaults to the
    ///   client's token
    pub async fn get_insights(
        &self,
        object_id: &str,
        metrics: &[&str],
        params: &[(&str, &str)],
        token: Option<&str>,
    ) -> Result<Value> {
        let mut args = CallArgs::new().arg(object_id).token_opt(token);
        if !metrics.is_empty() {
            args = args.param("metric", metrics.join(","));
        }
        let args = args.params(params.iter().copied());
        self.call(&catalog::INSIGHTS, args).await
    }
}
