use serde_json::Value;

use crate::{catalog, CallArgs, GraphClient, Result};

impl GraphClient {
    /// Gets the authenticated user
    pub async fn get_account(&self) -> Result<Value> {
        self.call(&catalog::ACCOUNT, CallArgs::new()).await
    }

    /// Gets a user; `token` replaces the client's token when given
    pub async fn get_user(
        &self,
        user_id: &str,
        fields: &[&str],
        token: Option<&str>,
    ) -> Result<Value> {
        let args = CallArgs::new()
            .arg(user_id)
            .fields(fields.iter().copied())
            .token_opt(token);
        self.call(&catalog::USER, args).await
    }

    /// Gets the large profile picture of a user
    ///
    /// Returns the picture metadata (`data.url`, `data.width`, ...) rather
    /// than following the redirect to the image.
    pub async fn get_user_picture(&self, user_id: &str, token: Option<&str>) -> Result<Value> {
        let args = CallArgs::new().arg(user_id).token_opt(token);
        self.call(&catalog::USER_PICTURE, args).await
    }
}
