//! Cursor-based pagination
//!
//! List responses carry a `data` array and, while more results exist, a
//! `paging.next` URL. [`follow`] keeps requesting `next` until the server
//! stops sending it and concatenates every page's `data` in order.
//!
//! ## Follow-up requests
//!
//! - The configured base URL is stripped from `next` and re-prepended.
//! - The plain `access_token` parameter is not re-sent: `next` already
//!   embeds the token, but not the `appsecret_proof`, which is kept.
//! - Parameters already present in `next` (cursor, `limit`, `fields`) are
//!   taken from `next` rather than duplicated.
//! - A `next` outside the base URL is requested exactly as given, with no
//!   client parameters (not even `appsecret_proof`) appended.
//!
//! Termination depends on the server omitting `paging.next`; set
//! `max_pages` on the client to bound it.
//!
//! See: <https://developers.facebook.com/docs/graph-api/results>

use std::collections::HashSet;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{client::GraphClient, endpoint::Params, GraphError, Result};

/// Returns `paging.next` of a response, if any
pub fn next_link(response: &Value) -> Option<&str> {
    response
        .pointer("/paging/next")
        .and_then(Value::as_str)
        .filter(|next| !next.is_empty())
}

/// Path of `next` relative to `base_url`, when `next` lives under it
pub fn relative_path<'a>(base_url: &str, next: &'a str) -> Option<&'a str> {
    next.strip_prefix(base_url)
        .filter(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
}

/// Parameters to send along with a `next` URL
///
/// Drops `access_token` and anything the URL's own query already carries.
pub fn follow_params(params: &Params, next: &str) -> Result<Params> {
    let url = url::Url::parse(next)
        .map_err(|e| GraphError::InvalidResponse(format!("invalid paging.next URL: {e}")))?;
    let embedded: HashSet<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();

    Ok(params
        .iter()
        .filter(|(key, _)| key.as_str() != "access_token" && !embedded.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

/// Follows `paging.next` from `first` until the last page
///
/// Returns the last page with its `data` replaced by the concatenation of
/// every page's `data`. Any failing page aborts the whole fetch.
pub(crate) async fn follow(client: &GraphClient, first: Value, params: &Params) -> Result<Value> {
    if next_link(&first).is_none() {
        return Ok(first);
    }

    let Some(first_data) = first.get("data").and_then(Value::as_array) else {
        debug!("paging.next present without a data array; not paginating");
        return Ok(first);
    };

    let mut items = first_data.clone();
    let mut current = first;
    let mut page_count: u32 = 1;

    while let Some(next) = next_link(&current).map(str::to_string) {
        if let Some(max) = client.max_pages() {
            if page_count >= max {
                warn!(max_pages = max, "Pagination limit reached with more pages pending");
                return Err(GraphError::PageLimitExceeded(max));
            }
        }

        page_count += 1;
        let (url, page_params) = match relative_path(client.base_url(), &next) {
            Some(path) => (client.url_for(path), follow_params(params, &next)?),
            None => {
                url::Url::parse(&next).map_err(|e| {
                    GraphError::InvalidResponse(format!("invalid paging.next URL: {e}"))
                })?;
                debug!("paging.next is outside the base URL; requesting it as-is");
                (next.clone(), Params::new())
            }
        };

        debug!(page = page_count, "Following paging.next");
        let page = client.execute(Method::GET, &url, &page_params, None).await?;

        let data = page.get("data").and_then(Value::as_array).ok_or_else(|| {
            GraphError::InvalidResponse(format!("page {page_count} has no data array"))
        })?;

        debug!(
            page = page_count,
            items = data.len(),
            has_next = next_link(&page).is_some(),
            "Received page"
        );

        items.extend(data.iter().cloned());
        current = page;
    }

    debug!(
        total_items = items.len(),
        total_pages = page_count,
        "Pagination complete"
    );

    if let Some(object) = current.as_object_mut() {
        object.insert("data".to_string(), Value::Array(items));
    }
    Ok(current)
}
