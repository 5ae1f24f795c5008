//! Response hooks
//!
//! A [`ResponseHook`] attached with
//! [`GraphClient::with_response_hook`](crate::client::GraphClient::with_response_hook)
//! sees every HTTP response before it is classified, including each page
//! fetched while paginating.

use reqwest::Method;

/// What a hook is told about one HTTP response
#[derive(Debug, Clone)]
pub struct ResponseEvent {
    pub method: Method,
    /// Request URL without its query string, so tokens never reach hooks
    pub url: String,
    pub status: u16,
}

/// Observer invoked once per HTTP response
pub trait ResponseHook: Send + Sync {
    fn on_response(&self, event: &ResponseEvent);
}

impl<F> ResponseHook for F
where
    F: Fn(&ResponseEvent) + Send + Sync,
{
    fn on_response(&self, event: &ResponseEvent) {
        self(event)
    }
}

/// Strips the query string and fragment from a URL
pub(crate) fn redact_url(url: &str) -> String {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    url[..end].to_string()
}
