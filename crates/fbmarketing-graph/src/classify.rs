//! Graph API error classification
//!
//! Every response body passes through [`classify`]. A body carrying an
//! `error` object (at the top level, or nested under `data`) is turned into
//! the matching [`GraphError`]; any other body is returned untouched.
//!
//! See: <https://developers.facebook.com/docs/graph-api/guides/error-handling>

use serde_json::Value;
use tracing::warn;

use crate::{GraphError, Result};

/// Graph API error codes with a dedicated error variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnknownError,
    AppRateLimit,
    AppPermissionRequired,
    UserRateLimit,
    InvalidParameter,
    SessionKeyInvalid,
    IncorrectPermission,
    InvalidOAuthToken,
    Permission,
    ExtendedPermissionRequired,
}

impl ErrorCode {
    /// All known codes, in table order
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::UnknownError,
        ErrorCode::AppRateLimit,
        ErrorCode::AppPermissionRequired,
        ErrorCode::UserRateLimit,
        ErrorCode::InvalidParameter,
        ErrorCode::SessionKeyInvalid,
        ErrorCode::IncorrectPermission,
        ErrorCode::InvalidOAuthToken,
        ErrorCode::Permission,
        ErrorCode::ExtendedPermissionRequired,
    ];

    /// Looks up a numeric Graph error code
    pub fn from_code(code: i64) -> Option<Self> {
        let kind = match code {
            1 => ErrorCode::UnknownError,
            4 => ErrorCode::AppRateLimit,
            10 => ErrorCode::AppPermissionRequired,
            17 => ErrorCode::UserRateLimit,
            100 => ErrorCode::InvalidParameter,
            102 => ErrorCode::SessionKeyInvalid,
            104 => ErrorCode::IncorrectPermission,
            190 => ErrorCode::InvalidOAuthToken,
            200 => ErrorCode::Permission,
            294 => ErrorCode::ExtendedPermissionRequired,
            _ => return None,
        };
        Some(kind)
    }

    /// The numeric code as sent by the Graph API
    pub fn code(self) -> i64 {
        match self {
            ErrorCode::UnknownError => 1,
            ErrorCode::AppRateLimit => 4,
            ErrorCode::AppPermissionRequired => 10,
            ErrorCode::UserRateLimit => 17,
            ErrorCode::InvalidParameter => 100,
            ErrorCode::SessionKeyInvalid => 102,
            ErrorCode::IncorrectPermission => 104,
            ErrorCode::InvalidOAuthToken => 190,
            ErrorCode::Permission => 200,
            ErrorCode::ExtendedPermissionRequired => 294,
        }
    }

    /// Builds the typed error for this code
    pub fn into_error(self, message: String) -> GraphError {
        match self {
            ErrorCode::UnknownError => GraphError::Unknown(message),
            ErrorCode::AppRateLimit => GraphError::AppRateLimit(message),
            ErrorCode::AppPermissionRequired => GraphError::AppPermissionRequired(message),
            ErrorCode::UserRateLimit => GraphError::UserRateLimit(message),
            ErrorCode::InvalidParameter => GraphError::InvalidParameter(message),
            ErrorCode::SessionKeyInvalid => GraphError::SessionKeyInvalid(message),
            ErrorCode::IncorrectPermission => GraphError::IncorrectPermission(message),
            ErrorCode::InvalidOAuthToken => GraphError::InvalidOAuthToken(message),
            ErrorCode::Permission => GraphError::Permission(message),
            ErrorCode::ExtendedPermissionRequired => {
                GraphError::ExtendedPermissionRequired(message)
            }
        }
    }

    /// Reverse mapping from a typed error back to its code
    pub fn of(error: &GraphError) -> Option<Self> {
        let kind = match error {
            GraphError::Unknown(_) => ErrorCode::UnknownError,
            GraphError::AppRateLimit(_) => ErrorCode::AppRateLimit,
            GraphError::AppPermissionRequired(_) => ErrorCode::AppPermissionRequired,
            GraphError::UserRateLimit(_) => ErrorCode::UserRateLimit,
            GraphError::InvalidParameter(_) => ErrorCode::InvalidParameter,
            GraphError::SessionKeyInvalid(_) => ErrorCode::SessionKeyInvalid,
            GraphError::IncorrectPermission(_) => ErrorCode::IncorrectPermission,
            GraphError::InvalidOAuthToken(_) => ErrorCode::InvalidOAuthToken,
            GraphError::Permission(_) => ErrorCode::Permission,
            GraphError::ExtendedPermissionRequired(_) => ErrorCode::ExtendedPermissionRequired,
            _ => return None,
        };
        Some(kind)
    }
}

/// Finds the error object of a response: `error`, else `data.error`
pub fn locate_error(body: &Value) -> Option<&Value> {
    body.get("error")
        .or_else(|| body.get("data").and_then(|data| data.get("error")))
}

/// Converts a Graph error object into the matching [`GraphError`]
pub fn error_from_object(error: &Value) -> GraphError {
    let Some(code) = error.get("code").and_then(Value::as_i64) else {
        return GraphError::InvalidResponse(format!("error object without a numeric code: {error}"));
    };

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let subcode = error.get("error_subcode").and_then(Value::as_i64);
    let fbtrace_id = error.get("fbtrace_id").and_then(Value::as_str);
    warn!(code, subcode, fbtrace_id, "Graph API returned an error");

    match ErrorCode::from_code(code) {
        Some(kind) => kind.into_error(message),
        None => GraphError::Unexpected { code, message },
    }
}

/// Returns the body unchanged, or the typed error it carries
pub fn classify(body: Value) -> Result<Value> {
    match locate_error(&body) {
        Some(error) => Err(error_from_object(error)),
        None => Ok(body),
    }
}
