//! Mapping of transport outcomes onto [`ErrorKind`].

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{ApiError, ErrorKind};

/// Classify a received non-2xx response.
///
/// 401/403/404/422 and every 5xx carry the fixed message of their
/// category. Other statuses keep the server's `message` when it sent one.
/// `details` is the body's `errors` field, if any.
pub fn classify_status(status: StatusCode, body: &[u8]) -> ApiError {
    let payload: Option<Value> = serde_json::from_slice(body).ok();

    let details = payload
        .as_ref()
        .and_then(|p| p.get("errors"))
        .filter(|v| !v.is_null())
        .cloned();

    let server_message = payload
        .as_ref()
        .and_then(|p| p.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let kind = match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Unauthorized,
        StatusCode::FORBIDDEN => ErrorKind::Forbidden,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::ValidationFailed,
        _ => ErrorKind::Server,
    };

    let message = match (kind, server_message) {
        (ErrorKind::Server, Some(message)) if !status.is_server_error() => message,
        _ => kind.message(),
    };

    ApiError::http(kind, status.as_u16(), message).with_details(details)
}

/// Classify a failure that produced no usable response.
pub fn classify_transport(err: &reqwest::Error) -> ApiError {
    if let Some(status) = err.status() {
        return classify_status(status, &[]);
    }
    if err.is_connect() || err.is_timeout() || err.is_request() {
        ApiError::network()
    } else {
        ApiError::unexpected(err)
    }
}
