//! Mapping of HTTP responses onto [`Error`]

use estate_core::prelude::*;
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Longest raw body kept in an error message
const MAX_BODY_CHARS: usize = 200;

pub(crate) trait ResponseExt {
    /// Pass 2xx responses through, turn everything else into an error
    async fn map_client_error(self) -> Result<Response>;
}

impl ResponseExt for Response {
    async fn map_client_error(self) -> Result<Response> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        if status == StatusCode::UNAUTHORIZED {
            warn!(url = %self.url(), "Request rejected: unauthorized");
            return Err(Error::Unauthorized);
        }

        let url = self.url().to_string();
        let body = self.text().await.unwrap_or_default();
        error!(body = %body, status = %status, url = %url, "Request failed");
        Err(Error::http(status.as_u16(), error_message(&body)))
    }
}

impl ResponseExt for std::result::Result<Response, reqwest::Error> {
    async fn map_client_error(self) -> Result<Response> {
        match self {
            Ok(response) => response.map_client_error().await,
            Err(e) => Err(transport_error(e)),
        }
    }
}

/// Describe a request that never produced a response
pub(crate) fn transport_error(e: reqwest::Error) -> Error {
    let message = if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "could not connect to the server".to_string()
    } else {
        e.to_string()
    };
    error!("Transport error: {}", e);
    Error::transport(message)
}

/// Read a JSON body, tolerating empty responses
pub(crate) async fn read_json(response: Response) -> Result<Value> {
    let text = response.text().await.map_err(transport_error)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| Error::decode(format!("invalid JSON response: {}", e)))
}

/// Pull a human readable message out of an error body
///
/// Servers answer with `{"message": ...}`, `{"error": ...}` or plain text.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_BODY_CHARS {
        let cut: String = trimmed.chars().take(MAX_BODY_CHARS).collect();
        format!("{}…", cut)
    } else {
        trimmed.to_string()
    }
}

/// First string found under any of `keys`, looking one `data` level deep too
pub(crate) fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    let lookup = |v: &Value| {
        keys.iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };
    lookup(value).or_else(|| value.get("data").and_then(lookup))
}
