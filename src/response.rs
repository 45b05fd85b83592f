//! Response interpretation: turning a raw HTTP reply into a message or payload.
//!
//! The error message chain is a pure function of the reply's content type and
//! body, so it is tested here without any network I/O.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use serde_json::Value;

/// A fully read HTTP reply.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Display message for a failed reply.
    pub fn error_message(&self, default_message: &str) -> String {
        extract_error_message(self.content_type.as_deref(), &self.body, default_message)
    }

    /// Parse a successful reply as a JSON document.
    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::parse_with_context(
                format!("Response body is not valid JSON: {}", e),
                ErrorContext::new().with_source("response_parser"),
            )
        })
    }
}

pub(crate) fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.to_ascii_lowercase().contains("json"))
        .unwrap_or(false)
}

/// Pick the message to show for a failed reply.
///
/// Steps, in order, each moving on when it yields nothing:
/// 1. JSON content type: `detail`, then `message`, then the whole body
///    serialized. A JSON body that is empty (`{}`, `null`, `""`) goes
///    straight to the default.
/// 2. Unparseable JSON or any other content type: the trimmed body text.
/// 3. `default_message`.
pub fn extract_error_message(
    content_type: Option<&str>,
    body: &[u8],
    default_message: &str,
) -> String {
    if is_json_content_type(content_type) {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => {
                return message_from_json(&value)
                    .unwrap_or_else(|| default_message.to_string());
            }
            Err(e) => {
                tracing::debug!("error body is not valid JSON, using raw text: {}", e);
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        default_message.to_string()
    } else {
        text.to_string()
    }
}

fn message_from_json(value: &Value) -> Option<String> {
    value
        .get("detail")
        .and_then(display_value)
        .or_else(|| value.get("message").and_then(display_value))
        .or_else(|| display_value(value))
}

/// Strings are used as-is; other non-empty values are serialized.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}
