//! Raw wire response and body decoding.

use crate::error::ErrorResponse;

/// Everything captured from one attempt that produced an HTTP response,
/// whatever its status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Numeric status code; 0 when the response carried no real status.
    pub status: u32,
    /// Headers as received, in wire order.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A decoded response body: JSON when the response declared a JSON content
/// type, opaque text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedBody {
    Json(serde_json::Value),
    Text(String),
}

impl DecodedBody {
    /// View as a JSON value; opaque text becomes a JSON string.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            DecodedBody::Json(value) => value,
            DecodedBody::Text(text) => serde_json::Value::String(text),
        }
    }

    /// View as text; a JSON value is re-serialized.
    pub fn into_text(self) -> String {
        match self {
            DecodedBody::Json(value) => value.to_string(),
            DecodedBody::Text(text) => text,
        }
    }
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn declares_json(&self) -> bool {
        self.header("content-type")
            .map_or(false, |ct| ct.contains("application/json"))
    }

    /// Decode the body as JSON only when the response declares a JSON
    /// content type. A body that claims JSON but fails to parse is
    /// returned as text rather than dropped.
    pub fn decode(&self) -> DecodedBody {
        if self.declares_json() {
            if let Ok(value) = serde_json::from_str(&self.body) {
                return DecodedBody::Json(value);
            }
        }
        DecodedBody::Text(self.body.clone())
    }

    /// Error message for non-2xx responses: the `message` field of the
    /// decoded JSON body when present, else a generic placeholder.
    pub fn error_message(&self) -> String {
        if let DecodedBody::Json(value) = self.decode() {
            if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
        "Error".to_string()
    }

    /// Detach the response metadata for embedding into a typed error.
    pub fn into_error_response(self) -> ErrorResponse {
        ErrorResponse {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}
