//! HTTP response handling.

use crate::wire::Envelope;
use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A buffered HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the given status.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Parse a `{ "data": ... }` envelope and return its payload.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let envelope: Envelope<T> = self.json()?;
        envelope
            .data
            .ok_or_else(|| FetchError::MissingData(format!("HTTP {}", self.status)))
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the API's `message` field when the body carries
    /// one, else the raw body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .or_else(|| self.text().ok().filter(|t| !t.is_empty()))
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(FetchError::Http {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_status_classes() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(300, b"").is_success());
        assert!(make_response(404, b"").is_client_error());
        assert!(!make_response(500, b"").is_client_error());
        assert!(make_response(503, b"").is_server_error());
    }

    #[test]
    fn test_data_envelope() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Item {
            sku: String,
        }

        let resp = Response::json_body(200, &json!({"data": [{"sku": "IRT-DJ-001"}]}));
        let items: Vec<Item> = resp.data().unwrap();
        assert_eq!(items, vec![Item { sku: "IRT-DJ-001".into() }]);

        let empty = Response::json_body(200, &json!({"success": true}));
        assert!(matches!(
            empty.data::<Vec<Item>>(),
            Err(FetchError::MissingData(_))
        ));
        // Item has no Default, so a missing `data` must not need one.
        assert!(matches!(empty.data::<Item>(), Err(FetchError::MissingData(_))));
    }

    #[test]
    fn test_json_parse_error() {
        let resp = make_response(200, b"not json");
        assert!(matches!(
            resp.json::<serde_json::Value>(),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let resp = Response::json_body(200, &json!({}));
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_error_for_status_uses_api_message() {
        let resp = Response::json_body(404, &json!({"message": "Product not found"}));
        match resp.error_for_status() {
            Err(FetchError::Http { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Product not found");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }

        let resp = make_response(502, b"Bad Gateway");
        match resp.error_for_status() {
            Err(FetchError::Http { message, .. }) => assert_eq!(message, "Bad Gateway"),
            other => panic!("expected HTTP error, got {:?}", other),
        }

        assert!(make_response(201, b"").error_for_status().is_ok());
    }
}
