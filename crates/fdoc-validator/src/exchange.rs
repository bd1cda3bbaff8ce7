//! A recorded HTTP exchange.

use fdoc_core::HttpMethod;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One request/response pair to check against the declarations.
///
/// Bodies are optional; a JSON `null` body is treated as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// HTTP verb of the request.
    pub method: HttpMethod,
    /// Request URL. Origin, query string and fragment are ignored.
    pub url: String,
    /// Response status.
    #[serde(alias = "status")]
    pub status_code: u16,
    /// Request body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    /// Response body, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<Value>,
}

impl Exchange {
    /// An exchange without bodies.
    pub fn new(method: HttpMethod, url: impl Into<String>, status_code: u16) -> Self {
        Self {
            method,
            url: url.into(),
            status_code,
            request_body: None,
            response_body: None,
        }
    }

    pub fn with_request_body(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn with_response_body(mut self, body: Value) -> Self {
        self.response_body = Some(body);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_recorded_exchange() {
        let raw = json!({
            "method": "POST",
            "url": "https://api.example.com/widgets?dry_run=1",
            "status": 201,
            "request_body": { "name": "sprocket" },
            "response_body": null
        });
        let exchange: Exchange = serde_json::from_value(raw).unwrap();
        assert_eq!(exchange.method, HttpMethod::Post);
        assert_eq!(exchange.status_code, 201);
        assert_eq!(exchange.request_body, Some(json!({ "name": "sprocket" })));
        assert_eq!(exchange.response_body, None);
    }

    #[test]
    fn test_lowercase_method_in_recording() {
        let exchange: Exchange =
            serde_json::from_str(r#"{"method":"get","url":"/widgets/1","status_code":200}"#)
                .unwrap();
        assert_eq!(exchange.method, HttpMethod::Get);
    }

    #[test]
    fn test_serialize_skips_absent_bodies() {
        let exchange = Exchange::new(HttpMethod::Get, "/widgets/1", 200);
        let value = serde_json::to_value(&exchange).unwrap();
        assert_eq!(
            value,
            json!({ "method": "GET", "url": "/widgets/1", "status_code": 200 })
        );
    }
}
