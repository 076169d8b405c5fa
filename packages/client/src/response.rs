//! The response envelope delivered for every completed request.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content_type;
use crate::error::Error;
use crate::request::ApiRequest;

/// The outcome of one dispatched request. Built once per completed call and
/// delivered exactly once, either directly or inside [`Error::Api`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,

    /// Canonical reason phrase, e.g. "OK" or "Not Found".
    pub status_text: String,

    /// Response headers, names lowercased.
    pub headers: HashMap<String, String>,

    /// Raw body text exactly as received.
    pub raw: String,

    /// JSON-decoded body when the response Content-Type is JSON-flavored,
    /// else the raw text as a JSON string.
    pub data: Value,

    /// The descriptor that produced this response.
    pub request: ApiRequest,
}

impl ApiResponse {
    /// Assemble an envelope from transport-level parts, decoding the body
    /// per its Content-Type.
    pub(crate) fn from_parts(
        status: u16,
        status_text: String,
        headers: HashMap<String, String>,
        raw: String,
        request: ApiRequest,
    ) -> Result<Self, Error> {
        let json_body = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .is_some_and(|(_, value)| content_type::is_json(value));

        let data = if json_body {
            if raw.trim().is_empty() {
                // JSON Content-Type on an empty body, e.g. a 204.
                Value::Null
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            Value::String(raw.clone())
        };

        Ok(Self {
            status,
            status_text,
            headers,
            raw,
            data,
            request,
        })
    }

    /// Whether the status routes to success: anything below 300, plus 304.
    pub fn is_success(&self) -> bool {
        self.status < 300 || self.status == 304
    }

    /// Deliver the envelope exactly once: success statuses as `Ok`, all
    /// others wrapped in [`Error::Api`].
    pub(crate) fn into_result(self) -> Result<Self, Error> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Api(Box::new(self)))
        }
    }

    /// Deserialize the decoded body into a concrete type.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers(content_type: &str) -> HashMap<String, String> {
        HashMap::from([("content-type".to_string(), content_type.to_string())])
    }

    fn request() -> ApiRequest {
        ApiRequest::get("objects/abc")
    }

    #[test]
    fn json_body_is_decoded() {
        let envelope = ApiResponse::from_parts(
            200,
            "OK".to_string(),
            headers("application/json"),
            r#"{"id":"abc"}"#.to_string(),
            request(),
        )
        .unwrap();
        assert_eq!(envelope.data, json!({"id": "abc"}));
        assert_eq!(envelope.raw, r#"{"id":"abc"}"#);
    }

    #[test]
    fn text_body_stays_raw() {
        let envelope = ApiResponse::from_parts(
            200,
            "OK".to_string(),
            headers("text/plain"),
            r#"{"id":"abc"}"#.to_string(),
            request(),
        )
        .unwrap();
        assert_eq!(envelope.data, Value::String(r#"{"id":"abc"}"#.to_string()));
    }

    #[test]
    fn value_mime_is_decoded_too() {
        let envelope = ApiResponse::from_parts(
            200,
            "OK".to_string(),
            headers("application/vnd.fluiddb.value+json"),
            "42".to_string(),
            request(),
        )
        .unwrap();
        assert_eq!(envelope.data, json!(42));
    }

    #[test]
    fn empty_json_body_decodes_to_null() {
        let envelope = ApiResponse::from_parts(
            204,
            "No Content".to_string(),
            headers("application/json"),
            String::new(),
            request(),
        )
        .unwrap();
        assert_eq!(envelope.data, Value::Null);
    }

    #[test]
    fn status_routing() {
        let ok = ApiResponse::from_parts(
            201,
            "Created".to_string(),
            HashMap::new(),
            String::new(),
            request(),
        )
        .unwrap();
        assert!(ok.into_result().is_ok());

        let not_modified = ApiResponse::from_parts(
            304,
            "Not Modified".to_string(),
            HashMap::new(),
            String::new(),
            request(),
        )
        .unwrap();
        assert!(not_modified.into_result().is_ok());

        let not_found = ApiResponse::from_parts(
            404,
            "Not Found".to_string(),
            HashMap::new(),
            String::new(),
            request(),
        )
        .unwrap();
        let err = not_found.into_result().unwrap_err();
        let envelope = err.response().expect("envelope on API error");
        assert_eq!(envelope.status, 404);
    }
}
