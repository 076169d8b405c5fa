//! Request descriptors: method, path, query arguments and payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encode::encode_path;

/// HTTP methods surfaced by the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::DELETE => http::Method::DELETE,
            Method::HEAD => http::Method::HEAD,
        }
    }
}

/// A request path: either a literal string used verbatim, or an ordered
/// list of raw segments that get percent-encoded individually.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ApiPath {
    Raw(String),
    Segments(Vec<String>),
}

impl ApiPath {
    /// The path as appended to the base URL: no leading slash, segments
    /// joined with `/`. Literal paths pass through untouched.
    pub fn encoded(&self) -> String {
        match self {
            ApiPath::Raw(path) => path.clone(),
            ApiPath::Segments(segments) => encode_path(segments),
        }
    }
}

impl From<&str> for ApiPath {
    fn from(path: &str) -> Self {
        ApiPath::Raw(path.to_string())
    }
}

impl From<String> for ApiPath {
    fn from(path: String) -> Self {
        ApiPath::Raw(path)
    }
}

impl From<Vec<String>> for ApiPath {
    fn from(segments: Vec<String>) -> Self {
        ApiPath::Segments(segments)
    }
}

impl From<Vec<&str>> for ApiPath {
    fn from(segments: Vec<&str>) -> Self {
        ApiPath::Segments(segments.into_iter().map(String::from).collect())
    }
}

/// One query argument value: a scalar, or a list that repeats its key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::One(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::One(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Many(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::Many(values.into_iter().map(String::from).collect())
    }
}

/// A single API request, built once and consumed by dispatch.
///
/// The entry-point constructors fix the method; `GET`, `DELETE` and `HEAD`
/// drop any payload at dispatch time since those requests carry no body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest {
    #[serde(default)]
    pub method: Method,

    pub path: ApiPath,

    /// Query arguments, in insertion order. Keys are repeated for `Many`
    /// values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<(String, QueryValue)>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Explicit Content-Type override; when absent the dispatcher
    /// negotiates one from the method, path and payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<ApiPath>) -> Self {
        Self {
            method,
            path: path.into(),
            args: Vec::new(),
            payload: None,
            content_type: None,
        }
    }

    pub fn get(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn head(path: impl Into<ApiPath>) -> Self {
        Self::new(Method::HEAD, path)
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    pub fn with_payload(mut self, payload: impl Serialize) -> Result<Self, serde_json::Error> {
        self.payload = Some(serde_json::to_value(payload)?);
        Ok(self)
    }

    pub fn with_json_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_path_passes_through() {
        let path = ApiPath::from("objects/abc/ns/tag");
        assert_eq!(path.encoded(), "objects/abc/ns/tag");
    }

    #[test]
    fn segment_path_is_encoded() {
        let path = ApiPath::from(vec!["about", "tv shows", "rating"]);
        assert_eq!(path.encoded(), "about/tv%20shows/rating");
    }

    #[test]
    fn builder_collects_args_in_order() {
        let request = ApiRequest::get("values")
            .with_arg("tag", vec!["x", "y"])
            .with_arg("query", "has foo");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.args.len(), 2);
        assert_eq!(request.args[0].0, "tag");
        assert_eq!(request.args[1].1, QueryValue::One("has foo".to_string()));
    }

    #[test]
    fn with_payload_serializes() {
        let request = ApiRequest::post("namespaces/test")
            .with_payload(json!({"name": "ns", "description": "d"}))
            .unwrap();
        assert_eq!(request.payload, Some(json!({"name": "ns", "description": "d"})));
    }
}
