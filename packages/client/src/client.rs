//! The asynchronous request dispatcher.

use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::content_type;
use crate::encode::encode_args;
use crate::error::Error;
use crate::request::{ApiPath, ApiRequest, Method};
use crate::response::ApiResponse;
use crate::session::{Session, SessionConfig};

/// A fully assembled request, ready for a transport to execute.
///
/// Everything except the network round-trip happens here: URL assembly,
/// the auth header, content negotiation and body serialization. Keeping
/// this step pure makes the rules testable without a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

pub(crate) fn prepare(session: &Session, request: &ApiRequest) -> Result<PreparedRequest, Error> {
    let path = request.path.encoded();
    let args = encode_args(&request.args);
    let url = format!("{}{}{}", session.base_url(), path, args);

    // GET, DELETE and HEAD never carry a body.
    let payload = match request.method {
        Method::GET | Method::DELETE | Method::HEAD => None,
        Method::POST | Method::PUT => request.payload.as_ref(),
    };

    let content_type = content_type::negotiate(
        request.method,
        &path,
        request.content_type.as_deref(),
        payload,
    )?;

    let body = match (payload, content_type.as_deref()) {
        (Some(payload), Some(ct)) if content_type::is_json(ct) => {
            Some(serde_json::to_string(payload)?)
        }
        // A non-JSON override sends the payload's text form unmodified.
        (Some(Value::String(text)), Some(_)) => Some(text.clone()),
        (Some(payload), Some(_)) => Some(payload.to_string()),
        _ => None,
    };

    let authorization = session
        .auth_token()
        .map(|token| format!("Basic {token}"));

    Ok(PreparedRequest {
        method: request.method,
        url,
        authorization,
        content_type,
        body,
    })
}

/// Asynchronous Fluidinfo client.
///
/// Holds an immutable [`Session`] and a connection-pooling HTTP client.
/// Every dispatched request resolves exactly once, as `Ok` with the
/// response envelope or as an `Err` carrying it. In-flight requests are
/// independent; nothing orders their completions.
pub struct Client {
    session: Session,
    http: reqwest::Client,
}

impl Client {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        Ok(Self::with_session(Session::new(config)?))
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            http: reqwest::Client::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch a request.
    ///
    /// Statuses below 300, plus 304, come back as `Ok`; any other status
    /// as [`Error::Api`] with the same envelope shape. Transport failures
    /// surface as [`Error::Http`].
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let prepared = prepare(&self.session, &request)?;
        debug!(method = ?prepared.method, url = %prepared.url, "dispatching request");

        let method: http::Method = prepared.method.into();
        let mut builder = self.http.request(method, &prepared.url);
        if let Some(ref authorization) = prepared.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(ref content_type) = prepared.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = prepared.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        let raw = response.text().await?;
        trace!(status, "request completed");

        ApiResponse::from_parts(status, status_text, headers, raw, request)?.into_result()
    }

    /// GET the resource at `path`.
    pub async fn get(&self, path: impl Into<ApiPath>) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::get(path)).await
    }

    /// POST `payload` as JSON to `path`.
    pub async fn post(
        &self,
        path: impl Into<ApiPath>,
        payload: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::post(path).with_payload(payload)?).await
    }

    /// PUT `payload` to `path`, negotiating the content type.
    pub async fn put(
        &self,
        path: impl Into<ApiPath>,
        payload: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::put(path).with_payload(payload)?).await
    }

    /// DELETE the resource at `path`.
    pub async fn delete(&self, path: impl Into<ApiPath>) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::delete(path)).await
    }

    /// HEAD the resource at `path`.
    pub async fn head(&self, path: impl Into<ApiPath>) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::head(path)).await
    }
}
