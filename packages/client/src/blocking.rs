//! Blocking variants of the client, behind the `blocking` feature.
//!
//! Synchronous dispatch stalls the calling thread until the server
//! answers; the async [`crate::Client`] is the default and the better
//! choice anywhere an executor is available.

use std::collections::HashMap;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::debug;

use crate::client::prepare;
use crate::error::Error;
use crate::query::{build_query_request, flatten_results, QueryRow};
use crate::request::{ApiPath, ApiRequest};
use crate::response::ApiResponse;
use crate::session::{Session, SessionConfig};

/// Blocking Fluidinfo client. Same contract as the async
/// [`Client`](crate::Client), delivered synchronously.
pub struct Client {
    session: Session,
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        Ok(Self::with_session(Session::new(config)?))
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatch a request and block until it resolves.
    pub fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        let prepared = prepare(&self.session, &request)?;
        debug!(method = ?prepared.method, url = %prepared.url, "dispatching blocking request");

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

        let response = builder.send()?;

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

        let raw = response.text()?;
        ApiResponse::from_parts(status, status_text, headers, raw, request)?.into_result()
    }

    pub fn get(&self, path: impl Into<ApiPath>) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::get(path))
    }

    pub fn post(
        &self,
        path: impl Into<ApiPath>,
        payload: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::post(path).with_payload(payload)?)
    }

    pub fn put(
        &self,
        path: impl Into<ApiPath>,
        payload: impl Serialize,
    ) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::put(path).with_payload(payload)?)
    }

    pub fn delete(&self, path: impl Into<ApiPath>) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::delete(path))
    }

    pub fn head(&self, path: impl Into<ApiPath>) -> Result<ApiResponse, Error> {
        self.send(ApiRequest::head(path))
    }

    /// Blocking counterpart of [`Client::query`](crate::Client::query).
    pub fn query(&self, select: &[&str], where_clause: &str) -> Result<Vec<QueryRow>, Error> {
        let request = build_query_request(select, where_clause)?;
        let response = self.send(request)?;
        Ok(flatten_results(&response.data))
    }
}
