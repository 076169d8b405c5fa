//! # fluidinfo-client
//!
//! A client for Fluidinfo, the tag-based data store.
//!
//! Fluidinfo holds opaque-id objects to which named tags are attached with
//! values. This crate authenticates a session, builds requests against the
//! REST endpoints and translates payloads between `serde_json::Value` and
//! the store's wire formats. The non-trivial part is content-type
//! negotiation: `PUT`s to `objects/` and `about/` set a single tag value
//! and accept bare primitives under a dedicated MIME type, while every
//! other bodied request carries plain JSON.
//!
//! ## Example
//!
//! ```ignore
//! use fluidinfo_client::{ApiRequest, Client, SessionConfig};
//!
//! let client = Client::new(
//!     SessionConfig::new().credentials("alice", "secret"),
//! )?;
//!
//! // Set a tag value on an object (bare primitive, negotiated MIME).
//! let request = ApiRequest::put(vec!["objects", object_id, "alice/rating"])
//!     .with_json_payload(serde_json::json!(5));
//! client.send(request).await?;
//!
//! // Query for matching objects, flattened to one row per object.
//! let rows = client.query(&["alice/rating"], "has alice/rating").await?;
//! ```
//!
//! Misuse (malformed endpoint, ambiguous content type, missing query
//! options) fails with [`Error::Value`] before any network activity.
//! Server-reported failures arrive as [`Error::Api`] carrying the full
//! response envelope; transport failures as [`Error::Http`].

pub mod content_type;
pub mod encode;
pub mod error;
pub mod query;
pub mod request;
pub mod response;
pub mod session;
pub mod value;

mod client;

#[cfg(feature = "blocking")]
pub mod blocking;

pub use client::Client;
pub use error::Error;
pub use query::QueryRow;
pub use request::{ApiPath, ApiRequest, Method, QueryValue};
pub use response::ApiResponse;
pub use session::{Instance, Session, SessionConfig};
