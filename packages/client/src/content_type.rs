//! Content-type negotiation for outgoing payloads.
//!
//! The store distinguishes "raw tag value" writes, which accept bare
//! primitives under a dedicated MIME type, from every other JSON-bodied
//! operation. Structured values on a tag-value write are never silently
//! coerced: the caller must say what they are sending.

use serde_json::Value;

use crate::error::Error;
use crate::request::Method;
use crate::value::is_primitive;

/// Generic JSON bodies.
pub const JSON: &str = "application/json";

/// Bare tag values on `objects/` and `about/` PUTs.
pub const VALUE_JSON: &str = "application/vnd.fluiddb.value+json";

/// Whether `content_type` denotes a JSON-flavored body. Any `;`-separated
/// parameters such as `charset` are ignored.
pub fn is_json(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    mime == JSON || mime == VALUE_JSON
}

/// Pick the outgoing Content-Type for a request, in order:
///
/// 1. A `PUT` whose path starts with `objects/` or `about/` is a tag-value
///    write: use the explicit override if given, else [`VALUE_JSON`] when
///    the payload is a store primitive, else fail.
/// 2. Any other request carrying a payload uses [`JSON`].
/// 3. No payload, no Content-Type.
pub fn negotiate(
    method: Method,
    path: &str,
    explicit: Option<&str>,
    payload: Option<&Value>,
) -> Result<Option<String>, Error> {
    let tag_value_write =
        method == Method::PUT && (path.starts_with("objects/") || path.starts_with("about/"));

    if tag_value_write {
        if let Some(explicit) = explicit {
            return Ok(Some(explicit.to_string()));
        }
        return match payload {
            Some(payload) if is_primitive(payload) => Ok(Some(VALUE_JSON.to_string())),
            _ => Err(Error::value("Must supply Content-Type")),
        };
    }

    if payload.is_some() {
        return Ok(Some(JSON.to_string()));
    }

    Ok(None)
}
