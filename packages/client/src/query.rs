//! Convenience wrapper for the `values` query endpoint.
//!
//! The server answers a tag query with a doubly-nested structure: object id
//! to tag name to either a raw value or a `{"value": ...}` wrapper. This
//! module reshapes that into one flat row per matched object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::Error;
use crate::request::ApiRequest;

/// One matched object, flattened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRow {
    /// The object's opaque id.
    pub id: String,

    /// Requested tags by name, unwrapped from any value wrapper.
    pub tags: BTreeMap<String, Value>,
}

impl QueryRow {
    pub fn tag(&self, name: &str) -> Option<&Value> {
        self.tags.get(name)
    }
}

/// Validate the query options and build the `values` request. Fails before
/// any network activity when `select` or `where` is missing.
pub(crate) fn build_query_request(
    select: &[&str],
    where_clause: &str,
) -> Result<ApiRequest, Error> {
    if select.is_empty() {
        return Err(Error::value("Missing select option."));
    }
    if where_clause.is_empty() {
        return Err(Error::value("Missing where option."));
    }

    let tags: Vec<String> = select.iter().map(|tag| tag.to_string()).collect();
    Ok(ApiRequest::get("values")
        .with_arg("tag", tags)
        .with_arg("query", where_clause))
}

/// Reshape `results.id.{object_id}.{tag}` into flat rows, ordered by
/// object id. Wrapper objects carrying a `value` key are unwrapped to
/// their inner value.
pub(crate) fn flatten_results(data: &Value) -> Vec<QueryRow> {
    let mut rows = Vec::new();
    let Some(objects) = data.pointer("/results/id").and_then(Value::as_object) else {
        return rows;
    };

    for (object_id, tag_values) in objects {
        let mut tags = BTreeMap::new();
        if let Some(tag_values) = tag_values.as_object() {
            for (tag, value) in tag_values {
                let unwrapped = match value.get("value") {
                    Some(inner) => inner.clone(),
                    None => value.clone(),
                };
                tags.insert(tag.clone(), unwrapped);
            }
        }
        rows.push(QueryRow {
            id: object_id.clone(),
            tags,
        });
    }
    rows
}

impl Client {
    /// Select `select` tags from every object matching `where_clause`.
    ///
    /// Issues a single GET against `values` and delivers the flattened
    /// rows. Empty `select` or `where_clause` fails synchronously with
    /// [`Error::Value`]; no request goes out.
    pub async fn query(
        &self,
        select: &[&str],
        where_clause: &str,
    ) -> Result<Vec<QueryRow>, Error> {
        let request = build_query_request(select, where_clause)?;
        let response = self.send(request).await?;
        Ok(flatten_results(&response.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryValue;
    use serde_json::json;

    #[test]
    fn missing_select_fails() {
        assert!(matches!(
            build_query_request(&[], "has foo"),
            Err(Error::Value { .. })
        ));
    }

    #[test]
    fn missing_where_fails() {
        assert!(matches!(
            build_query_request(&["tagA"], ""),
            Err(Error::Value { .. })
        ));
    }

    #[test]
    fn request_targets_values_with_repeated_tag_args() {
        let request = build_query_request(&["tagA", "tagB"], "has tagA").unwrap();
        assert_eq!(request.path.encoded(), "values");
        assert_eq!(
            request.args[0],
            (
                "tag".to_string(),
                QueryValue::Many(vec!["tagA".to_string(), "tagB".to_string()])
            )
        );
        assert_eq!(
            request.args[1],
            ("query".to_string(), QueryValue::One("has tagA".to_string()))
        );
    }

    #[test]
    fn wrapped_values_are_unwrapped() {
        let data = json!({
            "results": {"id": {"obj1": {"tagA": {"value": 7}}}}
        });
        let rows = flatten_results(&data);
        assert_eq!(
            rows,
            vec![QueryRow {
                id: "obj1".to_string(),
                tags: BTreeMap::from([("tagA".to_string(), json!(7))]),
            }]
        );
    }

    #[test]
    fn raw_values_pass_through() {
        let data = json!({
            "results": {"id": {
                "obj1": {"tagA": "plain", "tagB": {"nested": true}},
                "obj2": {"tagA": [1, 2]}
            }}
        });
        let rows = flatten_results(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "obj1");
        assert_eq!(rows[0].tag("tagA"), Some(&json!("plain")));
        assert_eq!(rows[0].tag("tagB"), Some(&json!({"nested": true})));
        assert_eq!(rows[1].id, "obj2");
        assert_eq!(rows[1].tag("tagA"), Some(&json!([1, 2])));
    }

    #[test]
    fn unexpected_shapes_yield_no_rows() {
        assert!(flatten_results(&json!({})).is_empty());
        assert!(flatten_results(&json!({"results": {}})).is_empty());
        assert!(flatten_results(&json!("text")).is_empty());
    }
}
