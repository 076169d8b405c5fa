//! Percent-encoding of URL paths and query arguments.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::request::QueryValue;

/// Everything outside the RFC 3986 unreserved set gets escaped, so `/`
/// inside a path segment and spaces inside query values come out as
/// percent sequences.
const ESCAPED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn escape(raw: &str) -> String {
    utf8_percent_encode(raw, ESCAPED).to_string()
}

/// Join path segments with `/`, escaping each segment independently.
/// No leading slash: the result is appended to a base URL that already
/// ends with one.
pub fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| escape(segment.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Render query arguments as a `?key=value&...` string. A `Many` value
/// repeats its key once per element. No arguments (or only empty lists)
/// yields the empty string, without a stray `?`.
pub fn encode_args(args: &[(String, QueryValue)]) -> String {
    let mut pairs = Vec::new();
    for (key, value) in args {
        match value {
            QueryValue::One(value) => {
                pairs.push(format!("{}={}", escape(key), escape(value)));
            }
            QueryValue::Many(values) => {
                for value in values {
                    pairs.push(format!("{}={}", escape(key), escape(value)));
                }
            }
        }
    }
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_join_without_leading_slash() {
        assert_eq!(encode_path(&["a", "b", "c"]), "a/b/c");
    }

    #[test]
    fn path_segments_escape_independently() {
        assert_eq!(
            encode_path(&["about", "a/b c", "ns/tag"]),
            "about/a%2Fb%20c/ns%2Ftag"
        );
    }

    #[test]
    fn empty_args_yield_empty_string() {
        assert_eq!(encode_args(&[]), "");
        assert_eq!(
            encode_args(&[("tag".to_string(), QueryValue::Many(vec![]))]),
            ""
        );
    }

    #[test]
    fn scalar_and_list_args() {
        let args = vec![
            ("tag".to_string(), QueryValue::Many(vec!["x".into(), "y".into()])),
            ("query".to_string(), QueryValue::One("has foo".into())),
        ];
        assert_eq!(encode_args(&args), "?tag=x&tag=y&query=has%20foo");
    }

    #[test]
    fn keys_and_values_are_escaped() {
        let args = vec![("a b".to_string(), QueryValue::One("c&d".into()))];
        assert_eq!(encode_args(&args), "?a%20b=c%26d");
    }
}
