use crate::response::ApiResponse;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Locally-detected misuse: a malformed bespoke instance URL, missing
    /// query options, or an ambiguous content type for a tag-value write.
    /// Raised before any network activity.
    #[error("Value error: {message}")]
    Value { message: String },

    /// The server answered with a non-success status. Carries the full
    /// response envelope, same shape a successful call would deliver.
    #[error("API error: {} {}", .0.status, .0.status_text)]
    Api(Box<ApiResponse>),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn value(message: impl Into<String>) -> Self {
        Error::Value {
            message: message.into(),
        }
    }

    /// The response envelope of a server-reported failure, if this error
    /// carries one.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Error::Api(response) => Some(response),
            _ => None,
        }
    }
}
