//! Error types for backlog-client.

use std::fmt;

/// Result type alias for backlog-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for backlog-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns the HTTP status code for remote errors, structured or not.
    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ErrorKind::Api { status, .. } => Some(status),
            ErrorKind::Http { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Returns true if this error came from the remote service.
    pub fn is_remote(&self) -> bool {
        self.status_code().is_some()
    }

    /// Returns the individual structured error entries, if any.
    pub fn api_errors(&self) -> Option<&[ApiError]> {
        match &self.kind {
            ErrorKind::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// A single entry of the Backlog error envelope
/// `{"errors":[{"message":..., "code":..., "moreInfo":...}]}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: i32,
    #[serde(rename = "moreInfo", default)]
    pub more_info: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code:{}, message:{}, moreInfo:{}",
            self.code, self.message, self.more_info
        )
    }
}

/// Join every envelope entry into one human-readable line.
fn join_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Structured remote error: non-2xx with a parseable error envelope.
    #[error("backlog api error: {}", join_api_errors(errors))]
    Api { status: u16, errors: Vec<ApiError> },

    /// Unstructured remote error: non-2xx without a parseable envelope.
    #[error("backlog server error: {status} {reason}")]
    Http { status: u16, reason: String },

    /// Identifier is neither a usable numeric ID nor a non-empty key.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// URL failed to parse or resolve.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Query options could not be encoded.
    #[error("query options error: {0}")]
    QueryEncode(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Connection error (DNS, TCP, TLS).
    #[error("connection error: {0}")]
    Connection(String),

    /// Local file I/O error (multipart upload source, byte sink).
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid client configuration (base URL shape, reqwest setup).
    #[error("configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_exposure() {
        let err = Error::new(ErrorKind::Http {
            status: 401,
            reason: "Unauthorized".to_string(),
        });
        assert_eq!(err.status_code(), Some(401));
        assert!(err.is_remote());

        let err = Error::new(ErrorKind::Api {
            status: 404,
            errors: vec![],
        });
        assert_eq!(err.status_code(), Some(404));

        let err = Error::new(ErrorKind::Timeout);
        assert_eq!(err.status_code(), None);
        assert!(!err.is_remote());
    }

    #[test]
    fn test_http_error_display() {
        let err = Error::new(ErrorKind::Http {
            status: 404,
            reason: "Not Found".to_string(),
        });
        assert_eq!(err.to_string(), "backlog server error: 404 Not Found");
    }

    #[test]
    fn test_api_error_display_joins_entries() {
        let err = Error::new(ErrorKind::Api {
            status: 404,
            errors: vec![
                ApiError {
                    message: "No space.".to_string(),
                    code: 6,
                    more_info: String::new(),
                },
                ApiError {
                    message: "No project.".to_string(),
                    code: 7,
                    more_info: "https://example.com".to_string(),
                },
            ],
        });

        let display = err.to_string();
        assert!(display.starts_with("backlog api error: "));
        assert!(display.contains("code:6"));
        assert!(display.contains("message:No space."));
        assert!(display.contains("moreInfo:"));
        assert!(display.contains("code:7"));
        assert!(display.contains("moreInfo:https://example.com"));
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{"message":"No space.","code":6,"moreInfo":""}"#;
        let err: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.code, 6);
        assert_eq!(err.message, "No space.");
        assert_eq!(err.more_info, "");

        // moreInfo is optional in practice
        let json = r#"{"message":"x","code":1}"#;
        let err: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.more_info, "");
    }

    #[test]
    fn test_local_error_display() {
        let cases: Vec<(ErrorKind, &str)> = vec![
            (
                ErrorKind::InvalidIdentifier("empty key".into()),
                "invalid identifier: empty key",
            ),
            (ErrorKind::InvalidUrl("no scheme".into()), "invalid URL: no scheme"),
            (
                ErrorKind::QueryEncode("nested object".into()),
                "query options error: nested object",
            ),
            (ErrorKind::Json("unexpected EOF".into()), "JSON error: unexpected EOF"),
            (ErrorKind::Timeout, "request timeout"),
            (ErrorKind::Connection("refused".into()), "connection error: refused"),
            (ErrorKind::Io("no such file".into()), "I/O error: no such file"),
            (
                ErrorKind::Config("base URL must end with a trailing slash".into()),
                "trailing slash",
            ),
            (ErrorKind::Other("something else".into()), "something else"),
        ];

        for (kind, expected_substring) in cases {
            let display = kind.to_string();
            assert!(
                display.contains(expected_substring),
                "Expected '{display}' to contain '{expected_substring}'"
            );
        }
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::other("disk full");
        let err = Error::with_source(ErrorKind::Io("write failed".into()), source_err);

        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "I/O error: write failed");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }
}
