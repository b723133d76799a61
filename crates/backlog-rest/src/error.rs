//! Error type for backlog-rest.
//!
//! A thin wrapper over the transport error; resource operations add no
//! failure modes of their own beyond what the transport reports.

/// Result type alias for backlog-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for backlog-rest operations.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(#[from] backlog_client::Error);

impl Error {
    /// Returns the HTTP status code for remote errors.
    pub fn status_code(&self) -> Option<u16> {
        self.0.status_code()
    }

    /// The kind of the underlying transport error.
    pub fn kind(&self) -> &backlog_client::ErrorKind {
        &self.0.kind
    }

    /// Consume the wrapper, yielding the transport error.
    pub fn into_inner(self) -> backlog_client::Error {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backlog_client::ErrorKind;

    #[test]
    fn test_status_code_passthrough() {
        let err: Error = backlog_client::Error::new(ErrorKind::Http {
            status: 404,
            reason: "Not Found".to_string(),
        })
        .into();

        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "backlog server error: 404 Not Found");
    }

    #[test]
    fn test_local_error_has_no_status() {
        let err: Error = backlog_client::Error::new(ErrorKind::InvalidIdentifier(
            "key must not be empty".to_string(),
        ))
        .into();

        assert_eq!(err.status_code(), None);
        assert!(matches!(err.kind(), ErrorKind::InvalidIdentifier(_)));
    }
}
