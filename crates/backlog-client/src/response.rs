//! HTTP response handling and remote error classification.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::{ApiError, Error, ErrorKind, Result};

/// Wrapper around an HTTP response with Backlog-specific dispatch.
///
/// The body-consuming methods take `self`, so the body is read exactly
/// once on every path.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Get the response body as bytes.
    pub async fn bytes(self) -> Result<bytes::Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.inner.bytes().await.map_err(Error::from)?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    /// Deserialize the response body as JSON, tolerating an empty body.
    pub async fn json_opt<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let bytes = self.inner.bytes().await.map_err(Error::from)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&bytes).map(Some).map_err(Into::into)
    }

    /// Stream the response body into a caller-supplied byte sink.
    ///
    /// Returns the number of bytes written. On error the sink may hold a
    /// partial prefix of the body.
    pub async fn copy_to<W>(mut self, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written: u64 = 0;
        while let Some(chunk) = self.inner.chunk().await? {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        Ok(written)
    }

    /// Classify a non-2xx response into an error, consuming the body.
    ///
    /// With `debug` set, the full response (status line, headers, body) is
    /// rendered to the logger first; dumping never changes the returned
    /// error.
    pub(crate) async fn check_api_error(self, debug: bool) -> Result<Response> {
        if self.is_success() {
            return Ok(self);
        }

        let status = self.status();
        let reason = self
            .inner
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_string();

        if debug {
            let mut dump = format!("HTTP/{status} {reason}\n");
            for (name, value) in self.inner.headers() {
                dump.push_str(&format!("{}: {}\n", name, value.to_str().unwrap_or("?")));
            }
            let body = self.inner.text().await.unwrap_or_default();
            debug!(status, "response dump:\n{dump}\n{body}");
            return Err(classify_error(status, &reason, &body));
        }

        let body = self.inner.text().await.unwrap_or_default();
        Err(classify_error(status, &reason, &body))
    }
}

/// The Backlog error envelope.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ApiError>,
}

/// Classify a non-2xx response body.
///
/// A parseable envelope with at least one entry becomes a structured API
/// error; anything else degrades to a bare status-code error.
fn classify_error(status: u16, reason: &str, body: &str) -> Error {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if !envelope.errors.is_empty() {
            return Error::new(ErrorKind::Api {
                status,
                errors: envelope.errors,
            });
        }
    }

    Error::new(ErrorKind::Http {
        status,
        reason: reason.to_string(),
    })
}
