//! High-level Backlog client: credentials + URL composition + typed helpers.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWrite;
use tracing::instrument;
use url::Url;

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::query::append_options;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;

/// High-level Backlog API client.
///
/// Holds the base endpoint, the API key, and the HTTP client; composes
/// URLs and provides typed request helpers for the resource-operation
/// layer. Created once per credential, then shared: it mutates no state
/// after construction and is safe for concurrent use.
///
/// The API key travels as an `apiKey` query parameter on every request;
/// the remote does not use an authorization header.
///
/// # Example
///
/// ```rust,ignore
/// use backlog_client::BacklogClient;
///
/// let client = BacklogClient::new("https://example.backlog.com/", "API_KEY")?;
/// let space: Space = client.get_json("api/v2/space", None::<&()>).await?;
/// ```
#[derive(Clone)]
pub struct BacklogClient {
    http: HttpClient,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for BacklogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacklogClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl BacklogClient {
    /// Create a new Backlog client with default configuration.
    ///
    /// `base_url` must be an absolute URL whose path ends with `/`
    /// (e.g. `https://example.backlog.com/`), so that relative paths
    /// resolve underneath it.
    pub fn new(base_url: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, api_key, ClientConfig::default())
    }

    /// Create a new Backlog client with custom configuration.
    pub fn with_config(
        base_url: impl AsRef<str>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if base_url.cannot_be_a_base() {
            return Err(Error::new(ErrorKind::Config(format!(
                "base URL '{base_url}' is not an absolute HTTP endpoint"
            ))));
        }
        if !base_url.path().ends_with('/') {
            return Err(Error::new(ErrorKind::Config(format!(
                "base URL '{base_url}' must end with a trailing slash"
            ))));
        }

        let http = HttpClient::new(config)?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Get the base endpoint URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Resolve `path` against the base endpoint and attach the `apiKey`
    /// credential, keeping any query parameters `path` already carries.
    ///
    /// A path starting with `/` replaces the base's path, which is
    /// permitted; percent-encoding is applied during resolution.
    pub fn url(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// Build a request for `path` with optional query options merged in.
    pub fn request<O: Serialize>(
        &self,
        method: RequestMethod,
        path: &str,
        options: Option<&O>,
    ) -> Result<RequestBuilder> {
        let mut url = self.url(path)?;
        append_options(&mut url, options)?;
        Ok(RequestBuilder::new(method, url))
    }

    /// Execute a prepared request.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// GET with optional query options and a typed JSON response.
    #[instrument(skip(self, options), fields(path = %path))]
    pub async fn get_json<T, O>(&self, path: &str, options: Option<&O>) -> Result<T>
    where
        T: DeserializeOwned,
        O: Serialize,
    {
        let request = self.request(RequestMethod::Get, path, options)?;
        self.execute(request).await?.json().await
    }

    /// POST with a JSON body and a typed JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self
            .request(RequestMethod::Post, path, None::<&()>)?
            .json(body)?;
        self.execute(request).await?.json().await
    }

    /// PUT with a JSON body and a typed JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self
            .request(RequestMethod::Put, path, None::<&()>)?
            .json(body)?;
        self.execute(request).await?.json().await
    }

    /// PATCH with a JSON body and a typed JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self
            .request(RequestMethod::Patch, path, None::<&()>)?
            .json(body)?;
        self.execute(request).await?.json().await
    }

    /// DELETE with a typed JSON response (Backlog returns the deleted
    /// entity).
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(RequestMethod::Delete, path, None::<&()>)?;
        self.execute(request).await?.json().await
    }

    /// DELETE with a JSON body and a typed JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn delete_json_with_body<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let request = self
            .request(RequestMethod::Delete, path, None::<&()>)?
            .json(body)?;
        self.execute(request).await?.json().await
    }

    /// GET streaming the raw response body into a caller-supplied byte
    /// sink (icons, attachment downloads). Returns the bytes written.
    #[instrument(skip(self, options, sink), fields(path = %path))]
    pub async fn download<O, W>(
        &self,
        path: &str,
        options: Option<&O>,
        sink: &mut W,
    ) -> Result<u64>
    where
        O: Serialize,
        W: AsyncWrite + Unpin,
    {
        let request = self.request(RequestMethod::Get, path, options)?;
        self.execute(request).await?.copy_to(sink).await
    }

    /// Upload a file as a single-part multipart form.
    ///
    /// The part is named `field`, its filename is the base name of
    /// `file_path`, and its content type is inferred from the extension
    /// (`application/octet-stream` when unknown). The file is read once,
    /// before the request is sent; open/read failures surface as local
    /// I/O errors and no network call is made.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file_path: impl AsRef<Path> + std::fmt::Debug,
        field: &str,
    ) -> Result<T> {
        let file_path = file_path.as_ref();
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::new(ErrorKind::Io(format!(
                    "path '{}' has no usable file name",
                    file_path.display()
                )))
            })?
            .to_string();

        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            Error::with_source(
                ErrorKind::Io(format!("failed to read '{}': {e}", file_path.display())),
                e,
            )
        })?;

        let request = self
            .request(RequestMethod::Post, path, None::<&()>)?
            .multipart(field, file_name, bytes);
        self.execute(request).await?.json().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_base_url_requires_trailing_slash() {
        let err = BacklogClient::new("https://example.backlog.com/api", "K").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Config(_)));
        assert!(err.to_string().contains("trailing slash"));
    }

    #[test]
    fn test_base_url_must_parse() {
        let err = BacklogClient::new("not a url", "K").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }

    #[test]
    fn test_url_composition() {
        let client = BacklogClient::new("https://example.backlog.com/", "K").unwrap();

        assert_eq!(
            client.url("api/v2/space").unwrap().as_str(),
            "https://example.backlog.com/api/v2/space?apiKey=K"
        );

        // A leading slash replaces the base path, which is permitted.
        assert_eq!(
            client.url("/api/v2/users").unwrap().as_str(),
            "https://example.backlog.com/api/v2/users?apiKey=K"
        );
    }

    #[test]
    fn test_url_preserves_existing_query() {
        let client = BacklogClient::new("https://example.backlog.com/", "K").unwrap();
        assert_eq!(
            client.url("api/v2/issues?count=20").unwrap().query(),
            Some("count=20&apiKey=K")
        );
    }

    #[test]
    fn test_url_percent_encodes_path() {
        let client = BacklogClient::new("https://example.backlog.com/", "K").unwrap();
        let url = client.url("api/v2/projects/MY KEY/categories").unwrap();
        assert!(url.path().contains("MY%20KEY"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = BacklogClient::new("https://example.backlog.com/", "secret").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
    }

    #[tokio::test]
    async fn test_get_json_sends_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/space"))
            .and(query_param("apiKey", "K"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spaceKey": "example"
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let body: serde_json::Value = client.get_json("api/v2/space", None::<&()>).await.unwrap();
        assert_eq!(body["spaceKey"], "example");
    }

    #[tokio::test]
    async fn test_upload_file_missing_file_is_local_io_error() {
        let client = BacklogClient::new("https://example.backlog.com/", "K").unwrap();
        let err = client
            .upload_file::<serde_json::Value>(
                "api/v2/space/attachment",
                "/definitely/not/here.png",
                "file",
            )
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Io(_)));
    }
}
