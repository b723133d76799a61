//! Raw HTTP execution over reqwest.

use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder};
use crate::response::Response;

/// HTTP client for the Backlog API.
///
/// All traffic from every resource operation passes through
/// [`HttpClient::execute`]: one build / send / classify pipeline. The
/// client holds no per-request mutable state and is safe to share across
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request: send it, then classify the response.
    ///
    /// 2xx responses come back as a [`Response`] for the caller to
    /// dispatch; anything else is classified into a structured or bare
    /// status error. Cancellation is the caller dropping the returned
    /// future, which aborts the in-flight connection.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), request.url.clone());

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.json(value),
                RequestBody::Multipart { .. } => req.multipart(body.to_multipart_form()?),
            };
        }

        if self.config.debug {
            debug!(method = ?request.method, url = %request.url, "sending request");
        }

        let response = req.send().await?;

        if self.config.debug {
            debug!(
                status = response.status().as_u16(),
                content_length = response.content_length(),
                "response received"
            );
        }

        Response::new(response).check_api_error(self.config.debug).await
    }
}
