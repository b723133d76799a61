//! Backlog API client.
//!
//! Wraps `BacklogClient` from `backlog-client` and provides one typed
//! method per remote operation, grouped by resource family.

use backlog_client::{BacklogClient, ClientConfig, IdOrKey};

use crate::error::Result;

pub mod git;
pub mod issues;
pub mod notifications;
pub mod projects;
pub mod pull_requests;
pub mod space;
pub mod teams;
pub mod users;
pub mod watchings;
pub mod webhooks;
pub mod wikis;

/// Backlog API v2 client.
///
/// One method per remote operation; every method renders its
/// identifiers, composes the relative `api/v2/...` path, appends query
/// options, and delegates to the transport.
///
/// # Example
///
/// ```rust,ignore
/// use backlog_rest::BacklogApiClient;
///
/// let client = BacklogApiClient::new("https://example.backlog.com/", "API_KEY")?;
///
/// let project = client.get_project("SRE").await?;
/// let categories = client.get_categories(project.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BacklogApiClient {
    client: BacklogClient,
}

impl BacklogApiClient {
    /// Create a new client with the given base endpoint and API key.
    pub fn new(base_url: impl AsRef<str>, api_key: impl Into<String>) -> Result<Self> {
        let client = BacklogClient::new(base_url, api_key)?;
        Ok(Self { client })
    }

    /// Create a new client with custom HTTP configuration.
    pub fn with_config(
        base_url: impl AsRef<str>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = BacklogClient::with_config(base_url, api_key, config)?;
        Ok(Self { client })
    }

    /// Create a client from an existing `BacklogClient`.
    pub fn from_client(client: BacklogClient) -> Self {
        Self { client }
    }

    /// Get the underlying `BacklogClient`.
    pub fn inner(&self) -> &BacklogClient {
        &self.client
    }

    /// Render a polymorphic identifier into a path segment, failing
    /// before any network call on an invalid carrier.
    pub(crate) fn segment(id: impl Into<IdOrKey>) -> Result<String> {
        Ok(id.into().to_segment()?)
    }
}
