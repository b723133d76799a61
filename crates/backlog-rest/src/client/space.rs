//! Space, licence, disk usage, rate limit, and space attachment operations.

use std::path::Path;

use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::instrument;

use crate::error::Result;
use crate::types::{
    Activity, DiskUsage, Licence, RateLimit, RateLimitResponse, Space, SpaceNotification,
    UploadedAttachment,
};

use super::users::GetActivitiesOptions;

/// Input for `PUT /api/v2/space/notification`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSpaceNotificationInput {
    pub content: String,
}

impl super::BacklogApiClient {
    /// Get the space.
    #[instrument(skip(self))]
    pub async fn get_space(&self) -> Result<Space> {
        Ok(self.client.get_json("api/v2/space", None::<&()>).await?)
    }

    /// Get recent activities in the space.
    #[instrument(skip(self, options))]
    pub async fn get_space_activities(
        &self,
        options: Option<&GetActivitiesOptions>,
    ) -> Result<Vec<Activity>> {
        Ok(self
            .client
            .get_json("api/v2/space/activities", options)
            .await?)
    }

    /// Download the space icon into a byte sink; returns the bytes written.
    #[instrument(skip(self, sink))]
    pub async fn get_space_icon<W>(&self, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        Ok(self
            .client
            .download("api/v2/space/image", None::<&()>, sink)
            .await?)
    }

    /// Get the space notification banner.
    #[instrument(skip(self))]
    pub async fn get_space_notification(&self) -> Result<SpaceNotification> {
        Ok(self
            .client
            .get_json("api/v2/space/notification", None::<&()>)
            .await?)
    }

    /// Update the space notification banner.
    #[instrument(skip(self, input))]
    pub async fn update_space_notification(
        &self,
        input: &UpdateSpaceNotificationInput,
    ) -> Result<SpaceNotification> {
        Ok(self
            .client
            .put_json("api/v2/space/notification", input)
            .await?)
    }

    /// Get disk usage of the space.
    #[instrument(skip(self))]
    pub async fn get_space_disk_usage(&self) -> Result<DiskUsage> {
        Ok(self
            .client
            .get_json("api/v2/space/diskUsage", None::<&()>)
            .await?)
    }

    /// Upload a file as a space attachment for later linking. The part is
    /// named `file`, per the remote's contract.
    #[instrument(skip(self))]
    pub async fn upload_attachment(
        &self,
        file_path: impl AsRef<Path> + std::fmt::Debug,
    ) -> Result<UploadedAttachment> {
        Ok(self
            .client
            .upload_file("api/v2/space/attachment", file_path, "file")
            .await?)
    }

    /// Get the space licence.
    #[instrument(skip(self))]
    pub async fn get_licence(&self) -> Result<Licence> {
        Ok(self
            .client
            .get_json("api/v2/space/licence", None::<&()>)
            .await?)
    }

    /// Get the caller's remaining rate-limit quotas. A plain resource
    /// operation: the transport never consults it.
    #[instrument(skip(self))]
    pub async fn get_rate_limit(&self) -> Result<RateLimit> {
        let response: RateLimitResponse =
            self.client.get_json("api/v2/rateLimit", None::<&()>).await?;
        Ok(response.rate_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BacklogApiClient;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_rate_limit_unwraps_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/rateLimit"))
            .and(query_param("apiKey", "K"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "rateLimit": {
                    "read": {"limit": 600, "remaining": 598, "reset": 1603881873},
                    "update": {"limit": 150, "remaining": 149, "reset": 1603881873},
                    "search": {"limit": 150, "remaining": 150, "reset": 1603881873},
                    "icon": {"limit": 60, "remaining": 60, "reset": 1603881873}
                }
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let limits = client.get_rate_limit().await.unwrap();
        assert_eq!(limits.read.remaining, 598);
    }

    #[tokio::test]
    async fn test_get_space_icon_streams_bytes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/space/image"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ICON".to_vec()))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let mut sink = Vec::new();
        let written = client.get_space_icon(&mut sink).await.unwrap();
        assert_eq!(written, 4);
        assert_eq!(sink, b"ICON");
    }
}
