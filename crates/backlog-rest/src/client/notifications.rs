//! Notification operations for the calling user.

use serde::Serialize;
use tracing::instrument;

use backlog_client::RequestMethod;

use crate::error::Result;
use crate::types::{Count, Notification, Order};

/// Options for the notification listing and count endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetNotificationsOptions {
    #[serde(rename = "minId", skip_serializing_if = "Option::is_none")]
    pub min_id: Option<u64>,
    #[serde(rename = "maxId", skip_serializing_if = "Option::is_none")]
    pub max_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(rename = "alreadyRead", skip_serializing_if = "Option::is_none")]
    pub already_read: Option<bool>,
    #[serde(rename = "resourceAlreadyRead", skip_serializing_if = "Option::is_none")]
    pub resource_already_read: Option<bool>,
}

impl super::BacklogApiClient {
    /// Get the caller's notifications.
    #[instrument(skip(self, options))]
    pub async fn get_notifications(
        &self,
        options: Option<&GetNotificationsOptions>,
    ) -> Result<Vec<Notification>> {
        Ok(self.client.get_json("api/v2/notifications", options).await?)
    }

    /// Count the caller's notifications.
    #[instrument(skip(self, options))]
    pub async fn get_notification_count(
        &self,
        options: Option<&GetNotificationsOptions>,
    ) -> Result<i64> {
        let count: Count = self
            .client
            .get_json("api/v2/notifications/count", options)
            .await?;
        Ok(count.count)
    }

    /// Mark all notifications as read; returns the number marked.
    #[instrument(skip(self))]
    pub async fn reset_unread_notification_count(&self) -> Result<i64> {
        let count: Count = self
            .client
            .post_json("api/v2/notifications/markAsRead", &serde_json::json!({}))
            .await?;
        Ok(count.count)
    }

    /// Mark a single notification as read. The remote answers with an
    /// empty body.
    #[instrument(skip(self))]
    pub async fn mark_notification_as_read(&self, notification_id: u64) -> Result<()> {
        let request = self.client.request(
            RequestMethod::Post,
            &format!("api/v2/notifications/{notification_id}/markAsRead"),
            None::<&()>,
        )?;
        self.client.execute(request).await?;
        Ok(())
    }
}
