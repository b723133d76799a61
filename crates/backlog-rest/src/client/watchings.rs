//! Watching operations.

use serde::Serialize;
use tracing::instrument;

use backlog_client::RequestMethod;

use crate::error::Result;
use crate::types::{Count, Order, Watching};

/// Options for the watching listing and count endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetWatchingsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(rename = "resourceAlreadyRead", skip_serializing_if = "Option::is_none")]
    pub resource_already_read: Option<bool>,
    #[serde(rename = "issueId[]", skip_serializing_if = "Vec::is_empty")]
    pub issue_ids: Vec<u64>,
}

/// Input for `POST /api/v2/watchings`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchingInput {
    pub issue_id_or_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    note: &'a str,
}

impl super::BacklogApiClient {
    /// Get a user's watchings.
    #[instrument(skip(self, options))]
    pub async fn get_user_watchings(
        &self,
        user_id: u32,
        options: Option<&GetWatchingsOptions>,
    ) -> Result<Vec<Watching>> {
        Ok(self
            .client
            .get_json(&format!("api/v2/users/{user_id}/watchings"), options)
            .await?)
    }

    /// Count a user's watchings.
    #[instrument(skip(self, options))]
    pub async fn get_user_watching_count(
        &self,
        user_id: u32,
        options: Option<&GetWatchingsOptions>,
    ) -> Result<i64> {
        let count: Count = self
            .client
            .get_json(&format!("api/v2/users/{user_id}/watchings/count"), options)
            .await?;
        Ok(count.count)
    }

    /// Get a watching.
    #[instrument(skip(self))]
    pub async fn get_watching(&self, watching_id: u64) -> Result<Watching> {
        Ok(self
            .client
            .get_json(&format!("api/v2/watchings/{watching_id}"), None::<&()>)
            .await?)
    }

    /// Start watching an issue.
    #[instrument(skip(self, input))]
    pub async fn add_watching(&self, input: &AddWatchingInput) -> Result<Watching> {
        Ok(self.client.post_json("api/v2/watchings", input).await?)
    }

    /// Update the note on a watching.
    #[instrument(skip(self, note))]
    pub async fn update_watching(&self, watching_id: u64, note: &str) -> Result<Watching> {
        Ok(self
            .client
            .patch_json(&format!("api/v2/watchings/{watching_id}"), &NoteBody { note })
            .await?)
    }

    /// Stop watching; returns the deleted watching.
    #[instrument(skip(self))]
    pub async fn delete_watching(&self, watching_id: u64) -> Result<Watching> {
        Ok(self
            .client
            .delete_json(&format!("api/v2/watchings/{watching_id}"))
            .await?)
    }

    /// Mark a watching as read. The remote answers with an empty body.
    #[instrument(skip(self))]
    pub async fn mark_watching_as_read(&self, watching_id: u64) -> Result<()> {
        let request = self.client.request(
            RequestMethod::Post,
            &format!("api/v2/watchings/{watching_id}/markAsRead"),
            None::<&()>,
        )?;
        self.client.execute(request).await?;
        Ok(())
    }
}
