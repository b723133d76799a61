//! Webhook operations, scoped to a project.

use serde::Serialize;
use tracing::instrument;

use backlog_client::IdOrKey;

use crate::error::Result;
use crate::types::Webhook;

/// Input for `POST /api/v2/projects/:projectIdOrKey/webhooks`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWebhookInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub hook_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_event: Option<bool>,
    #[serde(rename = "activityTypeIds[]", skip_serializing_if = "Vec::is_empty")]
    pub activity_type_ids: Vec<i32>,
}

/// Input for `PATCH /api/v2/projects/:projectIdOrKey/webhooks/:webhookId`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWebhookInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_event: Option<bool>,
    #[serde(rename = "activityTypeIds[]", skip_serializing_if = "Vec::is_empty")]
    pub activity_type_ids: Vec<i32>,
}

impl super::BacklogApiClient {
    /// Get the webhooks of a project.
    #[instrument(skip(self, project))]
    pub async fn get_webhooks(&self, project: impl Into<IdOrKey>) -> Result<Vec<Webhook>> {
        let project = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{project}/webhooks"), None::<&()>)
            .await?)
    }

    /// Get a webhook.
    #[instrument(skip(self, project))]
    pub async fn get_webhook(
        &self,
        project: impl Into<IdOrKey>,
        webhook_id: u64,
    ) -> Result<Webhook> {
        let project = Self::segment(project)?;
        Ok(self
            .client
            .get_json(
                &format!("api/v2/projects/{project}/webhooks/{webhook_id}"),
                None::<&()>,
            )
            .await?)
    }

    /// Add a webhook to a project.
    #[instrument(skip(self, project, input))]
    pub async fn add_webhook(
        &self,
        project: impl Into<IdOrKey>,
        input: &AddWebhookInput,
    ) -> Result<Webhook> {
        let project = Self::segment(project)?;
        Ok(self
            .client
            .post_json(&format!("api/v2/projects/{project}/webhooks"), input)
            .await?)
    }

    /// Update a webhook.
    #[instrument(skip(self, project, input))]
    pub async fn update_webhook(
        &self,
        project: impl Into<IdOrKey>,
        webhook_id: u64,
        input: &UpdateWebhookInput,
    ) -> Result<Webhook> {
        let project = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/projects/{project}/webhooks/{webhook_id}"),
                input,
            )
            .await?)
    }

    /// Delete a webhook; returns the deleted webhook.
    #[instrument(skip(self, project))]
    pub async fn delete_webhook(
        &self,
        project: impl Into<IdOrKey>,
        webhook_id: u64,
    ) -> Result<Webhook> {
        let project = Self::segment(project)?;
        Ok(self
            .client
            .delete_json(&format!("api/v2/projects/{project}/webhooks/{webhook_id}"))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BacklogApiClient;
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_add_webhook() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/projects/SRE/webhooks"))
            .and(body_json(serde_json::json!({
                "name": "deploy-bot",
                "hookUrl": "https://hooks.example.com/backlog",
                "activityTypeIds[]": [1, 2]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3,
                "name": "deploy-bot",
                "hookUrl": "https://hooks.example.com/backlog",
                "allEvent": false,
                "activityTypeIds": [1, 2]
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let webhook = client
            .add_webhook(
                "SRE",
                &AddWebhookInput {
                    name: "deploy-bot".to_string(),
                    description: None,
                    hook_url: "https://hooks.example.com/backlog".to_string(),
                    all_event: None,
                    activity_type_ids: vec![1, 2],
                },
            )
            .await
            .unwrap();
        assert_eq!(webhook.id, 3);
        assert_eq!(webhook.activity_type_ids, vec![1, 2]);
    }
}
