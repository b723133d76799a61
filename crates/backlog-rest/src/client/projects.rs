//! Project operations: projects, members, statuses, categories,
//! versions/milestones, and issue types.

use chrono::NaiveDate;
use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::instrument;

use backlog_client::IdOrKey;

use crate::error::Result;
use crate::types::{Activity, Category, IssueType, Project, Status, User, Version};

use super::users::GetActivitiesOptions;

/// Options for `GET /api/v2/projects`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetProjectsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}

/// Input for `POST /api/v2/projects`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectInput {
    pub name: String,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasking_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_leader_can_edit_project_leader: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_formatting_rule: Option<String>,
}

/// Input for `PATCH /api/v2/projects/:projectIdOrKey`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasking_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_leader_can_edit_project_leader: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_formatting_rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Input for adding or updating a project status.
#[derive(Debug, Clone, Serialize)]
pub struct AddStatusInput {
    pub name: String,
    pub color: String,
}

/// Input for adding or updating a category.
#[derive(Debug, Clone, Serialize)]
pub struct AddCategoryInput {
    pub name: String,
}

/// Input for `POST /api/v2/projects/:projectIdOrKey/versions`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVersionInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_due_date: Option<NaiveDate>,
}

/// Input for `PATCH /api/v2/projects/:projectIdOrKey/versions/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVersionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Input for adding or updating an issue type.
#[derive(Debug, Clone, Serialize)]
pub struct AddIssueTypeInput {
    pub name: String,
    pub color: String,
}

#[derive(Serialize)]
struct UserIdBody {
    #[serde(rename = "userId")]
    user_id: u32,
}

impl super::BacklogApiClient {
    /// Get projects visible to the caller.
    #[instrument(skip(self, options))]
    pub async fn get_projects(&self, options: Option<&GetProjectsOptions>) -> Result<Vec<Project>> {
        Ok(self.client.get_json("api/v2/projects", options).await?)
    }

    /// Get a project by numeric ID or by key.
    #[instrument(skip(self, project))]
    pub async fn get_project(&self, project: impl Into<IdOrKey>) -> Result<Project> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}"), None::<&()>)
            .await?)
    }

    /// Add a project.
    #[instrument(skip(self, input))]
    pub async fn add_project(&self, input: &AddProjectInput) -> Result<Project> {
        Ok(self.client.post_json("api/v2/projects", input).await?)
    }

    /// Update a project.
    #[instrument(skip(self, project, input))]
    pub async fn update_project(
        &self,
        project: impl Into<IdOrKey>,
        input: &UpdateProjectInput,
    ) -> Result<Project> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(&format!("api/v2/projects/{segment}"), input)
            .await?)
    }

    /// Delete a project; returns the deleted project.
    #[instrument(skip(self, project))]
    pub async fn delete_project(&self, project: impl Into<IdOrKey>) -> Result<Project> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json(&format!("api/v2/projects/{segment}"))
            .await?)
    }

    /// Download the project icon into a byte sink; returns the bytes written.
    #[instrument(skip(self, project, sink))]
    pub async fn get_project_icon<W>(
        &self,
        project: impl Into<IdOrKey>,
        sink: &mut W,
    ) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .download(&format!("api/v2/projects/{segment}/image"), None::<&()>, sink)
            .await?)
    }

    /// Get recent activities in a project.
    #[instrument(skip(self, project, options))]
    pub async fn get_project_activities(
        &self,
        project: impl Into<IdOrKey>,
        options: Option<&GetActivitiesOptions>,
    ) -> Result<Vec<Activity>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}/activities"), options)
            .await?)
    }

    // =========================================================================
    // Members and admins
    // =========================================================================

    /// Get project members.
    #[instrument(skip(self, project))]
    pub async fn get_project_users(&self, project: impl Into<IdOrKey>) -> Result<Vec<User>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}/users"), None::<&()>)
            .await?)
    }

    /// Add a user to a project.
    #[instrument(skip(self, project))]
    pub async fn add_project_user(
        &self,
        project: impl Into<IdOrKey>,
        user_id: u32,
    ) -> Result<User> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .post_json(
                &format!("api/v2/projects/{segment}/users"),
                &UserIdBody { user_id },
            )
            .await?)
    }

    /// Remove a user from a project; returns the removed user.
    #[instrument(skip(self, project))]
    pub async fn delete_project_user(
        &self,
        project: impl Into<IdOrKey>,
        user_id: u32,
    ) -> Result<User> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json_with_body(
                &format!("api/v2/projects/{segment}/users"),
                &UserIdBody { user_id },
            )
            .await?)
    }

    /// Get project administrators.
    #[instrument(skip(self, project))]
    pub async fn get_project_admins(&self, project: impl Into<IdOrKey>) -> Result<Vec<User>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(
                &format!("api/v2/projects/{segment}/administrators"),
                None::<&()>,
            )
            .await?)
    }

    /// Grant project administrator rights to a user.
    #[instrument(skip(self, project))]
    pub async fn add_project_admin(
        &self,
        project: impl Into<IdOrKey>,
        user_id: u32,
    ) -> Result<User> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .post_json(
                &format!("api/v2/projects/{segment}/administrators"),
                &UserIdBody { user_id },
            )
            .await?)
    }

    /// Revoke project administrator rights from a user.
    #[instrument(skip(self, project))]
    pub async fn delete_project_admin(
        &self,
        project: impl Into<IdOrKey>,
        user_id: u32,
    ) -> Result<User> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json_with_body(
                &format!("api/v2/projects/{segment}/administrators"),
                &UserIdBody { user_id },
            )
            .await?)
    }

    // =========================================================================
    // Statuses
    // =========================================================================

    /// Get the statuses of a project.
    #[instrument(skip(self, project))]
    pub async fn get_statuses(&self, project: impl Into<IdOrKey>) -> Result<Vec<Status>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}/statuses"), None::<&()>)
            .await?)
    }

    /// Add a status to a project.
    #[instrument(skip(self, project, input))]
    pub async fn add_status(
        &self,
        project: impl Into<IdOrKey>,
        input: &AddStatusInput,
    ) -> Result<Status> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .post_json(&format!("api/v2/projects/{segment}/statuses"), input)
            .await?)
    }

    /// Update a project status.
    #[instrument(skip(self, project, input))]
    pub async fn update_status(
        &self,
        project: impl Into<IdOrKey>,
        status_id: u32,
        input: &AddStatusInput,
    ) -> Result<Status> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/projects/{segment}/statuses/{status_id}"),
                input,
            )
            .await?)
    }

    /// Delete a project status, moving its issues to `substitute_status_id`.
    #[instrument(skip(self, project))]
    pub async fn delete_status(
        &self,
        project: impl Into<IdOrKey>,
        status_id: u32,
        substitute_status_id: u32,
    ) -> Result<Status> {
        #[derive(Serialize)]
        struct Body {
            #[serde(rename = "substituteStatusId")]
            substitute_status_id: u32,
        }
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json_with_body(
                &format!("api/v2/projects/{segment}/statuses/{status_id}"),
                &Body {
                    substitute_status_id,
                },
            )
            .await?)
    }

    /// Reorder the statuses of a project.
    #[instrument(skip(self, project))]
    pub async fn update_status_order(
        &self,
        project: impl Into<IdOrKey>,
        status_ids: &[u32],
    ) -> Result<Vec<Status>> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "statusId")]
            status_ids: &'a [u32],
        }
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/projects/{segment}/statuses/updateDisplayOrder"),
                &Body {
                    status_ids,
                },
            )
            .await?)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Get the categories of a project.
    #[instrument(skip(self, project))]
    pub async fn get_categories(&self, project: impl Into<IdOrKey>) -> Result<Vec<Category>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}/categories"), None::<&()>)
            .await?)
    }

    /// Add a category to a project.
    #[instrument(skip(self, project, input))]
    pub async fn add_category(
        &self,
        project: impl Into<IdOrKey>,
        input: &AddCategoryInput,
    ) -> Result<Category> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .post_json(&format!("api/v2/projects/{segment}/categories"), input)
            .await?)
    }

    /// Rename a category.
    #[instrument(skip(self, project, input))]
    pub async fn update_category(
        &self,
        project: impl Into<IdOrKey>,
        category_id: u32,
        input: &AddCategoryInput,
    ) -> Result<Category> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/projects/{segment}/categories/{category_id}"),
                input,
            )
            .await?)
    }

    /// Delete a category; returns the deleted category.
    #[instrument(skip(self, project))]
    pub async fn delete_category(
        &self,
        project: impl Into<IdOrKey>,
        category_id: u32,
    ) -> Result<Category> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json(&format!(
                "api/v2/projects/{segment}/categories/{category_id}"
            ))
            .await?)
    }

    // =========================================================================
    // Versions / milestones
    // =========================================================================

    /// Get the versions (milestones) of a project.
    #[instrument(skip(self, project))]
    pub async fn get_versions(&self, project: impl Into<IdOrKey>) -> Result<Vec<Version>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}/versions"), None::<&()>)
            .await?)
    }

    /// Add a version to a project.
    #[instrument(skip(self, project, input))]
    pub async fn add_version(
        &self,
        project: impl Into<IdOrKey>,
        input: &AddVersionInput,
    ) -> Result<Version> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .post_json(&format!("api/v2/projects/{segment}/versions"), input)
            .await?)
    }

    /// Update a version.
    #[instrument(skip(self, project, input))]
    pub async fn update_version(
        &self,
        project: impl Into<IdOrKey>,
        version_id: u32,
        input: &UpdateVersionInput,
    ) -> Result<Version> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/projects/{segment}/versions/{version_id}"),
                input,
            )
            .await?)
    }

    /// Delete a version; returns the deleted version.
    #[instrument(skip(self, project))]
    pub async fn delete_version(
        &self,
        project: impl Into<IdOrKey>,
        version_id: u32,
    ) -> Result<Version> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json(&format!("api/v2/projects/{segment}/versions/{version_id}"))
            .await?)
    }

    // =========================================================================
    // Issue types
    // =========================================================================

    /// Get the issue types of a project.
    #[instrument(skip(self, project))]
    pub async fn get_issue_types(&self, project: impl Into<IdOrKey>) -> Result<Vec<IssueType>> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/projects/{segment}/issueTypes"), None::<&()>)
            .await?)
    }

    /// Add an issue type to a project.
    #[instrument(skip(self, project, input))]
    pub async fn add_issue_type(
        &self,
        project: impl Into<IdOrKey>,
        input: &AddIssueTypeInput,
    ) -> Result<IssueType> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .post_json(&format!("api/v2/projects/{segment}/issueTypes"), input)
            .await?)
    }

    /// Update an issue type.
    #[instrument(skip(self, project, input))]
    pub async fn update_issue_type(
        &self,
        project: impl Into<IdOrKey>,
        issue_type_id: u32,
        input: &AddIssueTypeInput,
    ) -> Result<IssueType> {
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/projects/{segment}/issueTypes/{issue_type_id}"),
                input,
            )
            .await?)
    }

    /// Delete an issue type, moving its issues to `substitute_issue_type_id`.
    #[instrument(skip(self, project))]
    pub async fn delete_issue_type(
        &self,
        project: impl Into<IdOrKey>,
        issue_type_id: u32,
        substitute_issue_type_id: u32,
    ) -> Result<IssueType> {
        #[derive(Serialize)]
        struct Body {
            #[serde(rename = "substituteIssueTypeId")]
            substitute_issue_type_id: u32,
        }
        let segment = Self::segment(project)?;
        Ok(self
            .client
            .delete_json_with_body(
                &format!("api/v2/projects/{segment}/issueTypes/{issue_type_id}"),
                &Body {
                    substitute_issue_type_id,
                },
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BacklogApiClient;
    use super::*;
    use backlog_client::ErrorKind;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_categories_by_key_and_by_id() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!([{"id": 12, "name": "dev", "displayOrder": 0}]);
        Mock::given(method("GET"))
            .and(path("/api/v2/projects/SRE/categories"))
            .and(query_param("apiKey", "K"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/projects/12/categories"))
            .and(query_param("apiKey", "K"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();

        let by_key = client.get_categories("SRE").await.unwrap();
        assert_eq!(by_key[0].name, "dev");

        let by_id = client.get_categories(12).await.unwrap();
        assert_eq!(by_id[0].id, 12);
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_network_call() {
        let mock_server = MockServer::start().await;
        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();

        let err = client.get_categories("").await.unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidIdentifier(_)));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_category_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/projects/SRE/categories"))
            .and(body_json(serde_json::json!({"name": "dev"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 12, "name": "dev", "displayOrder": 0
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let category = client
            .add_category(
                "SRE",
                &AddCategoryInput {
                    name: "dev".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(category.id, 12);
        assert_eq!(category.name, "dev");
        assert_eq!(category.display_order, 0);
    }

    #[test]
    fn test_update_project_input_omits_absent_fields() {
        let input = UpdateProjectInput {
            archived: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            serde_json::json!({"archived": true})
        );
    }
}
