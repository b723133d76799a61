//! Issue operations: search, CRUD, comments, attachments, participants.

use chrono::NaiveDate;
use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::instrument;

use backlog_client::IdOrKey;

use crate::error::Result;
use crate::types::{Attachment, Count, Issue, IssueComment, IssueSortKey, Order, User};

/// Options for `GET /api/v2/issues` and `GET /api/v2/issues/count`.
///
/// Sequence fields repeat on the wire, one pair per element.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetIssuesOptions {
    #[serde(rename = "projectId[]", skip_serializing_if = "Vec::is_empty")]
    pub project_ids: Vec<u32>,
    #[serde(rename = "issueTypeId[]", skip_serializing_if = "Vec::is_empty")]
    pub issue_type_ids: Vec<u32>,
    #[serde(rename = "categoryId[]", skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<u32>,
    #[serde(rename = "versionId[]", skip_serializing_if = "Vec::is_empty")]
    pub version_ids: Vec<u32>,
    #[serde(rename = "milestoneId[]", skip_serializing_if = "Vec::is_empty")]
    pub milestone_ids: Vec<u32>,
    #[serde(rename = "statusId[]", skip_serializing_if = "Vec::is_empty")]
    pub status_ids: Vec<u32>,
    #[serde(rename = "priorityId[]", skip_serializing_if = "Vec::is_empty")]
    pub priority_ids: Vec<u32>,
    #[serde(rename = "assigneeId[]", skip_serializing_if = "Vec::is_empty")]
    pub assignee_ids: Vec<u32>,
    #[serde(rename = "createdUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub created_user_ids: Vec<u32>,
    #[serde(rename = "resolutionId[]", skip_serializing_if = "Vec::is_empty")]
    pub resolution_ids: Vec<u32>,
    #[serde(rename = "id[]", skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u32>,
    #[serde(rename = "parentIssueId[]", skip_serializing_if = "Vec::is_empty")]
    pub parent_issue_ids: Vec<u32>,
    #[serde(rename = "parentChild", skip_serializing_if = "Option::is_none")]
    pub parent_child: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<bool>,
    #[serde(rename = "sharedFile", skip_serializing_if = "Option::is_none")]
    pub shared_file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<IssueSortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(rename = "createdSince", skip_serializing_if = "Option::is_none")]
    pub created_since: Option<NaiveDate>,
    #[serde(rename = "createdUntil", skip_serializing_if = "Option::is_none")]
    pub created_until: Option<NaiveDate>,
    #[serde(rename = "updatedSince", skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<NaiveDate>,
    #[serde(rename = "updatedUntil", skip_serializing_if = "Option::is_none")]
    pub updated_until: Option<NaiveDate>,
    #[serde(rename = "startDateSince", skip_serializing_if = "Option::is_none")]
    pub start_date_since: Option<NaiveDate>,
    #[serde(rename = "startDateUntil", skip_serializing_if = "Option::is_none")]
    pub start_date_until: Option<NaiveDate>,
    #[serde(rename = "dueDateSince", skip_serializing_if = "Option::is_none")]
    pub due_date_since: Option<NaiveDate>,
    #[serde(rename = "dueDateUntil", skip_serializing_if = "Option::is_none")]
    pub due_date_until: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Input for `POST /api/v2/issues`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIssueInput {
    pub project_id: u32,
    pub summary: String,
    pub issue_type_id: u32,
    pub priority_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_issue_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(rename = "categoryId[]", skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<u32>,
    #[serde(rename = "versionId[]", skip_serializing_if = "Vec::is_empty")]
    pub version_ids: Vec<u32>,
    #[serde(rename = "milestoneId[]", skip_serializing_if = "Vec::is_empty")]
    pub milestone_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u32>,
    #[serde(rename = "notifiedUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub notified_user_ids: Vec<u32>,
    #[serde(rename = "attachmentId[]", skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<u32>,
}

impl AddIssueInput {
    /// A minimal issue with the required fields only.
    pub fn new(
        project_id: u32,
        summary: impl Into<String>,
        issue_type_id: u32,
        priority_id: u32,
    ) -> Self {
        Self {
            project_id,
            summary: summary.into(),
            issue_type_id,
            priority_id,
            parent_issue_id: None,
            description: None,
            start_date: None,
            due_date: None,
            estimated_hours: None,
            actual_hours: None,
            category_ids: Vec::new(),
            version_ids: Vec::new(),
            milestone_ids: Vec::new(),
            assignee_id: None,
            notified_user_ids: Vec::new(),
            attachment_ids: Vec::new(),
        }
    }
}

/// Input for `PATCH /api/v2/issues/:issueIdOrKey`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_issue_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type_id: Option<u32>,
    #[serde(rename = "categoryId[]", skip_serializing_if = "Vec::is_empty")]
    pub category_ids: Vec<u32>,
    #[serde(rename = "versionId[]", skip_serializing_if = "Vec::is_empty")]
    pub version_ids: Vec<u32>,
    #[serde(rename = "milestoneId[]", skip_serializing_if = "Vec::is_empty")]
    pub milestone_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u32>,
    #[serde(rename = "notifiedUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub notified_user_ids: Vec<u32>,
    #[serde(rename = "attachmentId[]", skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Options for the issue comment listing endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetIssueCommentsOptions {
    #[serde(rename = "minId", skip_serializing_if = "Option::is_none")]
    pub min_id: Option<u64>,
    #[serde(rename = "maxId", skip_serializing_if = "Option::is_none")]
    pub max_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// Input for `POST /api/v2/issues/:issueIdOrKey/comments`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddIssueCommentInput {
    pub content: String,
    #[serde(rename = "notifiedUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub notified_user_ids: Vec<u32>,
    #[serde(rename = "attachmentId[]", skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<u32>,
}

#[derive(Serialize)]
struct CommentContentBody<'a> {
    content: &'a str,
}

impl super::BacklogApiClient {
    /// Search issues across the space.
    #[instrument(skip(self, options))]
    pub async fn get_issues(&self, options: Option<&GetIssuesOptions>) -> Result<Vec<Issue>> {
        Ok(self.client.get_json("api/v2/issues", options).await?)
    }

    /// Count issues matching the same filters as `get_issues`.
    #[instrument(skip(self, options))]
    pub async fn get_issue_count(&self, options: Option<&GetIssuesOptions>) -> Result<i64> {
        let count: Count = self.client.get_json("api/v2/issues/count", options).await?;
        Ok(count.count)
    }

    /// Get an issue by numeric ID or by key such as `SRE-42`.
    #[instrument(skip(self, issue))]
    pub async fn get_issue(&self, issue: impl Into<IdOrKey>) -> Result<Issue> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/issues/{segment}"), None::<&()>)
            .await?)
    }

    /// Add an issue.
    #[instrument(skip(self, input))]
    pub async fn add_issue(&self, input: &AddIssueInput) -> Result<Issue> {
        Ok(self.client.post_json("api/v2/issues", input).await?)
    }

    /// Update an issue.
    #[instrument(skip(self, issue, input))]
    pub async fn update_issue(
        &self,
        issue: impl Into<IdOrKey>,
        input: &UpdateIssueInput,
    ) -> Result<Issue> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .patch_json(&format!("api/v2/issues/{segment}"), input)
            .await?)
    }

    /// Delete an issue; returns the deleted issue.
    #[instrument(skip(self, issue))]
    pub async fn delete_issue(&self, issue: impl Into<IdOrKey>) -> Result<Issue> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .delete_json(&format!("api/v2/issues/{segment}"))
            .await?)
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Get comments on an issue.
    #[instrument(skip(self, issue, options))]
    pub async fn get_issue_comments(
        &self,
        issue: impl Into<IdOrKey>,
        options: Option<&GetIssueCommentsOptions>,
    ) -> Result<Vec<IssueComment>> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/issues/{segment}/comments"), options)
            .await?)
    }

    /// Count comments on an issue.
    #[instrument(skip(self, issue))]
    pub async fn get_issue_comment_count(&self, issue: impl Into<IdOrKey>) -> Result<i64> {
        let segment = Self::segment(issue)?;
        let count: Count = self
            .client
            .get_json(&format!("api/v2/issues/{segment}/comments/count"), None::<&()>)
            .await?;
        Ok(count.count)
    }

    /// Add a comment to an issue.
    #[instrument(skip(self, issue, input))]
    pub async fn add_issue_comment(
        &self,
        issue: impl Into<IdOrKey>,
        input: &AddIssueCommentInput,
    ) -> Result<IssueComment> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .post_json(&format!("api/v2/issues/{segment}/comments"), input)
            .await?)
    }

    /// Get a single comment on an issue.
    #[instrument(skip(self, issue))]
    pub async fn get_issue_comment(
        &self,
        issue: impl Into<IdOrKey>,
        comment_id: u64,
    ) -> Result<IssueComment> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .get_json(
                &format!("api/v2/issues/{segment}/comments/{comment_id}"),
                None::<&()>,
            )
            .await?)
    }

    /// Edit the content of a comment.
    #[instrument(skip(self, issue, content))]
    pub async fn update_issue_comment(
        &self,
        issue: impl Into<IdOrKey>,
        comment_id: u64,
        content: &str,
    ) -> Result<IssueComment> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .patch_json(
                &format!("api/v2/issues/{segment}/comments/{comment_id}"),
                &CommentContentBody { content },
            )
            .await?)
    }

    /// Delete a comment; returns the deleted comment.
    #[instrument(skip(self, issue))]
    pub async fn delete_issue_comment(
        &self,
        issue: impl Into<IdOrKey>,
        comment_id: u64,
    ) -> Result<IssueComment> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .delete_json(&format!(
                "api/v2/issues/{segment}/comments/{comment_id}"
            ))
            .await?)
    }

    // =========================================================================
    // Attachments
    // =========================================================================

    /// List attachments on an issue.
    #[instrument(skip(self, issue))]
    pub async fn get_issue_attachments(
        &self,
        issue: impl Into<IdOrKey>,
    ) -> Result<Vec<Attachment>> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/issues/{segment}/attachments"), None::<&()>)
            .await?)
    }

    /// Download an issue attachment into a byte sink; returns the bytes
    /// written.
    #[instrument(skip(self, issue, sink))]
    pub async fn download_issue_attachment<W>(
        &self,
        issue: impl Into<IdOrKey>,
        attachment_id: u64,
        sink: &mut W,
    ) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .download(
                &format!("api/v2/issues/{segment}/attachments/{attachment_id}"),
                None::<&()>,
                sink,
            )
            .await?)
    }

    /// Delete an issue attachment; returns the deleted attachment.
    #[instrument(skip(self, issue))]
    pub async fn delete_issue_attachment(
        &self,
        issue: impl Into<IdOrKey>,
        attachment_id: u64,
    ) -> Result<Attachment> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .delete_json(&format!(
                "api/v2/issues/{segment}/attachments/{attachment_id}"
            ))
            .await?)
    }

    /// Get users participating in an issue.
    #[instrument(skip(self, issue))]
    pub async fn get_issue_participants(&self, issue: impl Into<IdOrKey>) -> Result<Vec<User>> {
        let segment = Self::segment(issue)?;
        Ok(self
            .client
            .get_json(&format!("api/v2/issues/{segment}/participants"), None::<&()>)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BacklogApiClient;
    use super::*;
    use backlog_client::to_query_pairs;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_issue_search_options_encoding() {
        let options = GetIssuesOptions {
            project_ids: vec![3, 7],
            status_ids: vec![1],
            sort: Some(IssueSortKey::DueDate),
            order: Some(Order::Desc),
            count: Some(50),
            keyword: Some("crash".to_string()),
            ..Default::default()
        };
        let pairs = to_query_pairs(&options).unwrap();

        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "50".to_string()),
                ("keyword".to_string(), "crash".to_string()),
                ("order".to_string(), "desc".to_string()),
                ("projectId[]".to_string(), "3".to_string()),
                ("projectId[]".to_string(), "7".to_string()),
                ("sort".to_string(), "dueDate".to_string()),
                ("statusId[]".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_keyword_is_omitted() {
        let options = GetIssuesOptions {
            keyword: Some(String::new()),
            count: Some(1),
            ..Default::default()
        };
        let pairs = to_query_pairs(&options).unwrap();
        assert_eq!(pairs, vec![("count".to_string(), "1".to_string())]);
    }

    #[tokio::test]
    async fn test_get_issue_count_unwraps_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/issues/count"))
            .and(query_param("apiKey", "K"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 42})),
            )
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let count = client.get_issue_count(None).await.unwrap();
        assert_eq!(count, 42);
    }

    #[tokio::test]
    async fn test_get_issue_by_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/issues/SRE-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 99,
                "projectId": 3,
                "issueKey": "SRE-42",
                "keyId": 42,
                "issueType": {"id": 2, "projectId": 3, "name": "Bug", "color": "#990000", "displayOrder": 0},
                "summary": "Pager storm",
                "status": {"id": 1, "projectId": 3, "name": "Open", "color": "#ed8077", "displayOrder": 1000},
                "created": "2006-01-02T15:04:05Z"
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let issue = client.get_issue("SRE-42").await.unwrap();
        assert_eq!(issue.id, 99);
        assert_eq!(issue.issue_key, "SRE-42");
    }

    #[tokio::test]
    async fn test_update_issue_comment_sends_content_only() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/api/v2/issues/SRE-42/comments/18"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({"content": "revised"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 18, "content": "revised"
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let comment = client
            .update_issue_comment("SRE-42", 18, "revised")
            .await
            .unwrap();
        assert_eq!(comment.content.as_deref(), Some("revised"));
    }
}
