//! Pull request operations: listing, CRUD, comments.
//!
//! Every path here nests under a project and a repository, both of
//! which may be carried as a numeric ID or a key/name.

use serde::Serialize;
use tracing::instrument;

use backlog_client::IdOrKey;

use crate::error::Result;
use crate::types::{Count, IssueComment, PullRequest};

use super::issues::GetIssueCommentsOptions;

/// Options for the pull request listing and count endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetPullRequestsOptions {
    #[serde(rename = "statusId[]", skip_serializing_if = "Vec::is_empty")]
    pub status_ids: Vec<u32>,
    #[serde(rename = "assigneeId[]", skip_serializing_if = "Vec::is_empty")]
    pub assignee_ids: Vec<u32>,
    #[serde(rename = "issueId[]", skip_serializing_if = "Vec::is_empty")]
    pub issue_ids: Vec<u64>,
    #[serde(rename = "createdUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub created_user_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Input for creating a pull request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPullRequestInput {
    pub summary: String,
    pub description: String,
    /// Merge target branch.
    pub base: String,
    /// Branch to merge from.
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u32>,
    #[serde(rename = "notifiedUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub notified_user_ids: Vec<u32>,
    #[serde(rename = "attachmentId[]", skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<u64>,
}

/// Input for updating a pull request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePullRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u32>,
    #[serde(rename = "notifiedUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub notified_user_ids: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Input for commenting on a pull request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPullRequestCommentInput {
    pub content: String,
    #[serde(rename = "notifiedUserId[]", skip_serializing_if = "Vec::is_empty")]
    pub notified_user_ids: Vec<u32>,
}

#[derive(Serialize)]
struct CommentContentBody<'a> {
    content: &'a str,
}

impl super::BacklogApiClient {
    fn pull_request_base(
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
    ) -> Result<String> {
        let project = Self::segment(project)?;
        let repo = Self::segment(repo)?;
        Ok(format!(
            "api/v2/projects/{project}/git/repositories/{repo}/pullRequests"
        ))
    }

    /// Get pull requests in a repository.
    #[instrument(skip(self, project, repo, options))]
    pub async fn get_pull_requests(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        options: Option<&GetPullRequestsOptions>,
    ) -> Result<Vec<PullRequest>> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self.client.get_json(&base, options).await?)
    }

    /// Count pull requests matching the same filters as
    /// `get_pull_requests`.
    #[instrument(skip(self, project, repo, options))]
    pub async fn get_pull_request_count(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        options: Option<&GetPullRequestsOptions>,
    ) -> Result<i64> {
        let base = Self::pull_request_base(project, repo)?;
        let count: Count = self.client.get_json(&format!("{base}/count"), options).await?;
        Ok(count.count)
    }

    /// Get a pull request by its per-repository number.
    #[instrument(skip(self, project, repo))]
    pub async fn get_pull_request(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        number: u64,
    ) -> Result<PullRequest> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self
            .client
            .get_json(&format!("{base}/{number}"), None::<&()>)
            .await?)
    }

    /// Create a pull request.
    #[instrument(skip(self, project, repo, input))]
    pub async fn add_pull_request(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        input: &AddPullRequestInput,
    ) -> Result<PullRequest> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self.client.post_json(&base, input).await?)
    }

    /// Update a pull request.
    #[instrument(skip(self, project, repo, input))]
    pub async fn update_pull_request(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        number: u64,
        input: &UpdatePullRequestInput,
    ) -> Result<PullRequest> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self
            .client
            .patch_json(&format!("{base}/{number}"), input)
            .await?)
    }

    /// Get comments on a pull request. Pull request comments share the
    /// issue comment shape.
    #[instrument(skip(self, project, repo, options))]
    pub async fn get_pull_request_comments(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        number: u64,
        options: Option<&GetIssueCommentsOptions>,
    ) -> Result<Vec<IssueComment>> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self
            .client
            .get_json(&format!("{base}/{number}/comments"), options)
            .await?)
    }

    /// Count comments on a pull request.
    #[instrument(skip(self, project, repo))]
    pub async fn get_pull_request_comment_count(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        number: u64,
    ) -> Result<i64> {
        let base = Self::pull_request_base(project, repo)?;
        let count: Count = self
            .client
            .get_json(&format!("{base}/{number}/comments/count"), None::<&()>)
            .await?;
        Ok(count.count)
    }

    /// Add a comment to a pull request.
    #[instrument(skip(self, project, repo, input))]
    pub async fn add_pull_request_comment(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        number: u64,
        input: &AddPullRequestCommentInput,
    ) -> Result<IssueComment> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self
            .client
            .post_json(&format!("{base}/{number}/comments"), input)
            .await?)
    }

    /// Edit the content of a pull request comment.
    #[instrument(skip(self, project, repo, content))]
    pub async fn update_pull_request_comment(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
        number: u64,
        comment_id: u64,
        content: &str,
    ) -> Result<IssueComment> {
        let base = Self::pull_request_base(project, repo)?;
        Ok(self
            .client
            .patch_json(
                &format!("{base}/{number}/comments/{comment_id}"),
                &CommentContentBody { content },
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BacklogApiClient;
    use super::*;
    use backlog_client::to_query_pairs;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_pull_request_options_repeat_sequences() {
        let options = GetPullRequestsOptions {
            status_ids: vec![1, 3],
            count: Some(20),
            ..Default::default()
        };
        let pairs = to_query_pairs(&options).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "20".to_string()),
                ("statusId[]".to_string(), "1".to_string()),
                ("statusId[]".to_string(), "3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_pull_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/projects/SRE/git/repositories/app/pullRequests"))
            .and(body_json(serde_json::json!({
                "summary": "Fix flaky retry",
                "description": "Backs off before the second attempt.",
                "base": "main",
                "branch": "fix/retry"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 2,
                "projectId": 3,
                "repositoryId": 1,
                "number": 14,
                "summary": "Fix flaky retry",
                "base": "main",
                "branch": "fix/retry"
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let pull_request = client
            .add_pull_request(
                "SRE",
                "app",
                &AddPullRequestInput {
                    summary: "Fix flaky retry".to_string(),
                    description: "Backs off before the second attempt.".to_string(),
                    base: "main".to_string(),
                    branch: "fix/retry".to_string(),
                    issue_id: None,
                    assignee_id: None,
                    notified_user_ids: Vec::new(),
                    attachment_ids: Vec::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(pull_request.number, 14);
        assert_eq!(pull_request.branch, "fix/retry");
    }

    #[tokio::test]
    async fn test_get_pull_request_comment_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(
                "/api/v2/projects/3/git/repositories/1/pullRequests/14/comments/count",
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 4})),
            )
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let count = client.get_pull_request_comment_count(3, 1, 14).await.unwrap();
        assert_eq!(count, 4);
    }
}
