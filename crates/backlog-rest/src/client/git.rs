//! Git repository operations.

use tracing::instrument;

use backlog_client::IdOrKey;

use crate::error::Result;
use crate::types::Repository;

impl super::BacklogApiClient {
    /// Get the Git repositories of a project.
    #[instrument(skip(self, project))]
    pub async fn get_git_repositories(
        &self,
        project: impl Into<IdOrKey>,
    ) -> Result<Vec<Repository>> {
        let project = Self::segment(project)?;
        Ok(self
            .client
            .get_json(
                &format!("api/v2/projects/{project}/git/repositories"),
                None::<&()>,
            )
            .await?)
    }

    /// Get a Git repository by numeric ID or by name.
    #[instrument(skip(self, project, repo))]
    pub async fn get_git_repository(
        &self,
        project: impl Into<IdOrKey>,
        repo: impl Into<IdOrKey>,
    ) -> Result<Repository> {
        let project = Self::segment(project)?;
        let repo = Self::segment(repo)?;
        Ok(self
            .client
            .get_json(
                &format!("api/v2/projects/{project}/git/repositories/{repo}"),
                None::<&()>,
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::BacklogApiClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_git_repository_by_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/projects/SRE/git/repositories/app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "projectId": 3,
                "name": "app",
                "sshUrl": "user@example.backlog.com:/SRE/app.git",
                "pushedAt": "2006-01-02T15:04:05Z"
            })))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let repo = client.get_git_repository("SRE", "app").await.unwrap();
        assert_eq!(repo.name, "app");
        assert_eq!(
            repo.pushed_at.unwrap().to_rfc3339(),
            "2006-01-02T15:04:05Z"
        );
    }
}
