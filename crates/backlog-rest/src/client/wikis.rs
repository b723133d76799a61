//! Wiki operations: pages, tags, attachments.

use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::instrument;

use backlog_client::IdOrKey;

use crate::error::Result;
use crate::types::{Attachment, Count, Tag, Wiki};

/// Options for `GET /api/v2/wikis`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetWikisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// The wiki listing endpoints scope by project through a query
/// parameter rather than a path segment.
#[derive(Serialize)]
struct WikiListQuery<'a> {
    #[serde(rename = "projectIdOrKey")]
    project: String,
    #[serde(flatten)]
    options: Option<&'a GetWikisOptions>,
}

/// Input for `POST /api/v2/wikis`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWikiInput {
    pub project_id: u32,
    pub name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_notify: Option<bool>,
}

/// Input for `PATCH /api/v2/wikis/:wikiId`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWikiInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_notify: Option<bool>,
}

impl super::BacklogApiClient {
    /// Get wiki pages in a project.
    #[instrument(skip(self, project, options))]
    pub async fn get_wikis(
        &self,
        project: impl Into<IdOrKey>,
        options: Option<&GetWikisOptions>,
    ) -> Result<Vec<Wiki>> {
        let query = WikiListQuery {
            project: Self::segment(project)?,
            options,
        };
        Ok(self.client.get_json("api/v2/wikis", Some(&query)).await?)
    }

    /// Count wiki pages in a project.
    #[instrument(skip(self, project))]
    pub async fn get_wiki_count(&self, project: impl Into<IdOrKey>) -> Result<i64> {
        let query = WikiListQuery {
            project: Self::segment(project)?,
            options: None,
        };
        let count: Count = self.client.get_json("api/v2/wikis/count", Some(&query)).await?;
        Ok(count.count)
    }

    /// Get the tags used on wiki pages in a project.
    #[instrument(skip(self, project))]
    pub async fn get_wiki_tags(&self, project: impl Into<IdOrKey>) -> Result<Vec<Tag>> {
        let query = WikiListQuery {
            project: Self::segment(project)?,
            options: None,
        };
        Ok(self.client.get_json("api/v2/wikis/tags", Some(&query)).await?)
    }

    /// Get a wiki page.
    #[instrument(skip(self))]
    pub async fn get_wiki(&self, wiki_id: u64) -> Result<Wiki> {
        Ok(self
            .client
            .get_json(&format!("api/v2/wikis/{wiki_id}"), None::<&()>)
            .await?)
    }

    /// Add a wiki page.
    #[instrument(skip(self, input))]
    pub async fn add_wiki(&self, input: &AddWikiInput) -> Result<Wiki> {
        Ok(self.client.post_json("api/v2/wikis", input).await?)
    }

    /// Update a wiki page.
    #[instrument(skip(self, input))]
    pub async fn update_wiki(&self, wiki_id: u64, input: &UpdateWikiInput) -> Result<Wiki> {
        Ok(self
            .client
            .patch_json(&format!("api/v2/wikis/{wiki_id}"), input)
            .await?)
    }

    /// Delete a wiki page; returns the deleted page.
    #[instrument(skip(self))]
    pub async fn delete_wiki(&self, wiki_id: u64) -> Result<Wiki> {
        Ok(self
            .client
            .delete_json(&format!("api/v2/wikis/{wiki_id}"))
            .await?)
    }

    /// Link previously uploaded space attachments to a wiki page.
    #[instrument(skip(self))]
    pub async fn attach_wiki_files(
        &self,
        wiki_id: u64,
        attachment_ids: &[u64],
    ) -> Result<Vec<Attachment>> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(rename = "attachmentId[]")]
            attachment_ids: &'a [u64],
        }
        Ok(self
            .client
            .post_json(
                &format!("api/v2/wikis/{wiki_id}/attachments"),
                &Body { attachment_ids },
            )
            .await?)
    }

    /// List attachments on a wiki page.
    #[instrument(skip(self))]
    pub async fn get_wiki_attachments(&self, wiki_id: u64) -> Result<Vec<Attachment>> {
        Ok(self
            .client
            .get_json(&format!("api/v2/wikis/{wiki_id}/attachments"), None::<&()>)
            .await?)
    }

    /// Download a wiki attachment into a byte sink; returns the bytes
    /// written.
    #[instrument(skip(self, sink))]
    pub async fn download_wiki_attachment<W>(
        &self,
        wiki_id: u64,
        attachment_id: u64,
        sink: &mut W,
    ) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        Ok(self
            .client
            .download(
                &format!("api/v2/wikis/{wiki_id}/attachments/{attachment_id}"),
                None::<&()>,
                sink,
            )
            .await?)
    }

    /// Delete a wiki attachment; returns the deleted attachment.
    #[instrument(skip(self))]
    pub async fn delete_wiki_attachment(
        &self,
        wiki_id: u64,
        attachment_id: u64,
    ) -> Result<Attachment> {
        Ok(self
            .client
            .delete_json(&format!(
                "api/v2/wikis/{wiki_id}/attachments/{attachment_id}"
            ))
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
    fn test_wiki_list_query_flattens_options() {
        let options = GetWikisOptions {
            keyword: Some("deploy".to_string()),
        };
        let query = WikiListQuery {
            project: "SRE".to_string(),
            options: Some(&options),
        };
        let pairs = to_query_pairs(&query).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("keyword".to_string(), "deploy".to_string()),
                ("projectIdOrKey".to_string(), "SRE".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_wikis_scopes_by_query_parameter() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2/wikis"))
            .and(query_param("projectIdOrKey", "SRE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 5, "projectId": 3, "name": "Runbook"}
            ])))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let wikis = client.get_wikis("SRE", None).await.unwrap();
        assert_eq!(wikis.len(), 1);
        assert_eq!(wikis[0].name, "Runbook");
    }

    #[tokio::test]
    async fn test_attach_wiki_files_posts_attachment_ids() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v2/wikis/5/attachments"))
            .and(wiremock::matchers::body_json(
                serde_json::json!({"attachmentId[]": [10, 11]}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 10, "name": "a.png", "size": 100},
                {"id": 11, "name": "b.png", "size": 200}
            ])))
            .mount(&mock_server)
            .await;

        let client = BacklogApiClient::new(format!("{}/", mock_server.uri()), "K").unwrap();
        let attached = client.attach_wiki_files(5, &[10, 11]).await.unwrap();
        assert_eq!(attached.len(), 2);
        assert_eq!(attached[1].name, "b.png");
    }
}
