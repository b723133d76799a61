//! Team operations.

use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::instrument;

use crate::error::Result;
use crate::types::{Order, Team};

/// Options for `GET /api/v2/teams`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetTeamsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Input for `POST /api/v2/teams`.
#[derive(Debug, Clone, Serialize)]
pub struct AddTeamInput {
    pub name: String,
    #[serde(rename = "members[]", skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<u32>,
}

/// Input for `PATCH /api/v2/teams/:teamId`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateTeamInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "members[]", skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<u32>,
}

impl super::BacklogApiClient {
    /// Get teams in the space.
    #[instrument(skip(self, options))]
    pub async fn get_teams(&self, options: Option<&GetTeamsOptions>) -> Result<Vec<Team>> {
        Ok(self.client.get_json("api/v2/teams", options).await?)
    }

    /// Get a team.
    #[instrument(skip(self))]
    pub async fn get_team(&self, team_id: u64) -> Result<Team> {
        Ok(self
            .client
            .get_json(&format!("api/v2/teams/{team_id}"), None::<&()>)
            .await?)
    }

    /// Add a team.
    #[instrument(skip(self, input))]
    pub async fn add_team(&self, input: &AddTeamInput) -> Result<Team> {
        Ok(self.client.post_json("api/v2/teams", input).await?)
    }

    /// Update a team's name or membership.
    #[instrument(skip(self, input))]
    pub async fn update_team(&self, team_id: u64, input: &UpdateTeamInput) -> Result<Team> {
        Ok(self
            .client
            .patch_json(&format!("api/v2/teams/{team_id}"), input)
            .await?)
    }

    /// Delete a team; returns the deleted team.
    #[instrument(skip(self))]
    pub async fn delete_team(&self, team_id: u64) -> Result<Team> {
        Ok(self
            .client
            .delete_json(&format!("api/v2/teams/{team_id}"))
            .await?)
    }

    /// Download a team's icon into a byte sink; returns the bytes written.
    #[instrument(skip(self, sink))]
    pub async fn get_team_icon<W>(&self, team_id: u64, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        Ok(self
            .client
            .download(&format!("api/v2/teams/{team_id}/icon"), None::<&()>, sink)
            .await?)
    }
}
