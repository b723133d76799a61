//! User operations: accounts, icons, activities, stars.

use chrono::NaiveDate;
use serde::Serialize;
use tokio::io::AsyncWrite;
use tracing::instrument;

use crate::error::Result;
use crate::types::{Activity, Count, Order, RoleType, Star, User};

/// Options for the activity endpoints (space, project, and user).
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetActivitiesOptions {
    #[serde(rename = "activityTypeId[]", skip_serializing_if = "Vec::is_empty")]
    pub activity_type_ids: Vec<i32>,
    #[serde(rename = "minId", skip_serializing_if = "Option::is_none")]
    pub min_id: Option<u64>,
    #[serde(rename = "maxId", skip_serializing_if = "Option::is_none")]
    pub max_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// Options for the star listing and count endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetStarsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(rename = "minId", skip_serializing_if = "Option::is_none")]
    pub min_id: Option<u64>,
    #[serde(rename = "maxId", skip_serializing_if = "Option::is_none")]
    pub max_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// Input for `POST /api/v2/users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserInput {
    pub user_id: String,
    pub password: String,
    pub name: String,
    pub mail_address: String,
    pub role_type: RoleType,
}

/// Input for `PATCH /api/v2/users/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_type: Option<RoleType>,
}

impl super::BacklogApiClient {
    /// Get all users in the space.
    #[instrument(skip(self))]
    pub async fn get_users(&self) -> Result<Vec<User>> {
        Ok(self.client.get_json("api/v2/users", None::<&()>).await?)
    }

    /// Get a user.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: u32) -> Result<User> {
        Ok(self
            .client
            .get_json(&format!("api/v2/users/{user_id}"), None::<&()>)
            .await?)
    }

    /// Add a user to the space.
    #[instrument(skip(self, input))]
    pub async fn add_user(&self, input: &AddUserInput) -> Result<User> {
        Ok(self.client.post_json("api/v2/users", input).await?)
    }

    /// Update a user.
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, user_id: u32, input: &UpdateUserInput) -> Result<User> {
        Ok(self
            .client
            .patch_json(&format!("api/v2/users/{user_id}"), input)
            .await?)
    }

    /// Delete a user; returns the deleted user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: u32) -> Result<User> {
        Ok(self
            .client
            .delete_json(&format!("api/v2/users/{user_id}"))
            .await?)
    }

    /// Get the user associated with the API key.
    #[instrument(skip(self))]
    pub async fn get_own_user(&self) -> Result<User> {
        Ok(self
            .client
            .get_json("api/v2/users/myself", None::<&()>)
            .await?)
    }

    /// Download a user's icon into a byte sink; returns the bytes written.
    #[instrument(skip(self, sink))]
    pub async fn get_user_icon<W>(&self, user_id: u32, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        Ok(self
            .client
            .download(&format!("api/v2/users/{user_id}/icon"), None::<&()>, sink)
            .await?)
    }

    /// Get a user's recent activities.
    #[instrument(skip(self, options))]
    pub async fn get_user_activities(
        &self,
        user_id: u32,
        options: Option<&GetActivitiesOptions>,
    ) -> Result<Vec<Activity>> {
        Ok(self
            .client
            .get_json(&format!("api/v2/users/{user_id}/activities"), options)
            .await?)
    }

    /// Get stars received by a user.
    #[instrument(skip(self, options))]
    pub async fn get_user_stars(
        &self,
        user_id: u32,
        options: Option<&GetStarsOptions>,
    ) -> Result<Vec<Star>> {
        Ok(self
            .client
            .get_json(&format!("api/v2/users/{user_id}/stars"), options)
            .await?)
    }

    /// Count stars received by a user.
    #[instrument(skip(self, options))]
    pub async fn get_user_star_count(
        &self,
        user_id: u32,
        options: Option<&GetStarsOptions>,
    ) -> Result<i64> {
        let count: Count = self
            .client
            .get_json(&format!("api/v2/users/{user_id}/stars/count"), options)
            .await?;
        Ok(count.count)
    }
}
