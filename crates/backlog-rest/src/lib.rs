//! # backlog-rest
//!
//! Typed resource operations for the Backlog API (v2), built on the
//! transport core in `backlog-client`.
//!
//! Every method follows the same shape: render any polymorphic
//! identifiers into path segments, compose the relative `api/v2/...`
//! path, append query options, and hand the request to the transport.
//!
//! ## Example
//!
//! ```rust,ignore
//! use backlog_rest::{BacklogApiClient, GetIssuesOptions, Order};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), backlog_rest::Error> {
//!     let client = BacklogApiClient::new("https://example.backlog.com/", "API_KEY")?;
//!
//!     // Project by key or by ID
//!     let project = client.get_project("SRE").await?;
//!     let same = client.get_project(project.id).await?;
//!
//!     // Issue search with typed options
//!     let issues = client
//!         .get_issues(Some(&GetIssuesOptions {
//!             project_ids: vec![project.id],
//!             order: Some(Order::Asc),
//!             count: Some(20),
//!             ..Default::default()
//!         }))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::issues::{
    AddIssueCommentInput, AddIssueInput, GetIssueCommentsOptions, GetIssuesOptions,
    UpdateIssueInput,
};
pub use client::notifications::GetNotificationsOptions;
pub use client::projects::{
    AddCategoryInput, AddIssueTypeInput, AddProjectInput, AddStatusInput, AddVersionInput,
    GetProjectsOptions, UpdateProjectInput, UpdateVersionInput,
};
pub use client::pull_requests::{
    AddPullRequestCommentInput, AddPullRequestInput, GetPullRequestsOptions,
    UpdatePullRequestInput,
};
pub use client::space::UpdateSpaceNotificationInput;
pub use client::teams::{AddTeamInput, GetTeamsOptions, UpdateTeamInput};
pub use client::users::{AddUserInput, GetActivitiesOptions, GetStarsOptions, UpdateUserInput};
pub use client::watchings::{AddWatchingInput, GetWatchingsOptions};
pub use client::webhooks::{AddWebhookInput, UpdateWebhookInput};
pub use client::wikis::{AddWikiInput, GetWikisOptions, UpdateWikiInput};
pub use client::BacklogApiClient;
pub use error::{Error, Result};
pub use types::*;

// Re-export client-core types that callers need directly.
pub use backlog_client::{ClientConfig, ClientConfigBuilder, IdOrKey, Timestamp};
