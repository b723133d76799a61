//! # backlog-api
//!
//! A client library for the Backlog project-management API (v2).
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Tracing/logging skips credential parameters
//!
//! ## Crates
//!
//! - **backlog-client** - HTTP transport core: request construction, URL
//!   and query composition, JSON/multipart bodies, response dispatch,
//!   error classification, debug logging
//! - **backlog-rest** - Typed resource operations: space, users,
//!   projects, issues, wikis, git/pull requests, watchings, teams,
//!   webhooks, notifications
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use backlog_api::BacklogApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BacklogApiClient::new(
//!         "https://example.backlog.com/",
//!         std::env::var("BACKLOG_API_KEY")?,
//!     )?;
//!
//!     let me = client.get_own_user().await?;
//!     println!("logged in as {}", me.name);
//!
//!     for project in client.get_projects(None).await? {
//!         println!("{} {}", project.project_key, project.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export both crates for convenient access
pub use backlog_client as client;
pub use backlog_rest as rest;

// Re-export commonly used types at the top level
pub use backlog_client::{ClientConfig, ClientConfigBuilder, Error, ErrorKind, IdOrKey, Timestamp};
pub use backlog_rest::BacklogApiClient;
