//! # backlog-client
//!
//! Core HTTP transport for the Backlog API (v2).
//!
//! This crate provides the single request-build / execute / dispatch
//! pipeline that every Backlog resource operation flows through:
//! - URL composition against a base endpoint, with `apiKey` credential
//!   attachment as a query parameter
//! - Declarative query-string encoding of typed option structs
//! - JSON body marshalling and multipart file upload
//! - Response dispatch into typed values or caller-supplied byte sinks
//! - Classification of remote errors (structured envelope vs. bare status)
//! - Optional debug dumping of non-2xx wire traffic
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (backlog-rest: one method per remote operation)            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     BacklogClient                           │
//! │  - Holds base endpoint + API key + HTTP client              │
//! │  - Composes URLs, appends apiKey and query options          │
//! │  - Provides typed helpers (get_json, post_json, download)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HttpClient                             │
//! │  - Raw HTTP execution over reqwest                          │
//! │  - Error classification, debug response dumping             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use backlog_client::BacklogClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), backlog_client::Error> {
//!     let client = BacklogClient::new("https://example.backlog.com/", "API_KEY")?;
//!
//!     // Typed GET
//!     let space: serde_json::Value = client
//!         .get_json("api/v2/space", None::<&()>)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod backlog;
mod client;
mod config;
mod error;
mod identifier;
mod query;
mod request;
mod response;
pub mod time;

pub use backlog::BacklogClient;
pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ApiError, Error, ErrorKind, Result};
pub use identifier::IdOrKey;
pub use query::{append_options, to_query_pairs};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use time::Timestamp;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("backlog-api/", env!("CARGO_PKG_VERSION"));
