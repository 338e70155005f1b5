//! GitHub API client for starred-repository collections.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - Shared constants
//! - [`client`] - The client, single-page requests and suggestion lookups
//! - [`pagination`] - `Link` header parsing and the concurrent page collector
//!
//! ```ignore
//! use repotagger::github::GitHubClient;
//!
//! let client = GitHubClient::github(Duration::from_secs(30))?;
//! let repos = client.get_repositories("octocat").await?;
//! ```

mod client;
mod error;
mod pagination;
mod types;

pub use client::GitHubClient;
pub use error::{GitHubError, Result};
pub use pagination::{PageSet, last_page, parse_link_header};
pub use types::{ACCEPT_HEADER, DEFAULT_API_URL, DEFAULT_PAGE_FETCH_CONCURRENCY, USER_AGENT};
