//! repotagger - a catalog of GitHub starred repositories with free-form tags.
//!
//! The library fetches a user's starred repositories through a bounded
//! concurrent page collector, normalizes tags, suggests tags from public
//! metadata, and stores everything in SQLite.
//!
//! # Example
//!
//! ```ignore
//! use repotagger::{connect_and_migrate, github::GitHubClient, repository};
//!
//! let db = connect_and_migrate("sqlite://repoTagger.db?mode=rwc").await?;
//! let client = GitHubClient::github(Duration::from_secs(30))?;
//!
//! let repos = client.get_repositories("octocat").await?;
//! repository::upsert_many(&db, &repos).await?;
//! let tagged = repository::find_by_tag_prefix(&db, "doc").await?;
//! ```

pub mod db;
pub mod entity;
pub mod github;
pub mod http;
pub mod migration;
pub mod model;
pub mod repository;
pub mod suggest;
pub mod tags;

pub use db::{connect, connect_and_migrate, database_url};
pub use entity::prelude::*;
pub use github::{GitHubClient, GitHubError};
pub use model::Repo;
pub use repository::RepositoryError;
pub use tags::{normalize_tags, parse_tag_list};
