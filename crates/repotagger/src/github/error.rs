//! GitHub API error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when fetching from the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The user, collection or repository does not exist upstream.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GitHubError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if this error means the remote resource is absent.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for GitHub operations.
pub type Result<T> = std::result::Result<T, GitHubError>;
