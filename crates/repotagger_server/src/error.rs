//! Error handling for the HTTP front end.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use repotagger::{GitHubError, RepositoryError};
use thiserror::Error;

/// Everything a handler can fail with.
///
/// Clients only ever see the canonical status text; the detail goes to the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid repository id: {0:?}")]
    InvalidId(String),

    #[error("No repository has a tag starting with {0:?}")]
    NoMatches(String),

    #[error("Repository {0} has no owner/name in its URL")]
    NoFullName(i64),

    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NoMatches(_) => StatusCode::NOT_FOUND,
            AppError::GitHub(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::Repository(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            AppError::NoFullName(_) | AppError::GitHub(_) | AppError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(
            AppError::from(GitHubError::not_found("users/ghost/starred")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(RepositoryError::not_found_by_id(3)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::NoMatches("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_upstream_and_store_errors_map_to_500() {
        let status = GitHubError::Status {
            status: 502,
            url: "https://api.github.com/repos/a/b".to_string(),
        };
        assert_eq!(AppError::from(status).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::from(RepositoryError::Database(sea_orm::DbErr::Custom("boom".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NoFullName(1).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_id_maps_to_400() {
        assert_eq!(AppError::InvalidId("abc".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidId(String::new()).status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn response_body_is_canonical_status_text() {
        use http_body_util::BodyExt;

        let response = AppError::InvalidId("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.expect("body").to_bytes();
        assert_eq!(&body[..], b"Bad Request");
    }
}
