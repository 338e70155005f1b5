//! Starred-repository sync.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use repotagger::repository;

use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/repos/{user}", post(sync_user))
}

/// Fetch every starred repository of `user` and store it.
///
/// Existing rows are refreshed in place and keep their tags.
async fn sync_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<StatusCode, AppError> {
    let repos = state.github.get_repositories(&user).await?;
    let written = repository::upsert_many(&state.db, &repos).await?;
    tracing::info!(user, written, "Synced starred repositories");
    Ok(StatusCode::CREATED)
}
