//! Tag-prefix search.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use repotagger::{Repo, repository};

use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search/", get(search_all))
        .route("/search/{*prefix}", get(search))
}

/// Everything after `/search/` is the prefix, slashes included.
async fn search(
    State(state): State<AppState>,
    Path(prefix): Path<String>,
) -> Result<Json<Vec<Repo>>, AppError> {
    find(&state, &prefix).await
}

/// An empty prefix matches every stored repository.
async fn search_all(State(state): State<AppState>) -> Result<Json<Vec<Repo>>, AppError> {
    find(&state, "").await
}

async fn find(state: &AppState, prefix: &str) -> Result<Json<Vec<Repo>>, AppError> {
    let repos = repository::find_by_tag_prefix(&state.db, prefix).await?;
    if repos.is_empty() {
        return Err(AppError::NoMatches(prefix.to_string()));
    }
    Ok(Json(repos))
}
