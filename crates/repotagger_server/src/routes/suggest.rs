//! Tag suggestions from live repository metadata.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use repotagger::repository;

use super::parse_id;
use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/suggest/{id}", get(suggest))
}

/// Look the repository up locally, then ask the API for its current metadata.
async fn suggest(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let id = parse_id(&raw_id)?;
    let repo = repository::find_by_id(&state.db, id).await?;
    let full_name = repo.full_name().ok_or(AppError::NoFullName(id))?;

    let tags = state.github.suggest_tags(&full_name).await?;
    Ok(Json(tags))
}
