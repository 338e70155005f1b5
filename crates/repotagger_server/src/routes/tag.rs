//! Tag replacement.

use axum::{
    Form, Router,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, QueryRejection},
    },
    http::StatusCode,
    routing::put,
};
use repotagger::{parse_tag_list, repository};
use serde::Deserialize;

use super::parse_id;
use crate::{AppError, AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/tag/{id}", put(replace_tags))
}

#[derive(Debug, Default, Deserialize)]
pub struct TagForm {
    /// Comma-separated tags.
    pub tags: Option<String>,
}

/// Pick the `tags` value: a form body wins over the query string.
///
/// An unreadable body or query counts as absent, and no `tags` anywhere
/// clears the tag set.
fn tags_field(
    body: Result<Form<TagForm>, FormRejection>,
    query: Result<Query<TagForm>, QueryRejection>,
) -> String {
    let body = body
        .map(|Form(f)| f)
        .inspect_err(|e| tracing::debug!(error = %e, "Ignoring tag form body"))
        .unwrap_or_default();
    let query = query
        .map(|Query(q)| q)
        .inspect_err(|e| tracing::debug!(error = %e, "Ignoring tag query string"))
        .unwrap_or_default();

    body.tags.or(query.tags).unwrap_or_default()
}

async fn replace_tags(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    query: Result<Query<TagForm>, QueryRejection>,
    body: Result<Form<TagForm>, FormRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    // Unknown ids are reported before the input is looked at.
    repository::find_by_id(&state.db, id).await?;

    let tags = parse_tag_list(&tags_field(body, query));
    repository::replace_tags(&state.db, id, &tags).await?;
    tracing::info!(repository_id = id, ?tags, "Tags replaced");
    Ok(StatusCode::CREATED)
}
