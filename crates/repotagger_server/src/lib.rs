//! HTTP front end for the repotagger catalog.
//!
//! | Route                  | Effect                                        |
//! |------------------------|-----------------------------------------------|
//! | `POST /repos/{user}`   | fetch and store `user`'s starred repositories |
//! | `GET /search/{prefix}` | repositories with a tag starting with prefix  |
//! | `GET /suggest/{id}`    | suggested tags for a stored repository        |
//! | `PUT /tag/{id}`        | replace a repository's tags (form field)      |

pub mod config;
pub mod error;
pub mod routes;

pub use crate::config::{Args, Config};
pub use error::AppError;

use axum::Router;
use repotagger::GitHubClient;
use sea_orm::DatabaseConnection;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the store.
    pub db: DatabaseConnection,
    /// Remote API client; one connection pool for the whole process.
    pub github: GitHubClient,
}

impl AppState {
    pub fn new(db: DatabaseConnection, github: GitHubClient) -> Self {
        Self { db, github }
    }
}

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::repos::routes())
        .merge(routes::search::routes())
        .merge(routes::suggest::routes())
        .merge(routes::tag::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
