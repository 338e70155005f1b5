use sea_orm::DbErr;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sea-orm.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Repository not found.
    #[error("Repository not found: {context}")]
    NotFound { context: String },

    /// The repository row was written but its tags were not.
    ///
    /// The row stays in place; the caller decides whether to retry the tags.
    #[error("Repository {repository_id} stored without its tags: {source}")]
    TagsNotPersisted {
        repository_id: i64,
        #[source]
        source: DbErr,
    },
}

impl RepositoryError {
    /// Create a NotFound error for an id lookup.
    pub fn not_found_by_id(id: i64) -> Self {
        Self::NotFound {
            context: format!("id={}", id),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
