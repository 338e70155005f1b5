//! HTTP route handlers.

pub mod repos;
pub mod search;
pub mod suggest;
pub mod tag;

use crate::AppError;

/// Parse a repository id path segment.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::InvalidId(raw.to_string()))
}
