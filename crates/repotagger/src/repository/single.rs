use sea_orm::{DatabaseConnection, EntityTrait};

use crate::entity::repository::{ActiveModel, Entity as Repository};
use crate::model::Repo;
use crate::tags::normalize_tags;

use super::errors::{RepositoryError, Result};
use super::tags::{insert_tags, tags_of};

/// Insert a repository and then its tags.
///
/// The two writes are not grouped: if the tags fail after the row went in,
/// the row is kept and `RepositoryError::TagsNotPersisted` is returned.
///
/// # Errors
/// Returns `RepositoryError::Database` if the row itself cannot be inserted
/// (e.g. the id already exists).
pub async fn insert(db: &DatabaseConnection, repo: &Repo) -> Result<()> {
    Repository::insert(ActiveModel::from(repo))
        .exec_without_returning(db)
        .await?;

    let tags = normalize_tags(&repo.tags);
    insert_tags(db, repo.id, &tags)
        .await
        .map_err(|source| RepositoryError::TagsNotPersisted {
            repository_id: repo.id,
            source,
        })
}

/// Find a repository by id, with its tags.
///
/// # Errors
/// `RepositoryError::NotFound` if no repository has this id.
pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Repo> {
    let row = Repository::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| RepositoryError::not_found_by_id(id))?;
    let tags = tags_of(db, id).await?;
    Ok(row.into_repo(tags))
}
