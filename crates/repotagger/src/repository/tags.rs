use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::entity::repository::Entity as Repository;
use crate::entity::tag::{ActiveModel, Column, Entity as Tag};
use crate::tags::normalize_tags;

use super::errors::{RepositoryError, Result};

/// Upper bound on ids per `IN (...)` list, well under SQLite's variable limit.
const ID_CHUNK: usize = 500;

/// Insert `tags` for one repository, in order. No-op for an empty list.
pub(super) async fn insert_tags<C: ConnectionTrait>(
    db: &C,
    repository_id: i64,
    tags: &[String],
) -> std::result::Result<(), DbErr> {
    if tags.is_empty() {
        return Ok(());
    }

    let models = tags.iter().map(|name| ActiveModel {
        name: Set(name.clone()),
        repository_id: Set(repository_id),
        ..Default::default()
    });
    Tag::insert_many(models).exec_without_returning(db).await?;
    Ok(())
}

/// Tags of one repository in insertion order.
pub(super) async fn tags_of<C: ConnectionTrait>(db: &C, repository_id: i64) -> Result<Vec<String>> {
    let rows = Tag::find()
        .filter(Column::RepositoryId.eq(repository_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|t| t.name).collect())
}

/// Tags of many repositories, grouped by repository id, each in insertion order.
pub(super) async fn tags_by_repository<C: ConnectionTrait>(
    db: &C,
    ids: &[i64],
) -> Result<HashMap<i64, Vec<String>>> {
    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();

    for chunk in ids.chunks(ID_CHUNK) {
        let rows = Tag::find()
            .filter(Column::RepositoryId.is_in(chunk.iter().copied()))
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        for row in rows {
            grouped.entry(row.repository_id).or_default().push(row.name);
        }
    }

    Ok(grouped)
}

/// Replace the whole tag set of a repository.
///
/// The delete and the inserts run in one transaction, so a failure leaves the
/// previous tags in place. The new tags are normalized before storage.
///
/// # Errors
/// `RepositoryError::NotFound` if no repository has this id.
pub async fn replace_tags(db: &DatabaseConnection, id: i64, tags: &[String]) -> Result<()> {
    let tags = normalize_tags(tags);
    let txn = db.begin().await?;

    if Repository::find_by_id(id).one(&txn).await?.is_none() {
        return Err(RepositoryError::not_found_by_id(id));
    }

    Tag::delete_many()
        .filter(Column::RepositoryId.eq(id))
        .exec(&txn)
        .await?;
    insert_tags(&txn, id, &tags).await?;

    txn.commit().await?;
    tracing::debug!(repository_id = id, count = tags.len(), "Replaced tags");
    Ok(())
}
