use sea_orm::{DatabaseConnection, EntityTrait, sea_query::OnConflict};

use crate::entity::repository::{ActiveModel, Column, Entity as Repository};
use crate::model::Repo;

use super::errors::Result;

/// Rows per `INSERT` statement.
const UPSERT_CHUNK: usize = 100;

/// Build the ON CONFLICT clause used by [`upsert_many`].
///
/// Conflicts are detected on the upstream id; base columns are refreshed and
/// tags are never touched.
pub(crate) fn build_upsert_on_conflict() -> OnConflict {
    OnConflict::column(Column::Id)
        .update_columns([
            Column::Name,
            Column::Description,
            Column::Url,
            Column::Language,
        ])
        .to_owned()
}

/// Insert or refresh many repositories, ignoring their `tags` field.
///
/// Existing rows keep their tags, so re-syncing a user never wipes labels.
///
/// # Returns
/// The number of repositories written.
pub async fn upsert_many(db: &DatabaseConnection, repos: &[Repo]) -> Result<u64> {
    let mut count = 0u64;

    for chunk in repos.chunks(UPSERT_CHUNK) {
        Repository::insert_many(chunk.iter().map(ActiveModel::from))
            .on_conflict(build_upsert_on_conflict())
            .exec_without_returning(db)
            .await?;
        count += chunk.len() as u64;
    }

    tracing::debug!(count, "Upserted repositories");
    Ok(count)
}
