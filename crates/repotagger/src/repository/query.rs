use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    sea_query::{Expr, LikeExpr, Query},
};

use crate::entity::repository::{Column, Entity as Repository};
use crate::entity::tag::{Column as TagColumn, Entity as Tag};
use crate::model::Repo;

use super::errors::Result;
use super::tags::tags_by_repository;

const LIKE_ESCAPE: char = '!';

/// Escape `LIKE` wildcards so `prefix` matches literally.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Find repositories having at least one tag that starts with `prefix`.
///
/// An empty prefix matches every repository, tagged or not. Each repository
/// appears once, ordered by id, carrying its full tag set. Matching follows
/// SQLite `LIKE`, which ignores ASCII case.
pub async fn find_by_tag_prefix(db: &DatabaseConnection, prefix: &str) -> Result<Vec<Repo>> {
    let mut query = Repository::find();

    if !prefix.is_empty() {
        let pattern = format!("{}%", escape_like(prefix));
        let tagged = Query::select()
            .column(TagColumn::RepositoryId)
            .from(Tag)
            .and_where(Expr::col(TagColumn::Name).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)))
            .to_owned();
        query = query.filter(Column::Id.in_subquery(tagged));
    }

    let rows = query.order_by_asc(Column::Id).all(db).await?;
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut tags = tags_by_repository(db, &ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_repo(row_tags)
        })
        .collect())
}
