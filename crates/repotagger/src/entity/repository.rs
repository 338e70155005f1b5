//! Repository entity - one starred repository, keyed by its upstream id.

use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::model::Repo;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repositories")]
pub struct Model {
    /// Upstream numeric id; never generated locally.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Canonical web URL of the repository.
    pub url: String,
    pub language: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tag::Entity")]
    Tags,
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the in-memory value from this row and its tags.
    pub fn into_repo(self, tags: Vec<String>) -> Repo {
        Repo {
            id: self.id,
            name: self.name,
            description: self.description,
            html_url: self.url,
            language: self.language,
            tags,
        }
    }
}

impl From<&Repo> for ActiveModel {
    fn from(repo: &Repo) -> Self {
        Self {
            id: Set(repo.id),
            name: Set(repo.name.clone()),
            description: Set(repo.description.clone()),
            url: Set(repo.html_url.clone()),
            language: Set(repo.language.clone()),
        }
    }
}
