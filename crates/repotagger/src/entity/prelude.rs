//! Common re-exports for convenient entity usage.

pub use super::repository::{
    ActiveModel as RepositoryActiveModel, Column as RepositoryColumn, Entity as Repository,
    Model as RepositoryModel,
};
pub use super::tag::{
    ActiveModel as TagActiveModel, Column as TagColumn, Entity as Tag, Model as TagModel,
};
