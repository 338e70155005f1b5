//! Store operations for repositories and their tags.
//!
//! Every function takes the shared connection pool and returns detached
//! [`Repo`](crate::model::Repo) values.

mod bulk;
mod errors;
mod query;
mod single;
mod tags;

pub use bulk::upsert_many;
pub use errors::{RepositoryError, Result};
pub use query::find_by_tag_prefix;
pub use single::{find_by_id, insert};
pub use tags::replace_tags;
