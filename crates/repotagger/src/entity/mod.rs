//! SeaORM entity definitions for the repotagger database schema.

pub mod prelude;
pub mod repository;
pub mod tag;
