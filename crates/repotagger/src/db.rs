//! Database connection utilities.

use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

/// Configure SQLite pragmas for concurrent access from the request handlers.
///
/// - `journal_mode=WAL` so readers don't block the writer
/// - `busy_timeout=5000` to wait on locks instead of failing immediately
/// - `synchronous=NORMAL`, safe with WAL
async fn configure_sqlite(db: &DatabaseConnection) -> Result<(), DbErr> {
    use sea_orm::{ConnectionTrait, Statement};

    for pragma in [
        "PRAGMA journal_mode=WAL",
        "PRAGMA busy_timeout=5000",
        "PRAGMA synchronous=NORMAL",
    ] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            pragma.to_string(),
        ))
        .await?;
    }

    Ok(())
}

/// Turn a configured database path into a connection URL.
///
/// Plain file paths become `sqlite://{path}?mode=rwc` so the file is created
/// on first use; anything that already looks like a URL is passed through.
pub fn database_url(path: &str) -> String {
    if path.contains("://") || path.starts_with("sqlite:") {
        path.to_string()
    } else {
        format!("sqlite://{path}?mode=rwc")
    }
}

/// Establish a connection to the database.
///
/// File-backed SQLite connections get the pragmas of [`configure_sqlite`].
///
/// # Errors
/// Returns `DbErr` if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    if database_url.starts_with("sqlite://") {
        configure_sqlite(&db).await?;
    }

    Ok(db)
}

/// Establish a connection and run all pending migrations.
///
/// # Example
/// ```ignore
/// let db = repotagger::connect_and_migrate("sqlite://repoTagger.db?mode=rwc").await?;
/// ```
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = connect(database_url).await?;
    crate::migration::Migrator::up(&db, None).await?;
    tracing::debug!(database_url, "Database schema is up to date");
    Ok(db)
}
