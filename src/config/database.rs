//! Database configuration module for `Mercadito`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`.
//! The schema is a single key-value table generated from the `StoreEntry`
//! entity via `Schema::create_table_from_entity`, so the database layout
//! always matches the Rust struct definition without manual SQL.

use crate::entities::StoreEntry;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// Looks for `DATABASE_URL` in the environment and falls back to a default
/// local `SQLite` file (created on first open) if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/mercadito.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable, falling back to a default local file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the store table using `SeaORM`'s schema generation from the entity
/// definition. Safe to run against a database where the table already exists.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut store_table = schema.create_table_from_entity(StoreEntry);
    store_table.if_not_exists();

    db.execute(builder.build(&store_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::StoreEntryModel;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection_and_tables() -> Result<()> {
        // In-memory database to avoid touching any local file
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Table exists and is queryable
        let _: Vec<StoreEntryModel> = StoreEntry::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<StoreEntryModel> = StoreEntry::find().limit(1).all(&db).await?;
        Ok(())
    }
}
