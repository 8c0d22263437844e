use sqlx::SqlitePool;

use crate::{config::Admin, error::Error};

use super::{error::DatabaseError, user::seed_admin};

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password TEXT NOT NULL,
        is_admin INTEGER NOT NULL DEFAULT 0
    )
"#;

const CREATE_MAGAZINES: &str = r#"
    CREATE TABLE IF NOT EXISTS magazines (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        cover TEXT NOT NULL,
        pdf_path TEXT,
        date TEXT,
        reading_time TEXT,
        rating REAL,
        description TEXT NOT NULL,
        tags TEXT
    )
"#;

/// One idempotent migration step, run at startup. Creating the base tables
/// and re-adding an already-added column are both no-ops, so repeated
/// initialization against an existing database loses nothing.
#[tracing::instrument(name = "migrate schema", skip_all)]
pub async fn migrate(pool: &SqlitePool, admin: &Admin) -> Result<(), Error> {
    sqlx::query(CREATE_USERS)
        .execute(pool)
        .await
        .map_err(DatabaseError::DatabaseError)?;

    sqlx::query(CREATE_MAGAZINES)
        .execute(pool)
        .await
        .map_err(DatabaseError::DatabaseError)?;

    // Columns added after the first release. `is_discover` stays nullable:
    // rows predating the column have no recorded value, which reads as
    // discoverable.
    add_column_if_missing(pool, "magazines", "price", "REAL NOT NULL DEFAULT 0").await?;
    add_column_if_missing(pool, "magazines", "discount", "INTEGER NOT NULL DEFAULT 0").await?;
    add_column_if_missing(pool, "magazines", "is_discover", "INTEGER").await?;

    seed_admin(pool, admin).await?;

    Ok(())
}

async fn add_column_if_missing(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    definition: &str,
) -> Result<(), Error> {
    let present: i64 =
        sqlx::query_scalar("SELECT count(*) FROM pragma_table_info(?1) WHERE name = ?2")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await
            .map_err(DatabaseError::DatabaseError)?;

    if present == 0 {
        tracing::info!(table, column, "Adding missing column");

        sqlx::query(&format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            table, column, definition
        ))
        .execute(pool)
        .await
        .map_err(DatabaseError::DatabaseError)?;
    }

    Ok(())
}
