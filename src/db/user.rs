use anyhow::Context;
use secrecy::SecretString;
use sqlx::SqlitePool;

use crate::{
    auth::compute_password_hash, config::Admin, error::Error, model::User,
    telemetry::spawn_blocking_with_tracing,
};

use super::error::DatabaseError;

#[derive(sqlx::FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    password: String,
    is_admin: bool,
}

/// Returns the user and their stored password hash.
#[tracing::instrument(name = "get user by username", skip_all, fields(username))]
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<(User, String)>, Error> {
    let record = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT
            id, username, password, is_admin
        FROM
            users
        WHERE
            username = ?1
    "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::Database(DatabaseError::DatabaseError(e)))?;

    Ok(record.map(|row| {
        (
            User {
                id: row.id,
                username: row.username,
                is_admin: row.is_admin,
            },
            row.password,
        )
    }))
}

/// Creates the single admin account on a fresh store. A store that already
/// has the account is left untouched, so re-initialization never duplicates
/// or overwrites it.
#[tracing::instrument(name = "seed admin account", skip_all, fields(username = %admin.username))]
pub async fn seed_admin(pool: &SqlitePool, admin: &Admin) -> Result<(), Error> {
    if get_user_by_username(pool, &admin.username).await?.is_some() {
        return Ok(());
    }

    let password: SecretString = admin.password.clone();
    let password_hashed = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("compute password hash")
        .map_err(Error::Other)??;

    sqlx::query(
        r#"
        INSERT INTO users
            (username, password, is_admin)
        VALUES
            (?1, ?2, 1)
    "#,
    )
    .bind(&admin.username)
    .bind(password_hashed)
    .execute(pool)
    .await
    .map_err(|e| Error::Database(DatabaseError::DatabaseError(e)))?;

    tracing::info!("Default admin account created");

    Ok(())
}
