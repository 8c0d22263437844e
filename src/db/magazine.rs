use sqlx::SqlitePool;

use crate::{
    error::Error,
    model::{MagazineEntity, NewMagazine},
};

use super::error::DatabaseError;

const MAGAZINE_COLUMNS: &str = r#"
    id, title, category, cover, pdf_path,
    date, reading_time, rating, description, tags,
    is_discover, price, discount
"#;

/// Full catalog, newest first. The storefront paginates client side.
#[tracing::instrument(name = "list magazines", skip_all)]
pub async fn list_magazines(pool: &SqlitePool) -> Result<Vec<MagazineEntity>, Error> {
    sqlx::query_as::<_, MagazineEntity>(&format!(
        "SELECT {} FROM magazines ORDER BY id DESC",
        MAGAZINE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| Error::Database(DatabaseError::DatabaseError(e)))
}

#[tracing::instrument(name = "get magazine by id", skip_all, fields(magazine_id = id))]
pub async fn get_magazine_by_id(pool: &SqlitePool, id: i64) -> Result<MagazineEntity, Error> {
    let entity = sqlx::query_as::<_, MagazineEntity>(&format!(
        "SELECT {} FROM magazines WHERE id = ?1",
        MAGAZINE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| Error::Database(DatabaseError::DatabaseError(e)))?;

    match entity {
        Some(entity) => Ok(entity),
        None => Err(Error::Database(DatabaseError::NotFound)),
    }
}

#[tracing::instrument(name = "insert magazine", skip_all, fields(title = %magazine.title))]
pub async fn insert_magazine(pool: &SqlitePool, magazine: &NewMagazine) -> Result<i64, Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO magazines
            (title, category, cover, pdf_path, date, reading_time, rating,
             description, tags, is_discover, price, discount)
        VALUES
            (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
        RETURNING id
    "#,
    )
    .bind(&magazine.title)
    .bind(&magazine.category)
    .bind(&magazine.cover)
    .bind(&magazine.pdf_path)
    .bind(&magazine.date)
    .bind(&magazine.reading_time)
    .bind(magazine.rating)
    .bind(&magazine.description)
    .bind(&magazine.tags)
    .bind(magazine.is_discover)
    .bind(magazine.price)
    .bind(magazine.discount)
    .fetch_one(pool)
    .await
    .map_err(|e| Error::Database(DatabaseError::DatabaseError(e)))?;

    Ok(id)
}

#[tracing::instrument(name = "delete magazine", skip_all, fields(magazine_id = id))]
pub async fn delete_magazine(pool: &SqlitePool, id: i64) -> Result<(), Error> {
    let result = sqlx::query("DELETE FROM magazines WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| Error::Database(DatabaseError::DatabaseError(e)))?;

    if result.rows_affected() == 0 {
        return Err(Error::Database(DatabaseError::NotFound));
    }

    Ok(())
}
