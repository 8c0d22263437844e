use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::{
    db::magazine::{delete_magazine, get_magazine_by_id, insert_magazine, list_magazines},
    error::Error,
    model::{DEFAULT_RATING, Magazine, NewMagazine},
    state::SharedAppState,
    storage::DEFAULT_COVER,
};

#[tracing::instrument(name = "[GET] api/magazines", skip_all)]
pub async fn index(State(app_state): State<SharedAppState>) -> Result<Json<Vec<Magazine>>, Error> {
    let entities = list_magazines(&app_state.pool).await?;
    let magazines = entities.into_iter().map(Magazine::from).collect();

    Ok(Json(magazines))
}

#[tracing::instrument(name = "[GET] api/magazines/{id}", skip_all, fields(path.id))]
pub async fn show(
    State(app_state): State<SharedAppState>,
    Path(path): Path<UrlPath>,
) -> Result<Json<Magazine>, Error> {
    let entity = get_magazine_by_id(&app_state.pool, path.id).await?;

    Ok(Json(Magazine::from(entity)))
}

#[derive(Serialize)]
pub struct CreateResponse {
    pub success: bool,
    pub id: i64,
}

#[tracing::instrument(name = "[POST] api/magazines", skip_all)]
pub async fn store(
    State(app_state): State<SharedAppState>,
    multipart: Multipart,
) -> Result<Json<CreateResponse>, Error> {
    let (form, cover, pdf) = collect_form(multipart).await?;
    form.validate().map_err(Error::Validation)?;

    let cover_path = match cover {
        Some(file) => app_state.assets.store(&file.name, &file.data).await?,
        None => DEFAULT_COVER.to_string(),
    };

    // No PDF is not an error, the reader falls back to the description text.
    let pdf_path = match pdf {
        Some(file) => Some(app_state.assets.store(&file.name, &file.data).await?),
        None => None,
    };

    let new_magazine = NewMagazine {
        title: form.title,
        category: form.category,
        cover: cover_path,
        pdf_path,
        date: form.date,
        reading_time: form.reading_time,
        rating: DEFAULT_RATING,
        description: form.description,
        tags: form.tags,
        is_discover: coerce_discover_flag(form.is_discover.as_deref()),
        price: coerce_price(form.price.as_deref()),
        discount: coerce_discount(form.discount.as_deref()),
    };

    let id = insert_magazine(&app_state.pool, &new_magazine).await?;

    Ok(Json(CreateResponse { success: true, id }))
}

#[tracing::instrument(name = "[DELETE] api/magazines/{id}", skip_all, fields(path.id))]
pub async fn destroy(
    State(app_state): State<SharedAppState>,
    Path(path): Path<UrlPath>,
) -> Result<Json<serde_json::Value>, Error> {
    delete_magazine(&app_state.pool, path.id).await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct UrlPath {
    id: i64,
}

#[derive(Debug, Default, Validate)]
struct MagazineForm {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    title: String,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    category: String,
    #[validate(length(min = 1, message = "Description is required"))]
    description: String,
    date: Option<String>,
    reading_time: Option<String>,
    tags: Option<String>,
    is_discover: Option<String>,
    price: Option<String>,
    discount: Option<String>,
}

struct UploadedFile {
    name: String,
    data: Vec<u8>,
}

async fn collect_form(
    mut multipart: Multipart,
) -> Result<(MagazineForm, Option<UploadedFile>, Option<UploadedFile>), Error> {
    let mut form = MagazineForm::default();
    let mut cover = None;
    let mut pdf = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Other(e.into()))?
    {
        let name = match field.name() {
            Some(name) => name.to_owned(),
            None => continue,
        };

        match name.as_str() {
            "cover" => cover = read_file(field).await?,
            "pdf" => pdf = read_file(field).await?,
            "title" => form.title = read_text(field).await?,
            "category" => form.category = read_text(field).await?,
            "description" => form.description = read_text(field).await?,
            "date" => form.date = Some(read_text(field).await?),
            "readingTime" => form.reading_time = Some(read_text(field).await?),
            "tags" => form.tags = Some(read_text(field).await?),
            "is_discover" => form.is_discover = Some(read_text(field).await?),
            "price" => form.price = Some(read_text(field).await?),
            "discount" => form.discount = Some(read_text(field).await?),
            _ => {}
        }
    }

    Ok((form, cover, pdf))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, Error> {
    field.text().await.map_err(|e| Error::Other(e.into()))
}

/// Browsers submit an empty part when no file was chosen; that counts as
/// absent.
async fn read_file(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<UploadedFile>, Error> {
    let name = field.file_name().map(ToOwned::to_owned).unwrap_or_default();
    let data = field.bytes().await.map_err(|e| Error::Other(e.into()))?;

    if data.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedFile {
        name,
        data: data.to_vec(),
    }))
}

// Numeric inputs arrive as text fields. Malformed values default to 0
// instead of rejecting the upload.

fn coerce_price(value: Option<&str>) -> f64 {
    value
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|price| price.is_finite())
        .unwrap_or(0.0)
        .max(0.0)
}

fn coerce_discount(value: Option<&str>) -> i64 {
    value
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(0)
        .clamp(0, 100)
}

/// Present values collapse to 0/1; an absent field stays unset, which the
/// read side treats as discoverable.
fn coerce_discover_flag(value: Option<&str>) -> Option<i64> {
    value.map(|raw| match raw.trim().parse::<i64>() {
        Ok(n) if n != 0 => 1,
        _ => 0,
    })
}
