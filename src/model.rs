/// Default shown when an entry was uploaded without a reading time.
pub const DEFAULT_READING_TIME: &str = "10 min";

/// Rating assigned to every fresh upload.
pub const DEFAULT_RATING: f64 = 5.0;

/// One row of the `magazines` table. `tags` is the raw comma-delimited
/// string, `is_discover` keeps its stored three-state value.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct MagazineEntity {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub cover: String,
    pub pdf_path: Option<String>,
    pub date: Option<String>,
    pub reading_time: Option<String>,
    pub rating: Option<f64>,
    pub description: String,
    pub tags: Option<String>,
    pub is_discover: Option<i64>,
    pub price: f64,
    pub discount: i64,
}

/// Discover-grid visibility as stored: an entry written before the column
/// existed has no recorded value, which is not the same as hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discoverability {
    Visible,
    Hidden,
    Unset,
}

impl Discoverability {
    /// Unset resolves to visible.
    pub fn is_visible(self) -> bool {
        !matches!(self, Discoverability::Hidden)
    }
}

impl MagazineEntity {
    pub fn discoverability(&self) -> Discoverability {
        match self.is_discover {
            Some(0) => Discoverability::Hidden,
            Some(_) => Discoverability::Visible,
            None => Discoverability::Unset,
        }
    }
}

/// Wire representation served to the storefront: tags expanded, display
/// defaults applied, discoverability coerced to a definite boolean.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Magazine {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub cover: String,
    pub pdf_path: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "readingTime")]
    pub reading_time: String,
    pub rating: f64,
    pub description: String,
    pub tags: Vec<String>,
    pub is_discover: bool,
    pub price: f64,
    pub discount: i64,
}

impl From<MagazineEntity> for Magazine {
    fn from(entity: MagazineEntity) -> Self {
        let is_discover = entity.discoverability().is_visible();
        let tags = split_tags(entity.tags.as_deref());

        Magazine {
            id: entity.id,
            title: entity.title,
            category: entity.category,
            cover: entity.cover,
            pdf_path: entity.pdf_path,
            date: entity.date,
            reading_time: entity
                .reading_time
                .unwrap_or_else(|| DEFAULT_READING_TIME.to_string()),
            rating: entity.rating.unwrap_or(0.0),
            description: entity.description,
            tags,
            is_discover,
            price: entity.price,
            discount: entity.discount,
        }
    }
}

fn split_tags(tags: Option<&str>) -> Vec<String> {
    match tags {
        Some(raw) => raw
            .split(',')
            .filter(|tag| !tag.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        None => Vec::new(),
    }
}

/// Insert payload for the catalog store. File handling and numeric coercion
/// happen before this is built, so every field is already in storage shape.
#[derive(Debug, Clone)]
pub struct NewMagazine {
    pub title: String,
    pub category: String,
    pub cover: String,
    pub pdf_path: Option<String>,
    pub date: Option<String>,
    pub reading_time: Option<String>,
    pub rating: f64,
    pub description: String,
    pub tags: Option<String>,
    pub is_discover: Option<i64>,
    pub price: f64,
    pub discount: i64,
}

#[derive(sqlx::FromRow, serde::Serialize, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}
