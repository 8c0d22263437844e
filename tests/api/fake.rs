use fake::{
    Fake,
    faker::{company::en::Buzzword, lorem::en::Sentence},
};
use magazinehub::{db::magazine::insert_magazine, model::NewMagazine};
use rand::Rng;
use sqlx::SqlitePool;

pub async fn insert_fake_magazine(pool: &SqlitePool, category: &str) -> i64 {
    insert_magazine(pool, &create_fake_magazine(category))
        .await
        .unwrap()
}

pub fn create_fake_magazine(category: &str) -> NewMagazine {
    let mut rng = rand::rng();

    NewMagazine {
        title: format!("{} Magazine", Buzzword().fake::<String>()),
        category: category.to_string(),
        cover: "resources/mag-covers/default.jpg".to_string(),
        pdf_path: None,
        date: Some("2024-05-01".to_string()),
        reading_time: Some("12 min".to_string()),
        rating: 5.0,
        description: Sentence(3..8).fake(),
        tags: Some("monthly,print".to_string()),
        is_discover: None,
        price: rng.random_range(0..50) as f64,
        discount: rng.random_range(0..=100),
    }
}
