use recipebook_shared::recipe::{Category, Difficulty, Ingredient, Recipe, Unit};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};

pub async fn setup_sql_backend(path: PathBuf) -> anyhow::Result<recipebook_cloud::sql::Backend> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebook_db::cloud_migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    Ok(recipebook_cloud::sql::Backend::new(pool))
}

pub fn recipe(id: &str, owner_id: &str, is_public: bool, created_at: i64) -> Recipe {
    Recipe {
        id: id.to_owned(),
        owner_id: owner_id.to_owned(),
        owner_name: None,
        title: format!("Recipe {id}"),
        description: String::new(),
        ingredients: vec![Ingredient::new("flour", 200.0, Unit::G)],
        directions: vec!["Mix".to_owned()],
        category: Category::Dinner,
        difficulty: Difficulty::Easy,
        duration: 30,
        portions: 2,
        image_url: None,
        is_public,
        created_at,
        updated_at: None,
    }
}
