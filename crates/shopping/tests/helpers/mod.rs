use std::{path::PathBuf, str::FromStr, sync::Arc};

use recipebook_cloud::{State, memory};
use recipebook_recipe::RecipeInput;
use recipebook_shared::recipe::{Category, Difficulty, Ingredient, Unit};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<(State, Arc<memory::Backend>)> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebook_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    let backend = Arc::new(memory::Backend::new());

    Ok((
        State {
            read_db: pool.clone(),
            write_db: pool,
            storage: backend.clone(),
            lists: backend.clone(),
            accounts: backend.clone(),
        },
        backend,
    ))
}

pub fn recipe_input(title: &str) -> RecipeInput {
    RecipeInput {
        title: title.to_owned(),
        description: "Family favourite".to_owned(),
        ingredients: vec![
            Ingredient::new("Flour", 250.0, Unit::G),
            Ingredient::new("Egg", 2.0, Unit::Piece),
        ],
        directions: vec!["Mix".to_owned(), "Bake".to_owned()],
        category: Category::Dessert,
        difficulty: Difficulty::Easy,
        duration: 45,
        portions: 4,
        is_public: true,
    }
}
