use std::{path::PathBuf, str::FromStr, sync::Arc};

use recipebook_cloud::{State, memory};
use recipebook_recipe::RecipeInput;
use recipebook_shared::recipe::{Category, Difficulty, Ingredient, Recipe, Unit};
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

/// Public recipe written straight to the backend.
pub fn recipe(id: &str, owner_id: &str, created_at: i64) -> Recipe {
    let input = recipe_input(id);

    Recipe {
        id: id.to_owned(),
        owner_id: owner_id.to_owned(),
        owner_name: None,
        title: input.title,
        description: input.description,
        ingredients: input.ingredients,
        directions: input.directions,
        category: input.category,
        difficulty: input.difficulty,
        duration: input.duration,
        portions: input.portions,
        image_url: None,
        is_public: true,
        created_at,
        updated_at: None,
    }
}
