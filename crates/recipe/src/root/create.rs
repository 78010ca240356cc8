use recipebook_shared::recipe::Recipe;
use validator::Validate;

use crate::{RecipeInput, cache};

impl super::Command {
    pub async fn create(
        &self,
        input: RecipeInput,
        request_by: impl Into<String>,
        owner_name: impl Into<Option<String>>,
    ) -> recipebook_shared::Result<Recipe> {
        let input = input.normalized();
        input.validate()?;

        let recipe = Recipe {
            id: recipebook_shared::new_id(),
            owner_id: request_by.into(),
            owner_name: owner_name.into(),
            title: input.title,
            description: input.description,
            ingredients: input.ingredients,
            directions: input.directions,
            category: input.category,
            difficulty: input.difficulty,
            duration: input.duration,
            portions: input.portions,
            image_url: None,
            is_public: input.is_public,
            created_at: recipebook_shared::now(),
            updated_at: None,
        };

        self.storage.put_recipe(&recipe).await?;
        cache::upsert(&self.write_db, &recipe).await?;

        Ok(recipe)
    }
}
