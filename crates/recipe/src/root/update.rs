use recipebook_shared::recipe::Recipe;
use validator::Validate;

use crate::{RecipeInput, cache};

impl super::Command {
    pub async fn update(
        &self,
        id: impl Into<String>,
        input: RecipeInput,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<Recipe> {
        let input = input.normalized();
        input.validate()?;

        let mut recipe = self.load_owned(id, request_by).await?;
        recipe.title = input.title;
        recipe.description = input.description;
        recipe.ingredients = input.ingredients;
        recipe.directions = input.directions;
        recipe.category = input.category;
        recipe.difficulty = input.difficulty;
        recipe.duration = input.duration;
        recipe.portions = input.portions;
        recipe.is_public = input.is_public;
        recipe.updated_at = Some(recipebook_shared::now());

        self.storage.put_recipe(&recipe).await?;
        cache::upsert(&self.write_db, &recipe).await?;

        Ok(recipe)
    }
}
