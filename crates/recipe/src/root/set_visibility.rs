use recipebook_shared::recipe::Recipe;

use crate::cache;

impl super::Command {
    /// Shares the recipe to the public feed or withdraws it.
    pub async fn set_visibility(
        &self,
        id: impl Into<String>,
        is_public: bool,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<Recipe> {
        let mut recipe = self.load_owned(id, request_by).await?;

        if recipe.is_public == is_public {
            return Ok(recipe);
        }

        recipe.is_public = is_public;
        recipe.updated_at = Some(recipebook_shared::now());

        self.storage.put_recipe(&recipe).await?;
        cache::upsert(&self.write_db, &recipe).await?;

        Ok(recipe)
    }
}
