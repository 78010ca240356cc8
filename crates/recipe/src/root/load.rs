use recipebook_shared::recipe::Recipe;

use crate::cache;

impl super::Command {
    pub async fn load(&self, id: impl Into<String>) -> recipebook_shared::Result<Option<Recipe>> {
        let id = id.into();

        match self.storage.recipe(&id).await {
            Ok(Some(recipe)) => {
                cache::upsert(&self.write_db, &recipe).await?;

                Ok(Some(recipe))
            }
            Ok(None) => {
                cache::remove(&self.write_db, &id).await?;

                Ok(None)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch recipe {id}, serving cache: {e}");

                Ok(cache::find(&self.read_db, &id).await?)
            }
        }
    }

    /// Loads a recipe the requester is allowed to see: a public one or one
    /// of their own.
    pub async fn view(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<Recipe> {
        let request_by: String = request_by.into();
        let Some(recipe) = self.load(id).await? else {
            recipebook_shared::not_found!("recipe");
        };

        if !recipe.is_public && recipe.owner_id != request_by {
            recipebook_shared::not_found!("recipe");
        }

        Ok(recipe)
    }

    /// Loads a recipe for a mutation, failing unless the requester owns it.
    /// Private recipes of others are not found.
    pub(crate) async fn load_owned(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<Recipe> {
        let request_by: String = request_by.into();
        let Some(recipe) = self.load(id).await? else {
            recipebook_shared::not_found!("recipe");
        };

        if recipe.owner_id != request_by {
            if !recipe.is_public {
                recipebook_shared::not_found!("recipe");
            }

            recipebook_shared::forbidden!("not owner of recipe");
        }

        Ok(recipe)
    }
}
