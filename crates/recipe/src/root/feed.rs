use recipebook_shared::recipe::Recipe;

use crate::{FeedQuery, cache};

impl super::Command {
    /// Pulls the public feed from the network into the cache and returns how
    /// many recipes were synced.
    pub async fn refresh(&self) -> recipebook_shared::Result<usize> {
        let recipes = self.storage.recipes().await?;
        cache::sync_public(&self.write_db, &recipes).await?;

        Ok(recipes.len())
    }

    /// Public recipes, newest first. Served from the cache when the network
    /// is unreachable.
    pub async fn feed(&self, query: &FeedQuery) -> recipebook_shared::Result<Vec<Recipe>> {
        if let Err(e) = self.refresh().await {
            tracing::warn!("Failed to refresh recipe feed, serving cache: {e}");
        }

        Ok(cache::filter(&self.read_db, query).await?)
    }

    /// Every recipe of an owner, public and private.
    pub async fn by_owner(
        &self,
        owner_id: impl Into<String>,
    ) -> recipebook_shared::Result<Vec<Recipe>> {
        let owner_id = owner_id.into();

        match self.storage.recipes_by_owner(&owner_id).await {
            Ok(recipes) => {
                cache::sync_owner(&self.write_db, &owner_id, &recipes).await?;

                Ok(recipes)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch recipes of {owner_id}, serving cache: {e}");

                Ok(cache::by_owner(&self.read_db, &owner_id).await?)
            }
        }
    }
}
