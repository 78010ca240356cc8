use crate::cache;

impl super::Command {
    pub async fn delete(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<()> {
        let recipe = self.load_owned(id, request_by).await?;

        if recipe.image_url.is_some() {
            self.storage.delete_image(&recipe.id).await?;
        }

        self.storage.delete_recipe(&recipe.id).await?;
        cache::remove(&self.write_db, &recipe.id).await?;

        Ok(())
    }
}
