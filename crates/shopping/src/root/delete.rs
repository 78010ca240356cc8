use crate::cache;

impl super::Command {
    pub async fn delete(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<()> {
        let list = self.load(id, request_by).await?;

        self.lists.delete_list(&list.id).await?;
        cache::remove(&self.write_db, &list.id).await?;

        Ok(())
    }
}
