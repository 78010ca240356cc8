use recipebook_shared::shopping::UserList;

use crate::cache;

impl super::Command {
    /// Lists of a user, newest first. Served from the cache when the network
    /// is unreachable.
    pub async fn lists(
        &self,
        user_id: impl Into<String>,
    ) -> recipebook_shared::Result<Vec<UserList>> {
        let user_id = user_id.into();

        match self.lists.lists(&user_id).await {
            Ok(lists) => {
                cache::sync_user(&self.write_db, &user_id, &lists).await?;

                Ok(lists)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch lists of {user_id}, serving cache: {e}");

                Ok(cache::by_user(&self.read_db, &user_id).await?)
            }
        }
    }

    pub async fn load(
        &self,
        id: impl Into<String>,
        request_by: impl Into<String>,
    ) -> recipebook_shared::Result<UserList> {
        let id = id.into();
        let request_by: String = request_by.into();

        let list = match self.lists.list(&id).await {
            Ok(Some(list)) => {
                cache::upsert(&self.write_db, &list).await?;

                Some(list)
            }
            Ok(None) => {
                cache::remove(&self.write_db, &id).await?;

                None
            }
            Err(e) => {
                tracing::warn!("Failed to fetch list {id}, serving cache: {e}");

                cache::find(&self.read_db, &id).await?
            }
        };

        let Some(list) = list else {
            recipebook_shared::not_found!("list");
        };

        if list.user_id != request_by {
            recipebook_shared::forbidden!("not owner of list");
        }

        Ok(list)
    }
}
