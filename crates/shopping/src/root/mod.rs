mod create;
mod delete;
mod item;
mod load;
mod rename;

pub use create::*;
pub use rename::*;

use recipebook_shared::shopping::UserList;
use std::ops::Deref;

use crate::cache;

#[derive(Clone)]
pub struct Command {
    state: recipebook_cloud::State,
}

impl Deref for Command {
    type Target = recipebook_cloud::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: recipebook_cloud::State) -> Self {
        Self { state }
    }

    /// Stamps the list and writes it to the network, then to the cache.
    async fn save(&self, list: &mut UserList) -> recipebook_shared::Result<()> {
        list.touch();
        self.lists.put_list(list).await?;
        cache::upsert(&self.write_db, list).await?;

        Ok(())
    }
}
