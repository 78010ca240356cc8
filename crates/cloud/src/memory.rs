use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use recipebook_shared::{
    Result,
    recipe::Recipe,
    shopping::UserList,
    user::{Account, normalize_email},
};
use tokio::sync::Mutex;

use crate::{AccountService, Image, ListService, NewAccount, StorageService, password};

struct StoredAccount {
    account: Account,
    password: String,
}

#[derive(Default)]
struct Documents {
    recipes: HashMap<String, Recipe>,
    images: HashMap<String, Image>,
    lists: HashMap<String, UserList>,
    accounts: HashMap<String, StoredAccount>,
}

/// Process-local stand-in for the hosted backend.
///
/// Every call takes the same lock, so operations are applied one at a time
/// in arrival order. `set_offline` makes every call fail, which is how the
/// repositories' cache fallback is exercised.
#[derive(Default)]
pub struct Backend {
    documents: Mutex<Documents>,
    offline: AtomicBool,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            tracing::warn!("Cloud backend is offline");
            recipebook_shared::server!("network unavailable");
        }

        Ok(())
    }
}

#[async_trait]
impl StorageService for Backend {
    async fn recipes(&self) -> Result<Vec<Recipe>> {
        self.ensure_online()?;
        let documents = self.documents.lock().await;
        let mut recipes = documents
            .recipes
            .values()
            .filter(|r| r.is_public)
            .cloned()
            .collect::<Vec<_>>();
        crate::sort_recipes(&mut recipes);

        Ok(recipes)
    }

    async fn recipes_by_owner(&self, owner_id: &str) -> Result<Vec<Recipe>> {
        self.ensure_online()?;
        let documents = self.documents.lock().await;
        let mut recipes = documents
            .recipes
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect::<Vec<_>>();
        crate::sort_recipes(&mut recipes);

        Ok(recipes)
    }

    async fn recipe(&self, id: &str) -> Result<Option<Recipe>> {
        self.ensure_online()?;

        Ok(self.documents.lock().await.recipes.get(id).cloned())
    }

    async fn put_recipe(&self, recipe: &Recipe) -> Result<()> {
        self.ensure_online()?;
        self.documents
            .lock()
            .await
            .recipes
            .insert(recipe.id.to_owned(), recipe.clone());

        Ok(())
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        self.ensure_online()?;
        self.documents.lock().await.recipes.remove(id);

        Ok(())
    }

    async fn put_image(
        &self,
        recipe_id: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        self.ensure_online()?;
        self.documents.lock().await.images.insert(
            recipe_id.to_owned(),
            Image {
                content_type: content_type.to_owned(),
                data,
            },
        );

        Ok(crate::image_url(recipe_id, recipebook_shared::now()))
    }

    async fn image(&self, recipe_id: &str) -> Result<Option<Image>> {
        self.ensure_online()?;

        Ok(self.documents.lock().await.images.get(recipe_id).cloned())
    }

    async fn delete_image(&self, recipe_id: &str) -> Result<()> {
        self.ensure_online()?;
        self.documents.lock().await.images.remove(recipe_id);

        Ok(())
    }
}

#[async_trait]
impl ListService for Backend {
    async fn lists(&self, user_id: &str) -> Result<Vec<UserList>> {
        self.ensure_online()?;
        let documents = self.documents.lock().await;
        let mut lists = documents
            .lists
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect::<Vec<_>>();
        crate::sort_lists(&mut lists);

        Ok(lists)
    }

    async fn list(&self, id: &str) -> Result<Option<UserList>> {
        self.ensure_online()?;

        Ok(self.documents.lock().await.lists.get(id).cloned())
    }

    async fn put_list(&self, list: &UserList) -> Result<()> {
        self.ensure_online()?;
        self.documents
            .lock()
            .await
            .lists
            .insert(list.id.to_owned(), list.clone());

        Ok(())
    }

    async fn delete_list(&self, id: &str) -> Result<()> {
        self.ensure_online()?;
        self.documents.lock().await.lists.remove(id);

        Ok(())
    }

    async fn delete_lists_by_user(&self, user_id: &str) -> Result<usize> {
        self.ensure_online()?;
        let mut documents = self.documents.lock().await;
        let len = documents.lists.len();
        documents.lists.retain(|_, l| l.user_id != user_id);

        Ok(len - documents.lists.len())
    }
}

#[async_trait]
impl AccountService for Backend {
    async fn register(&self, input: NewAccount) -> Result<Account> {
        self.ensure_online()?;
        let email = normalize_email(&input.email);
        let password = password::hash(&input.password)?;
        let mut documents = self.documents.lock().await;

        if documents
            .accounts
            .values()
            .any(|stored| stored.account.email == email)
        {
            recipebook_shared::user!("Email already exists");
        }

        let account = Account {
            id: recipebook_shared::new_id(),
            email,
            display_name: input.display_name,
            created_at: recipebook_shared::now(),
        };

        documents.accounts.insert(
            account.id.to_owned(),
            StoredAccount {
                account: account.clone(),
                password,
            },
        );

        Ok(account)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account> {
        self.ensure_online()?;
        let email = normalize_email(email);
        let documents = self.documents.lock().await;

        let Some(stored) = documents
            .accounts
            .values()
            .find(|stored| stored.account.email == email)
        else {
            tracing::debug!("Sign in with unknown email");
            recipebook_shared::user!("Invalid email or password");
        };

        if !password::verify(password, &stored.password)? {
            tracing::debug!("Sign in with wrong password for {}", stored.account.id);
            recipebook_shared::user!("Invalid email or password");
        }

        Ok(stored.account.clone())
    }

    async fn account(&self, id: &str) -> Result<Option<Account>> {
        self.ensure_online()?;

        Ok(self
            .documents
            .lock()
            .await
            .accounts
            .get(id)
            .map(|stored| stored.account.clone()))
    }

    async fn change_password(&self, id: &str, current: &str, new: &str) -> Result<()> {
        self.ensure_online()?;
        let mut documents = self.documents.lock().await;

        let Some(stored) = documents.accounts.get_mut(id) else {
            recipebook_shared::not_found!("account");
        };

        if !password::verify(current, &stored.password)? {
            recipebook_shared::user!("Invalid password");
        }

        stored.password = password::hash(new)?;

        Ok(())
    }

    async fn change_email(&self, id: &str, password: &str, new_email: &str) -> Result<Account> {
        self.ensure_online()?;
        let email = normalize_email(new_email);
        let mut documents = self.documents.lock().await;

        if documents
            .accounts
            .values()
            .any(|stored| stored.account.email == email && stored.account.id != id)
        {
            recipebook_shared::user!("Email already exists");
        }

        let Some(stored) = documents.accounts.get_mut(id) else {
            recipebook_shared::not_found!("account");
        };

        if !password::verify(password, &stored.password)? {
            recipebook_shared::user!("Invalid password");
        }

        stored.account.email = email;

        Ok(stored.account.clone())
    }

    async fn delete(&self, id: &str, password: &str) -> Result<()> {
        self.ensure_online()?;
        let mut documents = self.documents.lock().await;

        let Some(stored) = documents.accounts.get(id) else {
            recipebook_shared::not_found!("account");
        };

        if !password::verify(password, &stored.password)? {
            recipebook_shared::user!("Invalid password");
        }

        documents.accounts.remove(id);

        Ok(())
    }
}
