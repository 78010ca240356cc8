//! Interfaces of the hosted backend (document store, object storage and
//! identity provider) and the implementations the application can run on.

pub mod memory;
pub mod password;
pub mod sql;

use std::sync::Arc;

use async_trait::async_trait;
use recipebook_shared::{Result, recipe::Recipe, shopping::UserList, user::Account};

/// Handles every command crate works with: the local cache pools and the
/// hosted services.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
    pub storage: Arc<dyn StorageService>,
    pub lists: Arc<dyn ListService>,
    pub accounts: Arc<dyn AccountService>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Public path an uploaded recipe image is served from.
pub fn image_url(recipe_id: &str, version: i64) -> String {
    format!("/recipes/{recipe_id}/image?v={version}")
}

/// Recipe documents and their images.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Public recipes, newest first.
    async fn recipes(&self) -> Result<Vec<Recipe>>;
    /// Every recipe of an owner, public or not, newest first.
    async fn recipes_by_owner(&self, owner_id: &str) -> Result<Vec<Recipe>>;
    async fn recipe(&self, id: &str) -> Result<Option<Recipe>>;
    async fn put_recipe(&self, recipe: &Recipe) -> Result<()>;
    async fn delete_recipe(&self, id: &str) -> Result<()>;
    /// Stores the image and returns the url it is reachable at.
    async fn put_image(&self, recipe_id: &str, content_type: &str, data: Vec<u8>)
    -> Result<String>;
    async fn image(&self, recipe_id: &str) -> Result<Option<Image>>;
    async fn delete_image(&self, recipe_id: &str) -> Result<()>;
}

/// Shopping list documents.
#[async_trait]
pub trait ListService: Send + Sync {
    /// Lists of a user, newest first.
    async fn lists(&self, user_id: &str) -> Result<Vec<UserList>>;
    async fn list(&self, id: &str) -> Result<Option<UserList>>;
    async fn put_list(&self, list: &UserList) -> Result<()>;
    async fn delete_list(&self, id: &str) -> Result<()>;
    /// Returns how many lists were removed.
    async fn delete_lists_by_user(&self, user_id: &str) -> Result<usize>;
}

pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Identity provider.
#[async_trait]
pub trait AccountService: Send + Sync {
    async fn register(&self, input: NewAccount) -> Result<Account>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Account>;
    async fn account(&self, id: &str) -> Result<Option<Account>>;
    async fn change_password(&self, id: &str, current: &str, new: &str) -> Result<()>;
    async fn change_email(&self, id: &str, password: &str, new_email: &str) -> Result<Account>;
    async fn delete(&self, id: &str, password: &str) -> Result<()>;
}

pub(crate) fn sort_recipes(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

pub(crate) fn sort_lists(lists: &mut [UserList]) {
    lists.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
