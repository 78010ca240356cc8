use recipebook_db::table::{RecipeCache, UserListCache};
use recipebook_shared::Error;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use validator::Validate;

use crate::session;

#[derive(Validate, Deserialize, Clone, Debug)]
pub struct DeleteAccountInput {
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Removes the identity together with every recipe, image and list the
    /// account owns, then forgets it locally.
    pub async fn delete_account(
        &self,
        account_id: impl Into<String>,
        input: DeleteAccountInput,
    ) -> recipebook_shared::Result<()> {
        input.validate()?;

        let account = self.profile(account_id).await?;

        // Owned data goes first, so the password must hold before anything is removed.
        match self.accounts.sign_in(&account.email, &input.password).await {
            Ok(_) => {}
            Err(Error::User(_)) => recipebook_shared::user!("Invalid password"),
            Err(err) => return Err(err),
        }

        for recipe in self.storage.recipes_by_owner(&account.id).await? {
            if recipe.image_url.is_some() {
                self.storage.delete_image(&recipe.id).await?;
            }

            self.storage.delete_recipe(&recipe.id).await?;
        }

        let lists = self.lists.delete_lists_by_user(&account.id).await?;

        self.accounts.delete(&account.id, &input.password).await?;

        self.forget(&account.id).await?;

        tracing::info!("Account {} deleted with {lists} list(s)", account.id);

        Ok(())
    }

    async fn forget(&self, account_id: &str) -> anyhow::Result<()> {
        let mut tx = self.write_db.begin().await?;

        let statement = Query::delete()
            .from_table(RecipeCache::Table)
            .and_where(Expr::col(RecipeCache::OwnerId).eq(account_id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(UserListCache::Table)
            .and_where(Expr::col(UserListCache::UserId).eq(account_id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        tx.commit().await?;

        session::remove_others(&self.write_db, account_id, None).await?;

        Ok(())
    }
}
