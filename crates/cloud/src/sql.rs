use async_trait::async_trait;
use recipebook_db::table::{CloudAccount, CloudImage, CloudList, CloudRecipe};
use recipebook_shared::{
    Result,
    recipe::Recipe,
    shopping::UserList,
    user::{Account, normalize_email},
};
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SimpleExpr, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};

use crate::{AccountService, Image, ListService, NewAccount, StorageService, password};

/// Hosted backend persisted in its own SQLite database.
///
/// Documents are kept as JSON text next to the few columns needed to query
/// them.
#[derive(Clone)]
pub struct Backend {
    pool: SqlitePool,
}

impl Backend {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: String,
    email: String,
    password: String,
    display_name: Option<String>,
    created_at: i64,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            created_at: row.created_at,
        }
    }
}

enum FindAccount<'a> {
    Id(&'a str),
    Email(String),
}

impl Backend {
    async fn find_account(&self, find: FindAccount<'_>) -> Result<Option<AccountRow>> {
        let mut statement = Query::select()
            .columns([
                CloudAccount::Id,
                CloudAccount::Email,
                CloudAccount::Password,
                CloudAccount::DisplayName,
                CloudAccount::CreatedAt,
            ])
            .from(CloudAccount::Table)
            .limit(1)
            .to_owned();

        match find {
            FindAccount::Id(id) => statement.and_where(Expr::col(CloudAccount::Id).eq(id)),
            FindAccount::Email(email) => {
                statement.and_where(Expr::col(CloudAccount::Email).eq(email))
            }
        };

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, AccountRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn verified_account(&self, id: &str, password: &str) -> Result<AccountRow> {
        let Some(row) = self.find_account(FindAccount::Id(id)).await? else {
            recipebook_shared::not_found!("account");
        };

        if !password::verify(password, &row.password)? {
            tracing::debug!("Password check failed for {id}");
            recipebook_shared::user!("Invalid password");
        }

        Ok(row)
    }

    /// Runs a write on the account table, reporting the email unique index as a user error.
    async fn write_account(&self, sql: &str, values: sea_query_sqlx::SqlxValues) -> Result<()> {
        match sqlx::query_with(sql, values).execute(&self.pool).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                tracing::debug!("Email already taken on write: {err}");
                recipebook_shared::user!("Email already exists");
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn fetch_recipes(&self, filter: SimpleExpr) -> Result<Vec<Recipe>> {
        let statement = Query::select()
            .column(CloudRecipe::Data)
            .from(CloudRecipe::Table)
            .and_where(filter)
            .order_by(CloudRecipe::CreatedAt, Order::Desc)
            .order_by(CloudRecipe::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (Json<Recipe>,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(recipe,)| recipe.0).collect())
    }
}

#[async_trait]
impl StorageService for Backend {
    async fn recipes(&self) -> Result<Vec<Recipe>> {
        self.fetch_recipes(Expr::col(CloudRecipe::IsPublic).eq(true))
            .await
    }

    async fn recipes_by_owner(&self, owner_id: &str) -> Result<Vec<Recipe>> {
        self.fetch_recipes(Expr::col(CloudRecipe::OwnerId).eq(owner_id))
            .await
    }

    async fn recipe(&self, id: &str) -> Result<Option<Recipe>> {
        let statement = Query::select()
            .column(CloudRecipe::Data)
            .from(CloudRecipe::Table)
            .and_where(Expr::col(CloudRecipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (Json<Recipe>,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(recipe,)| recipe.0))
    }

    async fn put_recipe(&self, recipe: &Recipe) -> Result<()> {
        let data = serde_json::to_string(recipe)?;
        let statement = Query::insert()
            .into_table(CloudRecipe::Table)
            .columns([
                CloudRecipe::Id,
                CloudRecipe::OwnerId,
                CloudRecipe::IsPublic,
                CloudRecipe::Data,
                CloudRecipe::CreatedAt,
                CloudRecipe::UpdatedAt,
            ])
            .values_panic([
                recipe.id.to_owned().into(),
                recipe.owner_id.to_owned().into(),
                recipe.is_public.into(),
                data.into(),
                recipe.created_at.into(),
                recipe.updated_at.into(),
            ])
            .on_conflict(
                OnConflict::column(CloudRecipe::Id)
                    .update_columns([
                        CloudRecipe::IsPublic,
                        CloudRecipe::Data,
                        CloudRecipe::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn delete_recipe(&self, id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(CloudRecipe::Table)
            .and_where(Expr::col(CloudRecipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn put_image(
        &self,
        recipe_id: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        let now = recipebook_shared::now();
        let statement = Query::insert()
            .into_table(CloudImage::Table)
            .columns([
                CloudImage::RecipeId,
                CloudImage::ContentType,
                CloudImage::Data,
                CloudImage::UpdatedAt,
            ])
            .values_panic([
                recipe_id.into(),
                content_type.into(),
                data.into(),
                now.into(),
            ])
            .on_conflict(
                OnConflict::column(CloudImage::RecipeId)
                    .update_columns([
                        CloudImage::ContentType,
                        CloudImage::Data,
                        CloudImage::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(crate::image_url(recipe_id, now))
    }

    async fn image(&self, recipe_id: &str) -> Result<Option<Image>> {
        let statement = Query::select()
            .columns([CloudImage::ContentType, CloudImage::Data])
            .from(CloudImage::Table)
            .and_where(Expr::col(CloudImage::RecipeId).eq(recipe_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String, Vec<u8>), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(content_type, data)| Image { content_type, data }))
    }

    async fn delete_image(&self, recipe_id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(CloudImage::Table)
            .and_where(Expr::col(CloudImage::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }
}

#[async_trait]
impl ListService for Backend {
    async fn lists(&self, user_id: &str) -> Result<Vec<UserList>> {
        let statement = Query::select()
            .column(CloudList::Data)
            .from(CloudList::Table)
            .and_where(Expr::col(CloudList::UserId).eq(user_id))
            .order_by(CloudList::CreatedAt, Order::Desc)
            .order_by(CloudList::Id, Order::Desc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (Json<UserList>,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(list,)| list.0).collect())
    }

    async fn list(&self, id: &str) -> Result<Option<UserList>> {
        let statement = Query::select()
            .column(CloudList::Data)
            .from(CloudList::Table)
            .and_where(Expr::col(CloudList::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (Json<UserList>,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(list,)| list.0))
    }

    async fn put_list(&self, list: &UserList) -> Result<()> {
        let data = serde_json::to_string(list)?;
        let statement = Query::insert()
            .into_table(CloudList::Table)
            .columns([
                CloudList::Id,
                CloudList::UserId,
                CloudList::Data,
                CloudList::CreatedAt,
                CloudList::UpdatedAt,
            ])
            .values_panic([
                list.id.to_owned().into(),
                list.user_id.to_owned().into(),
                data.into(),
                list.created_at.into(),
                list.updated_at.into(),
            ])
            .on_conflict(
                OnConflict::column(CloudList::Id)
                    .update_columns([CloudList::Data, CloudList::UpdatedAt])
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn delete_list(&self, id: &str) -> Result<()> {
        let statement = Query::delete()
            .from_table(CloudList::Table)
            .and_where(Expr::col(CloudList::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn delete_lists_by_user(&self, user_id: &str) -> Result<usize> {
        let statement = Query::delete()
            .from_table(CloudList::Table)
            .and_where(Expr::col(CloudList::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(result.rows_affected() as usize)
    }
}

#[async_trait]
impl AccountService for Backend {
    async fn register(&self, input: NewAccount) -> Result<Account> {
        let email = normalize_email(&input.email);

        if self
            .find_account(FindAccount::Email(email.to_owned()))
            .await?
            .is_some()
        {
            recipebook_shared::user!("Email already exists");
        }

        let account = Account {
            id: recipebook_shared::new_id(),
            email,
            display_name: input.display_name,
            created_at: recipebook_shared::now(),
        };

        let statement = Query::insert()
            .into_table(CloudAccount::Table)
            .columns([
                CloudAccount::Id,
                CloudAccount::Email,
                CloudAccount::Password,
                CloudAccount::DisplayName,
                CloudAccount::CreatedAt,
            ])
            .values_panic([
                account.id.to_owned().into(),
                account.email.to_owned().into(),
                password::hash(&input.password)?.into(),
                account.display_name.to_owned().into(),
                account.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        self.write_account(&sql, values).await?;

        Ok(account)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account> {
        let Some(row) = self
            .find_account(FindAccount::Email(normalize_email(email)))
            .await?
        else {
            tracing::debug!("Sign in with unknown email");
            recipebook_shared::user!("Invalid email or password");
        };

        if !password::verify(password, &row.password)? {
            tracing::debug!("Sign in with wrong password for {}", row.id);
            recipebook_shared::user!("Invalid email or password");
        }

        Ok(row.into())
    }

    async fn account(&self, id: &str) -> Result<Option<Account>> {
        Ok(self
            .find_account(FindAccount::Id(id))
            .await?
            .map(Into::into))
    }

    async fn change_password(&self, id: &str, current: &str, new: &str) -> Result<()> {
        self.verified_account(id, current).await?;

        let statement = Query::update()
            .table(CloudAccount::Table)
            .value(CloudAccount::Password, password::hash(new)?)
            .and_where(Expr::col(CloudAccount::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn change_email(&self, id: &str, password: &str, new_email: &str) -> Result<Account> {
        let email = normalize_email(new_email);

        if let Some(existing) = self
            .find_account(FindAccount::Email(email.to_owned()))
            .await?
            && existing.id != id
        {
            recipebook_shared::user!("Email already exists");
        }

        let mut row = self.verified_account(id, password).await?;

        let statement = Query::update()
            .table(CloudAccount::Table)
            .value(CloudAccount::Email, email.to_owned())
            .and_where(Expr::col(CloudAccount::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        self.write_account(&sql, values).await?;

        row.email = email;

        Ok(row.into())
    }

    async fn delete(&self, id: &str, password: &str) -> Result<()> {
        self.verified_account(id, password).await?;

        let statement = Query::delete()
            .from_table(CloudAccount::Table)
            .and_where(Expr::col(CloudAccount::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }
}
