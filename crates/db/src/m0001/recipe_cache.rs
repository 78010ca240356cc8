use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::RecipeCache;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeCache::Table)
        .col(
            ColumnDef::new(RecipeCache::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipeCache::OwnerId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeCache::OwnerName)
                .string()
                .string_len(50),
        )
        .col(
            ColumnDef::new(RecipeCache::Title)
                .string()
                .not_null()
                .string_len(80),
        )
        .col(
            ColumnDef::new(RecipeCache::Description)
                .string()
                .not_null()
                .string_len(2000)
                .default(""),
        )
        .col(ColumnDef::new(RecipeCache::Ingredients).text().not_null())
        .col(ColumnDef::new(RecipeCache::Directions).text().not_null())
        .col(
            ColumnDef::new(RecipeCache::Category)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(RecipeCache::Difficulty)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(RecipeCache::Duration)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(RecipeCache::Portions)
                .integer()
                .not_null()
                .default(1),
        )
        .col(ColumnDef::new(RecipeCache::ImageUrl).string().string_len(255))
        .col(
            ColumnDef::new(RecipeCache::IsPublic)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(
            ColumnDef::new(RecipeCache::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(RecipeCache::UpdatedAt).big_integer().null())
        .col(
            ColumnDef::new(RecipeCache::SyncedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeCache::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_cache_owner")
        .table(RecipeCache::Table)
        .col(RecipeCache::OwnerId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_cache_owner")
        .table(RecipeCache::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx2;

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_cache_public_category")
        .table(RecipeCache::Table)
        .col(RecipeCache::IsPublic)
        .col(RecipeCache::Category)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_cache_public_category")
        .table(RecipeCache::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx2 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_2().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_2().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
