use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::CloudImage;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(CloudImage::Table)
        .col(
            ColumnDef::new(CloudImage::RecipeId)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(CloudImage::ContentType)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(ColumnDef::new(CloudImage::Data).blob().not_null())
        .col(
            ColumnDef::new(CloudImage::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(CloudImage::Table).to_owned()
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
