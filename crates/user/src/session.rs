use recipebook_db::table::Session;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, FromRow)]
pub struct SessionRow {
    pub account_id: String,
    pub expire_at: i64,
}

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    account_id: &str,
    expire_at: i64,
) -> anyhow::Result<()> {
    let statement = Query::insert()
        .into_table(Session::Table)
        .columns([
            Session::Id,
            Session::AccountId,
            Session::CreatedAt,
            Session::ExpireAt,
        ])
        .values_panic([
            id.into(),
            account_id.into(),
            recipebook_shared::now().into(),
            expire_at.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub async fn find(pool: &SqlitePool, id: &str) -> anyhow::Result<Option<SessionRow>> {
    let statement = Query::select()
        .columns([Session::AccountId, Session::ExpireAt])
        .from(Session::Table)
        .and_where(Expr::col(Session::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, SessionRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub async fn remove(pool: &SqlitePool, id: &str) -> anyhow::Result<()> {
    let statement = Query::delete()
        .from_table(Session::Table)
        .and_where(Expr::col(Session::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Closes every session of an account except `keep`.
pub async fn remove_others(
    pool: &SqlitePool,
    account_id: &str,
    keep: Option<&str>,
) -> anyhow::Result<u64> {
    let mut statement = Query::delete()
        .from_table(Session::Table)
        .and_where(Expr::col(Session::AccountId).eq(account_id))
        .to_owned();

    if let Some(keep) = keep {
        statement.and_where(Expr::col(Session::Id).ne(keep));
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}

/// Drops the expired sessions of an account.
pub async fn remove_expired(pool: &SqlitePool, account_id: &str) -> anyhow::Result<u64> {
    let statement = Query::delete()
        .from_table(Session::Table)
        .and_where(Expr::col(Session::AccountId).eq(account_id))
        .and_where(Expr::col(Session::ExpireAt).lt(recipebook_shared::now()))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}
