use recipebook_db::table::UserListCache;
use recipebook_shared::shopping::{ListItem, UserList};
use sea_query::{
    Expr, ExprTrait, Func, InsertStatement, OnConflict, Order, Query, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};

#[derive(FromRow)]
struct UserListRow {
    id: String,
    user_id: String,
    name: String,
    recipe_id: Option<String>,
    items: Json<Vec<ListItem>>,
    created_at: i64,
    updated_at: Option<i64>,
}

impl From<UserListRow> for UserList {
    fn from(row: UserListRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            recipe_id: row.recipe_id,
            items: row.items.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn columns() -> [UserListCache; 7] {
    [
        UserListCache::Id,
        UserListCache::UserId,
        UserListCache::Name,
        UserListCache::RecipeId,
        UserListCache::Items,
        UserListCache::CreatedAt,
        UserListCache::UpdatedAt,
    ]
}

/// Rows per upsert statement, keeps bound values under the SQLite limit.
const SYNC_CHUNK: usize = 500;

fn upsert_statement(lists: &[UserList], synced_at: i64) -> anyhow::Result<InsertStatement> {
    let mut statement = Query::insert()
        .into_table(UserListCache::Table)
        .columns(columns().into_iter().chain([UserListCache::SyncedAt]))
        .on_conflict(
            OnConflict::column(UserListCache::Id)
                .update_columns([
                    UserListCache::Name,
                    UserListCache::RecipeId,
                    UserListCache::Items,
                    UserListCache::UpdatedAt,
                    UserListCache::SyncedAt,
                ])
                .to_owned(),
        )
        .to_owned();

    for list in lists {
        statement.values_panic([
            list.id.to_owned().into(),
            list.user_id.to_owned().into(),
            list.name.to_owned().into(),
            list.recipe_id.to_owned().into(),
            serde_json::to_string(&list.items)?.into(),
            list.created_at.into(),
            list.updated_at.into(),
            synced_at.into(),
        ]);
    }

    Ok(statement)
}

pub async fn upsert(pool: &SqlitePool, list: &UserList) -> anyhow::Result<()> {
    let (sql, values) = upsert_statement(std::slice::from_ref(list), recipebook_shared::now())?
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Replaces the cached lists of `user_id` with `lists`.
pub async fn sync_user(
    pool: &SqlitePool,
    user_id: &str,
    lists: &[UserList],
) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    // Strictly after every row already cached, so untouched rows are stale.
    let statement = Query::select()
        .expr(Func::max(Expr::col(UserListCache::SyncedAt)))
        .from(UserListCache::Table)
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (last,) = sqlx::query_as_with::<_, (Option<i64>,), _>(&sql, values)
        .fetch_one(&mut *tx)
        .await?;
    let now = recipebook_shared::now();
    let synced_at = last.map_or(now, |last| Ord::max(now, last + 1));

    for chunk in lists.chunks(SYNC_CHUNK) {
        let (sql, values) = upsert_statement(chunk, synced_at)?.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
    }

    let statement = Query::delete()
        .from_table(UserListCache::Table)
        .and_where(Expr::col(UserListCache::UserId).eq(user_id))
        .and_where(Expr::col(UserListCache::SyncedAt).lt(synced_at))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(())
}

pub async fn remove(pool: &SqlitePool, id: &str) -> anyhow::Result<()> {
    let statement = Query::delete()
        .from_table(UserListCache::Table)
        .and_where(Expr::col(UserListCache::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub async fn find(pool: &SqlitePool, id: &str) -> anyhow::Result<Option<UserList>> {
    let statement = Query::select()
        .columns(columns())
        .from(UserListCache::Table)
        .and_where(Expr::col(UserListCache::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, UserListRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Into::into))
}

pub async fn by_user(pool: &SqlitePool, user_id: &str) -> anyhow::Result<Vec<UserList>> {
    let statement = Query::select()
        .columns(columns())
        .from(UserListCache::Table)
        .and_where(Expr::col(UserListCache::UserId).eq(user_id))
        .order_by(UserListCache::CreatedAt, Order::Desc)
        .order_by(UserListCache::Id, Order::Desc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, UserListRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}
