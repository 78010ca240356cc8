use recipebook_db::table::RecipeCache;
use recipebook_shared::recipe::{Category, Difficulty, Ingredient, Recipe};
use sea_query::{
    Expr, ExprTrait, Func, InsertStatement, LikeExpr, OnConflict, Order, Query, SimpleExpr,
    SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;
use sqlx::{
    SqlitePool,
    prelude::FromRow,
    types::{Json, Text},
};

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Filters of the public feed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FeedQuery {
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub max_duration: Option<u32>,
    /// Matched against the title.
    pub search: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    owner_id: String,
    owner_name: Option<String>,
    title: String,
    description: String,
    ingredients: Json<Vec<Ingredient>>,
    directions: Json<Vec<String>>,
    category: Text<Category>,
    difficulty: Text<Difficulty>,
    duration: u32,
    portions: u16,
    image_url: Option<String>,
    is_public: bool,
    created_at: i64,
    updated_at: Option<i64>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            owner_name: row.owner_name,
            title: row.title,
            description: row.description,
            ingredients: row.ingredients.0,
            directions: row.directions.0,
            category: row.category.0,
            difficulty: row.difficulty.0,
            duration: row.duration,
            portions: row.portions,
            image_url: row.image_url,
            is_public: row.is_public,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn columns() -> [RecipeCache; 15] {
    [
        RecipeCache::Id,
        RecipeCache::OwnerId,
        RecipeCache::OwnerName,
        RecipeCache::Title,
        RecipeCache::Description,
        RecipeCache::Ingredients,
        RecipeCache::Directions,
        RecipeCache::Category,
        RecipeCache::Difficulty,
        RecipeCache::Duration,
        RecipeCache::Portions,
        RecipeCache::ImageUrl,
        RecipeCache::IsPublic,
        RecipeCache::CreatedAt,
        RecipeCache::UpdatedAt,
    ]
}

/// Rows per upsert statement, keeps bound values under the SQLite limit.
const SYNC_CHUNK: usize = 500;

fn upsert_statement(recipes: &[Recipe], synced_at: i64) -> anyhow::Result<InsertStatement> {
    let mut statement = Query::insert()
        .into_table(RecipeCache::Table)
        .columns(columns().into_iter().chain([RecipeCache::SyncedAt]))
        .on_conflict(
            OnConflict::column(RecipeCache::Id)
                .update_columns([
                    RecipeCache::OwnerName,
                    RecipeCache::Title,
                    RecipeCache::Description,
                    RecipeCache::Ingredients,
                    RecipeCache::Directions,
                    RecipeCache::Category,
                    RecipeCache::Difficulty,
                    RecipeCache::Duration,
                    RecipeCache::Portions,
                    RecipeCache::ImageUrl,
                    RecipeCache::IsPublic,
                    RecipeCache::UpdatedAt,
                    RecipeCache::SyncedAt,
                ])
                .to_owned(),
        )
        .to_owned();

    for recipe in recipes {
        statement.values_panic([
            recipe.id.to_owned().into(),
            recipe.owner_id.to_owned().into(),
            recipe.owner_name.to_owned().into(),
            recipe.title.to_owned().into(),
            recipe.description.to_owned().into(),
            serde_json::to_string(&recipe.ingredients)?.into(),
            serde_json::to_string(&recipe.directions)?.into(),
            recipe.category.to_string().into(),
            recipe.difficulty.to_string().into(),
            recipe.duration.into(),
            recipe.portions.into(),
            recipe.image_url.to_owned().into(),
            recipe.is_public.into(),
            recipe.created_at.into(),
            recipe.updated_at.into(),
            synced_at.into(),
        ]);
    }

    Ok(statement)
}

pub async fn upsert(pool: &SqlitePool, recipe: &Recipe) -> anyhow::Result<()> {
    let (sql, values) = upsert_statement(std::slice::from_ref(recipe), recipebook_shared::now())?
        .build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Upserts `recipes` then drops the rows matching `scope` this sync did not
/// touch, all in one transaction.
async fn sync(pool: &SqlitePool, scope: SimpleExpr, recipes: &[Recipe]) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;

    // Strictly after every row already cached, so untouched rows are stale.
    let statement = Query::select()
        .expr(Func::max(Expr::col(RecipeCache::SyncedAt)))
        .from(RecipeCache::Table)
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (last,) = sqlx::query_as_with::<_, (Option<i64>,), _>(&sql, values)
        .fetch_one(&mut *tx)
        .await?;
    let now = recipebook_shared::now();
    let synced_at = last.map_or(now, |last| Ord::max(now, last + 1));

    for chunk in recipes.chunks(SYNC_CHUNK) {
        let (sql, values) = upsert_statement(chunk, synced_at)?.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
    }

    let statement = Query::delete()
        .from_table(RecipeCache::Table)
        .and_where(scope)
        .and_where(Expr::col(RecipeCache::SyncedAt).lt(synced_at))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(())
}

/// Replaces the cached public feed with `recipes`.
pub async fn sync_public(pool: &SqlitePool, recipes: &[Recipe]) -> anyhow::Result<()> {
    sync(pool, Expr::col(RecipeCache::IsPublic).eq(true), recipes).await
}

/// Replaces the cached recipes of `owner_id` with `recipes`.
pub async fn sync_owner(
    pool: &SqlitePool,
    owner_id: &str,
    recipes: &[Recipe],
) -> anyhow::Result<()> {
    sync(pool, Expr::col(RecipeCache::OwnerId).eq(owner_id), recipes).await
}

pub async fn remove(pool: &SqlitePool, id: &str) -> anyhow::Result<()> {
    let statement = Query::delete()
        .from_table(RecipeCache::Table)
        .and_where(Expr::col(RecipeCache::Id).eq(id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub async fn find(pool: &SqlitePool, id: &str) -> anyhow::Result<Option<Recipe>> {
    let statement = Query::select()
        .columns(columns())
        .from(RecipeCache::Table)
        .and_where(Expr::col(RecipeCache::Id).eq(id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Into::into))
}

pub async fn by_owner(pool: &SqlitePool, owner_id: &str) -> anyhow::Result<Vec<Recipe>> {
    let statement = Query::select()
        .columns(columns())
        .from(RecipeCache::Table)
        .and_where(Expr::col(RecipeCache::OwnerId).eq(owner_id))
        .order_by(RecipeCache::CreatedAt, Order::Desc)
        .order_by(RecipeCache::Id, Order::Desc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn filter(pool: &SqlitePool, query: &FeedQuery) -> anyhow::Result<Vec<Recipe>> {
    let mut statement = Query::select()
        .columns(columns())
        .from(RecipeCache::Table)
        .and_where(Expr::col(RecipeCache::IsPublic).eq(true))
        .order_by(RecipeCache::CreatedAt, Order::Desc)
        .order_by(RecipeCache::Id, Order::Desc)
        .limit(query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT))
        .offset(query.offset.unwrap_or_default())
        .to_owned();

    if let Some(category) = query.category {
        statement.and_where(Expr::col(RecipeCache::Category).eq(category.to_string()));
    }

    if let Some(difficulty) = query.difficulty {
        statement.and_where(Expr::col(RecipeCache::Difficulty).eq(difficulty.to_string()));
    }

    if let Some(max_duration) = query.max_duration {
        statement.and_where(Expr::col(RecipeCache::Duration).lte(max_duration));
    }

    if let Some(search) = query.search.as_deref().map(str::trim)
        && !search.is_empty()
    {
        statement.and_where(
            Expr::col(RecipeCache::Title)
                .like(LikeExpr::new(format!("%{}%", escape_like(search))).escape(LIKE_ESCAPE)),
        );
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

const LIKE_ESCAPE: char = '!';

/// Escapes the LIKE wildcards of user input with `LIKE_ESCAPE`.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }

    escaped
}
