mod recipe_cache;
mod session;
mod user_list_cache;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebook",
    "m0001",
    vec_box![],
    vec_box![
        recipe_cache::CreateTable,
        recipe_cache::CreateIdx1,
        recipe_cache::CreateIdx2,
        user_list_cache::CreateTable,
        user_list_cache::CreateIdx1,
        session::CreateTable,
        session::CreateIdx1
    ]
);
