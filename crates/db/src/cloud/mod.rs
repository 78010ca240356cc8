mod account;
mod image;
mod list;
mod recipe;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebook_cloud",
    "m0001",
    vec_box![],
    vec_box![
        recipe::CreateTable,
        recipe::CreateIdx1,
        recipe::CreateIdx2,
        image::CreateTable,
        list::CreateTable,
        list::CreateIdx1,
        account::CreateTable,
        account::CreateUk1
    ]
);
