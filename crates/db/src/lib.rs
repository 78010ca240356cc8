use sqlx_migrator::{Info, Migrator};

mod cloud;
mod m0001;
pub mod table;

/// Migrations of the local cache database.
pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}

/// Migrations of the database backing the sqlite cloud backend.
pub fn cloud_migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(cloud::Migration)])?;

    Ok(migrator)
}
