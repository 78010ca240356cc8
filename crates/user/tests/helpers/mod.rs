use std::{path::PathBuf, str::FromStr, sync::Arc};

use recipebook_cloud::{State, memory};
use recipebook_user::{Command, SignUpInput};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub const SECRET: &str = "test_secret_key_minimum_32_characters_long";

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<(State, Arc<memory::Backend>)> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebook_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;

    let backend = Arc::new(memory::Backend::new());

    Ok((
        State {
            read_db: pool.clone(),
            write_db: pool,
            storage: backend.clone(),
            lists: backend.clone(),
            accounts: backend.clone(),
        },
        backend,
    ))
}

pub async fn setup_command(path: PathBuf) -> anyhow::Result<(Command, Arc<memory::Backend>)> {
    let (state, backend) = setup_test_state(path).await?;

    Ok((Command::new(state, SECRET), backend))
}

pub fn sign_up_input(email: &str) -> SignUpInput {
    SignUpInput {
        email: email.to_owned(),
        password: "my_password".to_owned(),
        display_name: Some("John".to_owned()),
    }
}
