use std::{str::FromStr, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use recipebook::config::{
    CloudConfig, Config, DatabaseConfig, ImageConfig, JwtConfig, ObservabilityConfig,
    ServerConfig,
};
use recipebook_cloud::{State, memory};
use serde_json::{Value, json};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<memory::Backend>,
    _dir: TempDir,
}

pub fn config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        cloud: CloudConfig::default(),
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 7,
        },
        image: ImageConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.child("db.sqlite3");
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(opts).await?;
        let mut conn = pool.acquire().await?;
        recipebook_db::migrator()?
            .run(&mut *conn, &Plan::apply_all())
            .await?;
        drop(conn);

        let backend = Arc::new(memory::Backend::new());
        let state = State {
            read_db: pool.clone(),
            write_db: pool,
            storage: backend.clone(),
            lists: backend.clone(),
            accounts: backend.clone(),
        };

        Ok(Self {
            router: recipebook::routes::router(recipebook::app_state(state, &config())),
            backend,
            _dir: dir,
        })
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, value))
    }

    /// Sends a raw body and returns the raw response.
    pub async fn send_bytes(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Vec<u8>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Vec<u8>)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = self
            .router
            .clone()
            .oneshot(builder.body(Body::from(body))?)
            .await?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await?.to_bytes();

        Ok((status, headers, bytes.to_vec()))
    }

    /// Signs up a new account and returns its token.
    pub async fn sign_up(&self, email: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .send(
                "POST",
                "/auth/sign-up",
                None,
                Some(json!({
                    "email": email,
                    "password": "my_password",
                    "display_name": "John"
                })),
            )
            .await?;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        Ok(body["token"].as_str().unwrap_or_default().to_owned())
    }
}

pub fn recipe_body(title: &str, is_public: bool) -> Value {
    json!({
        "title": title,
        "description": "Family favourite",
        "ingredients": [
            {"name": "Flour", "amount": 250.0, "unit": "G"},
            {"name": "Egg", "amount": 2.0, "unit": "Piece"}
        ],
        "directions": ["Mix", "Bake"],
        "category": "Dessert",
        "difficulty": "Easy",
        "duration": 45,
        "portions": 4,
        "is_public": is_public
    })
}
