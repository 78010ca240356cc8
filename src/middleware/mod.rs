pub mod auth;

pub use auth::{AUTH_COOKIE_NAME, Auth, auth_middleware};
