pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::AppState;

/// Wires the commands of every domain crate over a shared cloud state.
pub fn app_state(state: recipebook_cloud::State, config: &Config) -> AppState {
    AppState {
        user_command: recipebook_user::Command::new(state.clone(), config.jwt.secret.to_owned())
            .session_days(config.jwt.expiration_days),
        recipe_command: recipebook_recipe::Command::new(state.clone())
            .image_max_width(config.image.max_width),
        shopping_command: recipebook_shopping::Command::new(state.clone()),
        pool: state.read_db,
    }
}
