mod account;
mod auth;
mod health;
mod lists;
mod recipes;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::middleware::auth_middleware;

/// Uploaded pictures are re-encoded, so the raw body may be large.
const IMAGE_BODY_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_command: recipebook_user::Command,
    pub recipe_command: recipebook_recipe::Command,
    pub shopping_command: recipebook_shopping::Command,
    pub pool: SqlitePool,
}

pub fn router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/sign-out", post(auth::post_sign_out))
        .route(
            "/account",
            get(account::get_account).delete(account::delete_account),
        )
        .route("/account/password", put(account::put_password))
        .route("/account/email", put(account::put_email))
        .route(
            "/recipes",
            get(recipes::get_feed).post(recipes::post_create_recipe),
        )
        .route("/recipes/mine", get(recipes::get_my_recipes))
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe)
                .put(recipes::put_update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/recipes/{id}/visibility", put(recipes::put_visibility))
        .route(
            "/recipes/{id}/image",
            put(recipes::put_image).layer(DefaultBodyLimit::max(IMAGE_BODY_LIMIT)),
        )
        .route("/lists", get(lists::get_lists).post(lists::post_create_list))
        .route(
            "/lists/from-recipe/{recipe_id}",
            post(lists::post_create_from_recipe),
        )
        .route(
            "/lists/{id}",
            get(lists::get_list)
                .patch(lists::patch_list)
                .delete(lists::delete_list),
        )
        .route(
            "/lists/{id}/recipes/{recipe_id}",
            post(lists::post_add_recipe),
        )
        .route("/lists/{id}/items", post(lists::post_add_item))
        .route(
            "/lists/{id}/items/{item_id}/toggle",
            post(lists::post_toggle_item),
        )
        .route("/lists/{id}/items/{item_id}", delete(lists::delete_item))
        .route("/lists/{id}/clear-checked", post(lists::post_clear_checked))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/auth/sign-up", post(auth::post_sign_up))
        .route("/auth/sign-in", post(auth::post_sign_in))
        // Image urls are embedded in recipes and fetched without credentials
        .route("/recipes/{id}/image", get(recipes::get_image))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
