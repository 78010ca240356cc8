use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use recipebook_recipe::{FeedQuery, RecipeInput};
use recipebook_shared::recipe::Recipe;
use serde::Deserialize;

use super::AppState;
use crate::{error::AppResult, middleware::Auth};

#[derive(Deserialize)]
pub struct VisibilityInput {
    pub is_public: bool,
}

/// GET /recipes - Public feed
pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipe_command.feed(&query).await?))
}

/// GET /recipes/mine
pub async fn get_my_recipes(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipe_command.by_owner(auth.account_id).await?))
}

/// POST /recipes - The author's display name is copied onto the recipe
pub async fn post_create_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<RecipeInput>,
) -> AppResult<impl IntoResponse> {
    let account = state.user_command.profile(&auth.account_id).await?;
    let recipe = state
        .recipe_command
        .create(input, auth.account_id, account.display_name)
        .await?;

    tracing::info!(recipe_id = %recipe.id, "Recipe created");

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(state.recipe_command.view(id, auth.account_id).await?))
}

/// PUT /recipes/{id}
pub async fn put_update_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(
        state
            .recipe_command
            .update(id, input, auth.account_id)
            .await?,
    ))
}

/// DELETE /recipes/{id}
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.recipe_command.delete(id, auth.account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /recipes/{id}/visibility
pub async fn put_visibility(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<VisibilityInput>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(
        state
            .recipe_command
            .set_visibility(id, input.is_public, auth.account_id)
            .await?,
    ))
}

/// PUT /recipes/{id}/image - Raw picture bytes in the body
pub async fn put_image(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Recipe>> {
    Ok(Json(
        state
            .recipe_command
            .upload_image(id, body.to_vec(), auth.account_id)
            .await?,
    ))
}

/// GET /recipes/{id}/image
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let Some(image) = state.recipe_command.image(id).await? else {
        return Err(recipebook_shared::Error::NotFound("image".to_owned()).into());
    };

    Ok((
        [
            (header::CONTENT_TYPE, image.content_type),
            (header::CACHE_CONTROL, "public, max-age=31536000".to_owned()),
        ],
        image.data,
    ))
}
