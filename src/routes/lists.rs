use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use recipebook_shared::{recipe::Ingredient, shopping::UserList};
use recipebook_shopping::{CreateInput, PortionsInput, RenameInput};

use super::AppState;
use crate::{error::AppResult, middleware::Auth};

/// GET /lists
pub async fn get_lists(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> AppResult<Json<Vec<UserList>>> {
    Ok(Json(state.shopping_command.lists(auth.account_id).await?))
}

/// POST /lists
pub async fn post_create_list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<CreateInput>,
) -> AppResult<impl IntoResponse> {
    let list = state
        .shopping_command
        .create(input, auth.account_id)
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// POST /lists/from-recipe/{recipe_id} - Body optional, defaults to the recipe portions
pub async fn post_create_from_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(recipe_id): Path<String>,
    input: Option<Json<PortionsInput>>,
) -> AppResult<impl IntoResponse> {
    let input = input.map(|Json(input)| input).unwrap_or_default();
    let list = state
        .shopping_command
        .create_from_recipe(recipe_id, input, auth.account_id)
        .await?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /lists/{id}
pub async fn get_list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> AppResult<Json<UserList>> {
    Ok(Json(state.shopping_command.load(id, auth.account_id).await?))
}

/// PATCH /lists/{id} - Rename
pub async fn patch_list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<RenameInput>,
) -> AppResult<Json<UserList>> {
    Ok(Json(
        state
            .shopping_command
            .rename(id, input, auth.account_id)
            .await?,
    ))
}

/// DELETE /lists/{id}
pub async fn delete_list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.shopping_command.delete(id, auth.account_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /lists/{id}/recipes/{recipe_id}
pub async fn post_add_recipe(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path((id, recipe_id)): Path<(String, String)>,
    input: Option<Json<PortionsInput>>,
) -> AppResult<Json<UserList>> {
    let input = input.map(|Json(input)| input).unwrap_or_default();

    Ok(Json(
        state
            .shopping_command
            .add_recipe(id, recipe_id, input, auth.account_id)
            .await?,
    ))
}

/// POST /lists/{id}/items
pub async fn post_add_item(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(ingredient): Json<Ingredient>,
) -> AppResult<Json<UserList>> {
    Ok(Json(
        state
            .shopping_command
            .add_item(id, ingredient, auth.account_id)
            .await?,
    ))
}

/// POST /lists/{id}/items/{item_id}/toggle
pub async fn post_toggle_item(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<UserList>> {
    Ok(Json(
        state
            .shopping_command
            .toggle(id, item_id, auth.account_id)
            .await?,
    ))
}

/// DELETE /lists/{id}/items/{item_id}
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<UserList>> {
    Ok(Json(
        state
            .shopping_command
            .remove_item(id, item_id, auth.account_id)
            .await?,
    ))
}

/// POST /lists/{id}/clear-checked
pub async fn post_clear_checked(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> AppResult<Json<UserList>> {
    Ok(Json(
        state
            .shopping_command
            .clear_checked(id, auth.account_id)
            .await?,
    ))
}
