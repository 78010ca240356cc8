use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use recipebook_shared::user::Account;
use recipebook_user::{ChangeEmailInput, ChangePasswordInput, DeleteAccountInput};

use super::AppState;
use crate::{
    error::AppResult,
    middleware::{AUTH_COOKIE_NAME, Auth},
};

/// GET /account
pub async fn get_account(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> AppResult<Json<Account>> {
    Ok(Json(state.user_command.profile(auth.account_id).await?))
}

/// PUT /account/password - Other sessions are closed
pub async fn put_password(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<ChangePasswordInput>,
) -> AppResult<StatusCode> {
    state
        .user_command
        .change_password(auth.account_id, auth.session_id, input)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /account/email
pub async fn put_email(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<ChangeEmailInput>,
) -> AppResult<Json<Account>> {
    Ok(Json(
        state
            .user_command
            .change_email(auth.account_id, input)
            .await?,
    ))
}

/// DELETE /account
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    jar: CookieJar,
    Json(input): Json<DeleteAccountInput>,
) -> AppResult<impl IntoResponse> {
    state
        .user_command
        .delete_account(&auth.account_id, input)
        .await?;

    tracing::info!(account_id = %auth.account_id, "Account deleted");

    Ok((
        StatusCode::NO_CONTENT,
        jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/")),
    ))
}
