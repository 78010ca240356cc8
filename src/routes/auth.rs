use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use recipebook_shared::user::Account;
use recipebook_user::{SignInInput, SignUpInput};
use serde::Serialize;

use super::AppState;
use crate::{
    error::AppResult,
    middleware::{AUTH_COOKIE_NAME, Auth},
};

#[derive(Serialize)]
pub struct SessionResponse {
    pub account: Account,
    pub token: String,
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// POST /auth/sign-up
pub async fn post_sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<SignUpInput>,
) -> AppResult<impl IntoResponse> {
    let (account, token) = state.user_command.sign_up(input).await?;

    tracing::info!(account_id = %account.id, "Account signed up");

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(token.to_owned())),
        Json(SessionResponse { account, token }),
    ))
}

/// POST /auth/sign-in
pub async fn post_sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<SignInInput>,
) -> AppResult<impl IntoResponse> {
    let (account, token) = state.user_command.sign_in(input).await?;

    tracing::info!(account_id = %account.id, "Account signed in");

    Ok((
        jar.add(session_cookie(token.to_owned())),
        Json(SessionResponse { account, token }),
    ))
}

/// POST /auth/sign-out - Closes the session and clears the cookie
pub async fn post_sign_out(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    jar: CookieJar,
) -> AppResult<impl IntoResponse> {
    state.user_command.sign_out(&auth.token).await?;

    Ok((
        StatusCode::NO_CONTENT,
        jar.remove(Cookie::build(AUTH_COOKIE_NAME).path("/")),
    ))
}
