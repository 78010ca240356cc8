use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    extract::CookieJar,
    headers::{Authorization, authorization::Bearer},
};

use crate::{error::AppError, routes::AppState};

pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Auth extension inserted for authenticated requests
#[derive(Clone, Debug)]
pub struct Auth {
    pub account_id: String,
    pub session_id: String,
    pub token: String,
}

/// Authentication middleware
///
/// Takes the token from the `Authorization: Bearer` header, falling back to
/// the `auth_token` cookie, and checks it against the open sessions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match (bearer, jar.get(AUTH_COOKIE_NAME)) {
        (Some(TypedHeader(Authorization(bearer))), _) => bearer.token().to_owned(),
        (None, Some(cookie)) => cookie.value().to_owned(),
        (None, None) => {
            tracing::warn!("Missing auth token");
            return AppError(recipebook_shared::Error::Unauthorized(
                "Missing token".to_owned(),
            ))
            .into_response();
        }
    };

    let authenticated = match state.user_command.authenticate(&token).await {
        Ok(authenticated) => authenticated,
        Err(e) => return AppError(e).into_response(),
    };

    req.extensions_mut().insert(Auth {
        account_id: authenticated.account_id,
        session_id: authenticated.session_id,
        token,
    });

    next.run(req).await
}
