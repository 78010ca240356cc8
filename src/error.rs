use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Turns the error of a command into a JSON response.
#[derive(Debug)]
pub struct AppError(pub recipebook_shared::Error);

pub type AppResult<T> = Result<T, AppError>;

impl From<recipebook_shared::Error> for AppError {
    fn from(err: recipebook_shared::Error) -> Self {
        Self(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(recipebook_shared::Error::Unknown(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use recipebook_shared::Error;

        let (status, message) = match self.0 {
            Error::Validate(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            Error::User(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Server(msg) => {
                tracing::error!("{msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
            Error::Unknown(err) => {
                tracing::error!("{err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
