use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::error::{FieldError, MessageResponse, ValidationResponse};
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod masjids;
mod server;
mod validation;

pub enum ServerError {
    Validation(Vec<FieldError>),
    Engine(EngineError),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationResponse {
                    success: false,
                    errors,
                }),
            )
                .into_response(),
            ServerError::Engine(err) => {
                let status = status_for_engine_error(&err);
                let message = message_for_engine_error(err);
                (
                    status,
                    Json(MessageResponse {
                        success: false,
                        message,
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let res = ServerError::Validation(vec![FieldError {
            path: "name".to_string(),
            message: "Name is required".to_string(),
        }])
        .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_database_maps_to_500() {
        let res = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "boom".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
