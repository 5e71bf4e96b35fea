use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::error;

/// Failure taxonomy for the core operations. The HTTP layer maps each variant
/// to a status code and JSON body; nothing is swallowed along the way.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("{message}")]
    Conflict { field: &'static str, message: String },

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

fn field_keyed(field: &str, message: &str) -> Value {
    Value::Object(Map::from_iter([(
        field.to_string(),
        Value::String(message.to_string()),
    )]))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Error::Validation { field, message } | Error::Conflict { field, message } => {
                (StatusCode::BAD_REQUEST, field_keyed(field, message))
            }
            Error::InvalidTransition(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            Error::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "error": message })),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": self.to_string() })),
            Error::Database(err) => {
                error!("database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
