use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::errors::{ErrorCode, error_response};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with ID {0} was not found")]
    NotFound(Uuid),

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(id) => error_response(
                StatusCode::NOT_FOUND,
                format!("Product with ID {} was not found", id),
                ErrorCode::NotFound,
                None,
            ),
            ProductError::Validation(messages) => {
                let details = json!({
                    "errors": messages
                        .iter()
                        .map(|m| json!({"message": m}))
                        .collect::<Vec<_>>(),
                });
                let message = messages
                    .first()
                    .cloned()
                    .unwrap_or_else(|| ErrorCode::UnprocessableEntity.default_message().to_string());

                error_response(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    message,
                    ErrorCode::UnprocessableEntity,
                    Some(details),
                )
            }
            ProductError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    ErrorCode::InternalError,
                    None,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = ProductError::NotFound(id);
        assert_eq!(
            err.to_string(),
            format!("Product with ID {} was not found", id)
        );
    }
}
