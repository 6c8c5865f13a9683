use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Book ID is required")]
    MissingId,

    #[error("Invalid book ID: {cause}")]
    InvalidId { cause: String },

    #[error("Invalid JSON body: {cause}")]
    InvalidBody { cause: String },

    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String },

    #[error("Book not found: {id}")]
    BookNotFound { id: String },

    #[error("No route for {path}")]
    RouteNotFound { path: String },

    #[error("Query failed while trying to {operation}: {cause}")]
    QueryFailed {
        operation: &'static str,
        cause: String,
    },

    #[error("Connection failed to {database}: {cause}")]
    ConnectionFailed { database: String, cause: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingId
            | GatewayError::InvalidId { .. }
            | GatewayError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            GatewayError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::BookNotFound { .. } | GatewayError::RouteNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            GatewayError::QueryFailed { .. }
            | GatewayError::ConnectionFailed { .. }
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_response = match &self {
            GatewayError::MissingId => ErrorResponse {
                error: "missing_id".to_string(),
                message: "Book ID is required".to_string(),
                cause: None,
            },
            GatewayError::InvalidId { cause } => ErrorResponse {
                error: "invalid_id".to_string(),
                message: "Invalid book ID".to_string(),
                cause: Some(cause.clone()),
            },
            GatewayError::InvalidBody { cause } => ErrorResponse {
                error: "invalid_json".to_string(),
                message: "Invalid JSON body".to_string(),
                cause: Some(cause.clone()),
            },
            GatewayError::MethodNotAllowed { method } => ErrorResponse {
                error: "method_not_allowed".to_string(),
                message: format!("Invalid request method: {}", method),
                cause: None,
            },
            GatewayError::BookNotFound { id } => ErrorResponse {
                error: "book_not_found".to_string(),
                message: format!("Book '{}' not found", id),
                cause: None,
            },
            GatewayError::RouteNotFound { path } => ErrorResponse {
                error: "not_found".to_string(),
                message: format!("No route matches '{}'", path),
                cause: None,
            },
            GatewayError::QueryFailed { operation, cause } => {
                tracing::error!("Query failed ({}): {}", operation, cause);
                ErrorResponse {
                    error: "query_failed".to_string(),
                    message: format!("Failed to {}", operation),
                    cause: Some(cause.clone()),
                }
            }
            GatewayError::ConnectionFailed { database, cause } => {
                tracing::error!("Connection to {} failed: {}", database, cause);
                ErrorResponse {
                    error: "connection_failed".to_string(),
                    message: format!("Failed to connect to database '{}'", database),
                    cause: Some(cause.clone()),
                }
            }
            GatewayError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorResponse {
                    error: "internal_error".to_string(),
                    message: msg.clone(),
                    cause: None,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_4xx() {
        assert_eq!(GatewayError::MissingId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::InvalidBody {
                cause: "EOF".to_string()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::InvalidId {
                cause: "Invalid UTF-8 in `id`".to_string()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::MethodNotAllowed {
                method: "GET".to_string()
            }
            .status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            GatewayError::BookNotFound {
                id: "abc".to_string()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_errors_are_500() {
        let query = GatewayError::QueryFailed {
            operation: "fetch books",
            cause: "relation \"books\" does not exist".to_string(),
        };
        assert_eq!(query.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let conn = GatewayError::ConnectionFailed {
            database: "books".to_string(),
            cause: "connection refused".to_string(),
        };
        assert_eq!(conn.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_keeps_status() {
        let response = GatewayError::BookNotFound {
            id: "missing".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
